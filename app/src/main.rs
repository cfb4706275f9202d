#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use command::{AskInput, AskStrategy, CommandStrategy, InfoStrategy, InitStrategy, VersionStrategy};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wikiqa_core::QueryError;

#[derive(Parser)]
#[command(name = "wikiqa")]
#[command(about = "Answer questions from Wikipedia articles", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask {
        /// Question to answer; prompts on stdin when omitted
        #[arg(short, long)]
        question: Option<String>,

        /// Config file to use instead of ~/wikiqa/config.json
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show the effective configuration
    Info {
        /// Config file to use instead of ~/wikiqa/config.json
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

fn env_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    }
}

async fn dispatch(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Ask { question, config } => {
            AskStrategy.execute(AskInput { question, config }).await
        }
        Commands::Info { config } => InfoStrategy.execute(config).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}

/// Query failures get their fixed message and exit code; anything else is a
/// setup problem reported verbatim.
fn report(err: &anyhow::Error) -> ExitCode {
    if let Some(query_err) = err.downcast_ref::<QueryError>() {
        debug!("{query_err}");
        println!("{}", query_err.user_message());
        return ExitCode::from(query_err.exit_code());
    }

    eprintln!("Error: {err:#}");
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {e}");
        return ExitCode::FAILURE;
    }

    match dispatch(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}
