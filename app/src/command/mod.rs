//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is a unit struct implementing [`CommandStrategy`] with its
//! own input type, dispatched statically from `main`.

use std::path::Path;

use wikiqa_config::Config;

mod ask;
mod info;
mod init;
mod version;

pub use ask::{AskInput, AskStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Contract shared by every command strategy.
pub trait CommandStrategy: Send + Sync + 'static {
    /// Arguments the command takes from the CLI.
    type Input;

    /// Run the command.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// `--config` file when given, `~/wikiqa/config.json` otherwise.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    path.map_or_else(Config::load, Config::load_from)
}
