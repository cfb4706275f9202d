use std::io::Write;
use std::path::PathBuf;

use tracing::info;
use wikiqa_config::{AnswerBackend, AnswerConfig};
use wikiqa_core::{AnswerModel, Query};
use wikiqa_nlp::EnglishAnalyzer;
use wikiqa_providers::{HuggingFaceAnswerModel, WikipediaClient, ZhipuAnswerModel};

const PROMPT: &str = "Enter question below: ";

/// Input parameters for the Ask command strategy.
#[derive(Debug, Clone)]
pub struct AskInput {
    /// Question to answer; read from stdin when absent
    pub question: Option<String>,
    /// Config file override
    pub config: Option<PathBuf>,
}

/// Answers one question: Wikipedia retrieval, ranking, then the configured
/// extractive reader.
#[derive(Debug, Clone, Copy)]
pub struct AskStrategy;

impl super::CommandStrategy for AskStrategy {
    type Input = AskInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = super::load_config(input.config.as_deref())?;

        let question = match input.question {
            Some(question) => question,
            None => prompt_question()?,
        };
        let question = question.trim();
        if question.is_empty() {
            anyhow::bail!("No question given");
        }

        let analyzer = EnglishAnalyzer::new();
        let source = WikipediaClient::new(config.wikipedia)?;
        let model = answer_model(&config.answer)?;

        let answer = Query::new(question, &analyzer, &source, &*model)
            .with_config(config.pipeline)
            .run()
            .await?;

        info!("Answer taken from article {:?}", answer.article);
        println!("{}", answer.text);
        Ok(())
    }
}

fn answer_model(config: &AnswerConfig) -> anyhow::Result<Box<dyn AnswerModel>> {
    info!("Answer backend: {:?}", config.backend);
    let model: Box<dyn AnswerModel> = match config.backend {
        AnswerBackend::HuggingFace => Box::new(HuggingFaceAnswerModel::new(&config.huggingface)?),
        AnswerBackend::Zhipu => Box::new(ZhipuAnswerModel::new(&config.zhipu)?),
    };
    Ok(model)
}

fn prompt_question() -> anyhow::Result<String> {
    print!("{PROMPT}");
    std::io::stdout().flush()?;

    let mut question = String::new();
    std::io::stdin().read_line(&mut question)?;
    Ok(question)
}
