use std::path::PathBuf;

use wikiqa_config::AnswerBackend;

/// Prints the configuration `ask` would run with, credentials masked.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = super::load_config(input.as_deref())?;

        println!("=== wikiqa Configuration ===\n");

        println!("Wikipedia:");
        println!("  API URL: {}", config.wikipedia.api_url);
        println!("  User-Agent: {}", config.wikipedia.user_agent);
        println!("  Timeout: {}s", config.wikipedia.timeout);
        println!("  Search Limit: {}", config.wikipedia.search_limit);
        println!("  Retry Delays: {:?}s", config.wikipedia.retry_delays);
        println!();

        println!("Answer Model:");
        match config.answer.backend {
            AnswerBackend::HuggingFace => {
                let hf = &config.answer.huggingface;
                println!("  Backend: huggingface");
                println!("  Endpoint: {}/{}", hf.api_url, hf.model);
                println!("  Token: {}", mask(hf.api_token.as_deref().unwrap_or_default()));
                println!("  Timeout: {}s", hf.timeout);
                println!("  Retry Delays: {:?}s", hf.retry_delays);
            }
            AnswerBackend::Zhipu => {
                let zhipu = &config.answer.zhipu;
                println!("  Backend: zhipu");
                println!("  Model: {}", zhipu.model);
                println!("  API Key: {}", mask(&zhipu.api_key));
                println!("  Timeout: {}s", zhipu.timeout);
                println!("  Retry Delays: {:?}s", zhipu.retry_delays);
            }
        }
        println!();

        println!("Pipeline:");
        println!("  Top Paragraphs: {}", config.pipeline.top_paragraphs);
        println!("  Proper Noun Weight: {}", config.pipeline.proper_noun_weight);
        println!("  Frequency Weight: {}", config.pipeline.frequency_weight);
        println!("  Require Nouns: {}", config.pipeline.require_nouns);

        Ok(())
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        "(not set)".to_string()
    } else if secret.chars().count() > 8 {
        let head: String = secret.chars().take(4).collect();
        format!("{head}...***")
    } else {
        "***".to_string()
    }
}
