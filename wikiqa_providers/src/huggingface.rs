use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;
use wikiqa_core::AnswerModel;

use crate::retry::{delays_from_secs, retry_with_backoff};

/// Extractive QA model served by the Hugging Face Inference API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    #[serde(default = "HuggingFaceConfig::default_api_url")]
    pub api_url: String,

    #[serde(default = "HuggingFaceConfig::default_model")]
    pub model: String,

    /// Bearer token; anonymous requests are heavily rate limited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Request timeout (seconds)
    #[serde(default = "HuggingFaceConfig::default_timeout")]
    pub timeout: u64,

    /// Pause before each retry (seconds); the model may still be loading on
    /// the first call
    #[serde(default = "HuggingFaceConfig::default_retry_delays")]
    pub retry_delays: Vec<u64>,
}

impl HuggingFaceConfig {
    fn default_api_url() -> String {
        "https://api-inference.huggingface.co/models".to_string()
    }

    fn default_model() -> String {
        "distilbert-base-cased-distilled-squad".to_string()
    }

    const fn default_timeout() -> u64 {
        60
    }

    fn default_retry_delays() -> Vec<u64> {
        vec![2, 5, 10]
    }
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_url: Self::default_api_url(),
            model: Self::default_model(),
            api_token: None,
            timeout: Self::default_timeout(),
            retry_delays: Self::default_retry_delays(),
        }
    }
}

pub struct HuggingFaceAnswerModel {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    retry_delays: Vec<Duration>,
}

impl HuggingFaceAnswerModel {
    pub fn new(config: &HuggingFaceConfig) -> anyhow::Result<Self> {
        info!("Creating HuggingFaceAnswerModel: model={}", config.model);
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/{}", config.api_url.trim_end_matches('/'), config.model),
            api_token: config.api_token.clone(),
            retry_delays: delays_from_secs(&config.retry_delays),
        })
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &Value) -> anyhow::Result<String> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        parse_answer(&response)
    }
}

#[async_trait]
impl AnswerModel for HuggingFaceAnswerModel {
    async fn answer(&self, question: &str, context: &str) -> anyhow::Result<String> {
        let request = json!({
            "inputs": {
                "question": question,
                "context": context,
            }
        });

        info!("Sending request to Hugging Face: {}", self.endpoint);

        let answer = retry_with_backoff(|| self.try_send(&request), &self.retry_delays).await?;

        info!("Received answer from Hugging Face");
        Ok(answer)
    }
}

/// Answer span from a question-answering response. The API returns either a
/// single object or a list ordered by score.
fn parse_answer(response: &Value) -> anyhow::Result<String> {
    if let Some(error) = response.get("error") {
        anyhow::bail!("Hugging Face error: {error}");
    }

    let best = match response {
        Value::Array(answers) => answers.first(),
        single => Some(single),
    };

    best.and_then(|b| b["answer"].as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing answer"))
}
