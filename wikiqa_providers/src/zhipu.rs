use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use wikiqa_core::AnswerModel;

use crate::retry::{delays_from_secs, retry_with_backoff};

const SYSTEM_PROMPT: &str = "You answer questions using only the supplied context. \
Reply with the shortest span copied verbatim from the context that answers the question. \
Do not add explanation or punctuation.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZhipuConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "ZhipuConfig::default_model")]
    pub model: String,

    /// Request timeout (seconds)
    #[serde(default = "ZhipuConfig::default_timeout")]
    pub timeout: u64,

    /// Pause before each retry of a failed request (seconds)
    #[serde(default = "ZhipuConfig::default_retry_delays")]
    pub retry_delays: Vec<u64>,
}

impl ZhipuConfig {
    fn default_model() -> String {
        "glm-4-flash".to_string()
    }

    const fn default_timeout() -> u64 {
        60
    }

    fn default_retry_delays() -> Vec<u64> {
        vec![2, 4, 8]
    }
}

impl Default for ZhipuConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: Self::default_model(),
            timeout: Self::default_timeout(),
            retry_delays: Self::default_retry_delays(),
        }
    }
}

/// Chat-completion model prompted to behave as an extractive reader.
pub struct ZhipuAnswerModel {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    retry_delays: Vec<Duration>,
}

impl ZhipuAnswerModel {
    pub fn new(config: &ZhipuConfig) -> anyhow::Result<Self> {
        info!("Creating ZhipuAnswerModel");
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: "https://open.bigmodel.cn/api/paas/v4".to_string(),
            retry_delays: delays_from_secs(&config.retry_delays),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn request(&self, question: &str, context: &str) -> serde_json::Value {
        json!({
            "model": self.model,
            "temperature": 0.0,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {
                    "role": "user",
                    "content": format!("Context:\n{context}\n\nQuestion: {question}"),
                },
            ],
        })
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &serde_json::Value) -> anyhow::Result<String> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
            .trim()
            .to_string();

        Ok(content)
    }
}

#[async_trait]
impl AnswerModel for ZhipuAnswerModel {
    async fn answer(&self, question: &str, context: &str) -> anyhow::Result<String> {
        if self.api_key.is_empty() {
            anyhow::bail!("Zhipu API key is not configured");
        }
        let request = self.request(question, context);

        info!("Sending request to Zhipu API: model={}", self.model);

        let answer = retry_with_backoff(|| self.try_send(&request), &self.retry_delays).await?;

        info!("Received response from Zhipu API");
        Ok(answer)
    }
}
