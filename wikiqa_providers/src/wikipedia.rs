use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;
use wikiqa_core::{ArticleContent, ArticleSource, FetchOutcome};

use crate::retry::{delays_from_secs, retry_with_backoff};

/// MediaWiki API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikipediaConfig {
    /// Action API endpoint
    #[serde(default = "WikipediaConfig::default_api_url")]
    pub api_url: String,

    /// User-Agent header; Wikimedia rejects requests without one
    #[serde(default = "WikipediaConfig::default_user_agent")]
    pub user_agent: String,

    /// Request timeout (seconds)
    #[serde(default = "WikipediaConfig::default_timeout")]
    pub timeout: u64,

    /// Maximum titles returned per search
    #[serde(default = "WikipediaConfig::default_search_limit")]
    pub search_limit: usize,

    /// Pause before each retry of a failed request (seconds)
    #[serde(default = "WikipediaConfig::default_retry_delays")]
    pub retry_delays: Vec<u64>,
}

impl WikipediaConfig {
    fn default_api_url() -> String {
        "https://en.wikipedia.org/w/api.php".to_string()
    }

    fn default_user_agent() -> String {
        format!("wikiqa/{} (command-line question answering)", env!("CARGO_PKG_VERSION"))
    }

    const fn default_timeout() -> u64 {
        20
    }

    const fn default_search_limit() -> usize {
        10
    }

    fn default_retry_delays() -> Vec<u64> {
        vec![1, 2, 4]
    }
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: Self::default_api_url(),
            user_agent: Self::default_user_agent(),
            timeout: Self::default_timeout(),
            search_limit: Self::default_search_limit(),
            retry_delays: Self::default_retry_delays(),
        }
    }
}

/// Wikipedia search and plain-text article retrieval over the Action API.
pub struct WikipediaClient {
    client: Client,
    config: WikipediaConfig,
    retry_delays: Vec<Duration>,
}

impl WikipediaClient {
    pub fn new(config: WikipediaConfig) -> Result<Self> {
        info!("Creating WikipediaClient for {}", config.api_url);
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;
        let retry_delays = delays_from_secs(&config.retry_delays);

        Ok(Self {
            client,
            config,
            retry_delays,
        })
    }

    fn url(&self, params: &[(&str, &str)]) -> Result<Url> {
        let common = [("format", "json"), ("formatversion", "2")];
        Url::parse_with_params(&self.config.api_url, common.iter().chain(params))
            .with_context(|| format!("Invalid API url: {}", self.config.api_url))
    }

    async fn get_json(&self, url: &Url) -> Result<Value> {
        retry_with_backoff(|| self.try_get(url), &self.retry_delays).await
    }

    /// Helper method to send a single request
    async fn try_get(&self, url: &Url) -> Result<Value> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        if let Some(error) = response.get("error") {
            anyhow::bail!(
                "MediaWiki error {}: {}",
                error["code"].as_str().unwrap_or("unknown"),
                error["info"].as_str().unwrap_or("")
            );
        }
        Ok(response)
    }

    async fn disambiguation_options(&self, title: &str) -> Result<Vec<String>> {
        let url = self.url(&[
            ("action", "parse"),
            ("page", title),
            ("prop", "wikitext"),
            ("redirects", "1"),
        ])?;
        let response = self.get_json(&url).await?;
        let wikitext = response["parse"]["wikitext"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing wikitext"))?;
        Ok(list_item_links(wikitext))
    }
}

#[async_trait]
impl ArticleSource for WikipediaClient {
    async fn search(&self, phrase: &str) -> Result<Vec<String>> {
        let limit = self.config.search_limit.to_string();
        let url = self.url(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", phrase),
            ("srlimit", &limit),
            ("srprop", ""),
        ])?;
        debug!("Searching Wikipedia for {phrase:?}");
        let response = self.get_json(&url).await?;
        parse_search(&response)
    }

    async fn fetch(&self, title: &str) -> Result<FetchOutcome> {
        let url = self.url(&[
            ("action", "query"),
            ("prop", "extracts|pageprops"),
            ("explaintext", "1"),
            ("ppprop", "disambiguation"),
            ("redirects", "1"),
            ("titles", title),
        ])?;
        debug!("Fetching Wikipedia page {title:?}");
        let response = self.get_json(&url).await?;

        match parse_page(&response)? {
            Page::Missing => Ok(FetchOutcome::NotFound),
            Page::Disambiguation(resolved) => {
                let options = self.disambiguation_options(&resolved).await?;
                debug!("{resolved:?} is a disambiguation page with {} options", options.len());
                Ok(FetchOutcome::Ambiguous(options))
            }
            Page::Article(article) => Ok(FetchOutcome::Found(article)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Page {
    Missing,
    Disambiguation(String),
    Article(ArticleContent),
}

fn parse_search(response: &Value) -> Result<Vec<String>> {
    let results = response["query"]["search"]
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing search results"))?;
    Ok(results
        .iter()
        .filter_map(|r| r["title"].as_str().map(str::to_string))
        .collect())
}

fn parse_page(response: &Value) -> Result<Page> {
    let Some(page) = response["query"]["pages"].as_array().and_then(|p| p.first()) else {
        return Ok(Page::Missing);
    };
    if page["missing"].as_bool().unwrap_or(false) || page["invalid"].as_bool().unwrap_or(false) {
        return Ok(Page::Missing);
    }

    let title = page["title"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing title"))?
        .to_string();
    if page["pageprops"].get("disambiguation").is_some() {
        return Ok(Page::Disambiguation(title));
    }

    let content = page["extract"].as_str().unwrap_or_default().to_string();
    Ok(Page::Article(ArticleContent { title, content }))
}

static LIST_LINK: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn list_link() -> &'static Regex {
    LIST_LINK.get_or_init(|| {
        Regex::new(r"^\*+[^\[]*\[\[([^\]|#]+)")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Target of the first link on each bulleted line, in page order.
fn list_item_links(wikitext: &str) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for line in wikitext.lines() {
        let Some(target) = list_link()
            .captures(line.trim_start())
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
        else {
            continue;
        };
        if !target.is_empty() && !target.contains(':') && !options.contains(&target) {
            options.push(target);
        }
    }
    options
}
