//! In-memory collaborators for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{ArticleContent, ArticleSource, FetchOutcome, LexicalAnalyzer, PosTag};

/// Splits on whitespace and strips surrounding punctuation. Capitalized
/// wh-words are `WP`, other capitalized words `NNP`, a few verbs `VBD`,
/// everything else `NN`.
pub struct PlainAnalyzer;

impl LexicalAnalyzer for PlainAnalyzer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .flat_map(|w| {
                let word = w.trim_matches(|c: char| !c.is_alphanumeric());
                let punct = w.strip_prefix(word).unwrap_or("").to_string();
                let mut out = Vec::new();
                if !word.is_empty() {
                    out.push(word.to_string());
                }
                if !punct.is_empty() && !word.is_empty() {
                    out.push(punct);
                }
                out
            })
            .collect()
    }

    fn lemmatize(&self, word: &str) -> String {
        if word.len() > 3 && word.ends_with('s') && word.chars().all(char::is_lowercase) {
            word[..word.len() - 1].to_string()
        } else {
            word.to_string()
        }
    }

    fn pos_tag(&self, word: &str) -> Option<PosTag> {
        let tag = if matches!(word, "Who" | "What" | "Where" | "When") {
            "WP"
        } else if word.chars().next().is_some_and(char::is_uppercase) {
            "NNP"
        } else if matches!(word, "wrote" | "built" | "painted") {
            "VBD"
        } else {
            "NN"
        };
        Some(PosTag::new(tag))
    }

    fn is_stopword(&self, word: &str) -> bool {
        matches!(word, "who" | "what" | "the" | "a" | "is" | "of" | "in")
    }
}

#[derive(Default)]
pub struct FakeSource {
    pub searches: HashMap<String, Vec<String>>,
    pub pages: HashMap<String, FetchOutcome>,
    pub fail_search: bool,
    pub fetched: Mutex<Vec<String>>,
    pub searched: Mutex<Vec<String>>,
}

impl FakeSource {
    #[must_use]
    pub fn with_search(mut self, phrase: &str, titles: &[&str]) -> Self {
        self.searches.insert(
            phrase.to_string(),
            titles.iter().map(|t| (*t).to_string()).collect(),
        );
        self
    }

    #[must_use]
    pub fn with_page(mut self, title: &str, content: &str) -> Self {
        self.pages.insert(
            title.to_string(),
            FetchOutcome::Found(ArticleContent {
                title: title.to_string(),
                content: content.to_string(),
            }),
        );
        self
    }

    #[must_use]
    pub fn with_redirect(mut self, from: &str, to: &str, content: &str) -> Self {
        self.pages.insert(
            from.to_string(),
            FetchOutcome::Found(ArticleContent {
                title: to.to_string(),
                content: content.to_string(),
            }),
        );
        self
    }

    #[must_use]
    pub fn with_ambiguous(mut self, title: &str, options: &[&str]) -> Self {
        self.pages.insert(
            title.to_string(),
            FetchOutcome::Ambiguous(options.iter().map(|o| (*o).to_string()).collect()),
        );
        self
    }

    pub fn fetch_log(&self) -> Vec<String> {
        self.fetched.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn search_log(&self) -> Vec<String> {
        self.searched.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ArticleSource for FakeSource {
    async fn search(&self, phrase: &str) -> anyhow::Result<Vec<String>> {
        if let Ok(mut log) = self.searched.lock() {
            log.push(phrase.to_string());
        }
        if self.fail_search {
            anyhow::bail!("connection refused");
        }
        Ok(self.searches.get(phrase).cloned().unwrap_or_default())
    }

    async fn fetch(&self, title: &str) -> anyhow::Result<FetchOutcome> {
        if let Ok(mut log) = self.fetched.lock() {
            log.push(title.to_string());
        }
        Ok(self
            .pages
            .get(title)
            .cloned()
            .unwrap_or(FetchOutcome::NotFound))
    }
}
