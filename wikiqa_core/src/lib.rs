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

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod answer;
pub mod error;
pub mod lexical;
pub mod query;
pub mod ranking;
pub mod retrieval;

#[cfg(test)]
pub(crate) mod testing;

pub use answer::AnswerExtractor;
pub use error::{QueryError, Result};
pub use lexical::{Keyword, KeywordSet, normalize};
pub use query::{Answer, PipelineConfig, Query, QueryStage};
pub use ranking::RankingTable;
pub use retrieval::ArticleRecord;

/// A Penn Treebank part-of-speech tag such as `NN`, `NNP` or `VBD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PosTag(String);

impl PosTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Any tag in the `N*` family.
    #[must_use]
    pub fn is_noun(&self) -> bool {
        self.0.starts_with('N')
    }

    /// Singular proper noun only; `NNPS` does not count.
    #[must_use]
    pub fn is_proper_noun(&self) -> bool {
        self.0 == "NNP"
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full text of a resolved article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContent {
    /// Title after redirects, which may differ from the requested one.
    pub title: String,
    pub content: String,
}

/// What the retrieval service returned for a single title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(ArticleContent),
    /// The title names several articles; options are in the order the service lists them.
    Ambiguous(Vec<String>),
    NotFound,
}

/// Tokenizer, lemmatizer, part-of-speech tagger and stopword list for one language.
pub trait LexicalAnalyzer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
    fn lemmatize(&self, word: &str) -> String;
    /// Tags a single word in isolation. `None` when the word cannot be classified.
    fn pos_tag(&self, word: &str) -> Option<PosTag>;
    fn is_stopword(&self, word: &str) -> bool;
}

/// Encyclopedia search and article retrieval.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn search(&self, phrase: &str) -> anyhow::Result<Vec<String>>;
    async fn fetch(&self, title: &str) -> anyhow::Result<FetchOutcome>;
}

/// Extractive question answering over a context passage.
#[async_trait]
pub trait AnswerModel: Send + Sync {
    async fn answer(&self, question: &str, context: &str) -> anyhow::Result<String>;
}
