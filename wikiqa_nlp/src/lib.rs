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

//! Rule-based English lexical analysis: tokenizer, stopwords, noun
//! lemmatizer and an isolated-word part-of-speech tagger.

pub mod lemmatizer;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;

use tracing::trace;
use wikiqa_core::{LexicalAnalyzer, PosTag};

pub use lemmatizer::lemmatize;
pub use stopwords::is_english_stopword;
pub use tagger::tag_word;
pub use tokenizer::word_tokenize;

/// English [`LexicalAnalyzer`] built from the rules in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishAnalyzer;

impl EnglishAnalyzer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LexicalAnalyzer for EnglishAnalyzer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        word_tokenize(text)
    }

    fn lemmatize(&self, word: &str) -> String {
        lemmatize(word)
    }

    fn pos_tag(&self, word: &str) -> Option<PosTag> {
        let tag = tag_word(word);
        if tag.is_none() {
            trace!("No tag for {word:?}");
        }
        tag.map(PosTag::new)
    }

    fn is_stopword(&self, word: &str) -> bool {
        is_english_stopword(word)
    }
}
