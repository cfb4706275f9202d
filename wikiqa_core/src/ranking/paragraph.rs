use rayon::prelude::*;
use tracing::debug;

use super::RankingTable;
use crate::LexicalAnalyzer;
use crate::lexical::{KeywordSet, lemmatized_tokens};

/// Score of one paragraph given its lemmatized tokens.
///
/// Formula: `distinct_keywords_present + total_keyword_occurrences * frequency_weight`
///
/// With a small weight the integer coverage term decides the order and the
/// frequency term only separates paragraphs of equal coverage.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn paragraph_score(tokens: &[String], keywords: &KeywordSet, frequency_weight: f64) -> f64 {
    let count = |lemma: &str| tokens.iter().filter(|t| t.as_str() == lemma).count();

    let occurrences: usize = keywords.iter().map(|k| count(&k.lemma)).sum();
    let coverage = keywords
        .distinct_lemmas()
        .into_iter()
        .filter(|lemma| count(lemma) > 0)
        .count();

    (occurrences as f64).mul_add(frequency_weight, coverage as f64)
}

/// Ranks the paragraphs of one article against the question keywords.
pub struct ParagraphRanker<'a, L: ?Sized> {
    analyzer: &'a L,
    frequency_weight: f64,
}

impl<'a, L: LexicalAnalyzer + ?Sized> ParagraphRanker<'a, L> {
    pub const fn new(analyzer: &'a L, frequency_weight: f64) -> Self {
        Self {
            analyzer,
            frequency_weight,
        }
    }

    /// Score every line of `raw`. Identical lines share one entry at the
    /// position of their first occurrence; empty lines are scored like any other.
    #[must_use]
    pub fn rank(&self, raw: &str, keywords: &KeywordSet) -> RankingTable<String> {
        let paragraphs: Vec<&str> = raw.split('\n').collect();
        let scores: Vec<f64> = paragraphs
            .par_iter()
            .map(|paragraph| {
                let tokens = lemmatized_tokens(self.analyzer, paragraph);
                paragraph_score(&tokens, keywords, self.frequency_weight)
            })
            .collect();

        paragraphs
            .into_iter()
            .map(str::to_string)
            .zip(scores)
            .collect()
    }

    /// The `n` best paragraphs joined with newlines, best first.
    #[must_use]
    pub fn top_paragraphs(&self, raw: &str, keywords: &KeywordSet, n: usize) -> String {
        let table = self.rank(raw, keywords);
        let ranked = table.ranked();
        for (paragraph, score) in ranked.iter().take(n) {
            debug!(
                "Paragraph score {score:.4}: {}",
                paragraph.chars().take(80).collect::<String>()
            );
        }
        ranked
            .into_iter()
            .take(n)
            .map(|(paragraph, _)| paragraph.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
