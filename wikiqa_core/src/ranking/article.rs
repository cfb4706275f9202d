use std::collections::HashSet;

use tracing::{debug, info};

use super::RankingTable;
use crate::error::{QueryError, Result};
use crate::lexical::KeywordSet;
use crate::retrieval::{ArticleRecord, resolve};
use crate::{ArticleSource, LexicalAnalyzer};

/// Whether every noun keyword occurs as a substring of `raw`.
#[must_use]
pub fn contains_all_nouns(raw: &str, keywords: &KeywordSet) -> bool {
    keywords.nouns().all(|noun| raw.contains(noun.lemma.as_str()))
}

/// Word tokens of an article, tokenized paragraph by paragraph so no token
/// spans a line break.
pub fn tokenize_article<L: LexicalAnalyzer + ?Sized>(analyzer: &L, raw: &str) -> Vec<String> {
    raw.split('\n')
        .flat_map(|paragraph| analyzer.tokenize(paragraph))
        .collect()
}

/// Admits candidate articles that mention every question noun and picks the
/// one with the highest weighted keyword frequency.
pub struct ArticleRanker<'a, S: ?Sized, L: ?Sized> {
    source: &'a S,
    analyzer: &'a L,
    proper_noun_weight: u32,
}

impl<'a, S, L> ArticleRanker<'a, S, L>
where
    S: ArticleSource + ?Sized,
    L: LexicalAnalyzer + ?Sized,
{
    pub const fn new(source: &'a S, analyzer: &'a L, proper_noun_weight: u32) -> Self {
        Self {
            source,
            analyzer,
            proper_noun_weight,
        }
    }

    /// Resolve each title and keep the articles containing every noun, in
    /// candidate order. Titles are skipped when already requested or when they
    /// resolve to an article already seen.
    pub async fn admit(
        &self,
        keywords: &KeywordSet,
        titles: &[String],
    ) -> Result<Vec<ArticleRecord>> {
        let mut requested = HashSet::new();
        let mut resolved = HashSet::new();
        let mut records = Vec::new();

        for title in titles {
            if !requested.insert(title.as_str()) {
                continue;
            }
            let Some(article) = resolve(self.source, title).await? else {
                continue;
            };
            if !resolved.insert(article.title.clone()) {
                debug!("{title:?} resolved to already seen {:?}", article.title);
                continue;
            }
            if !contains_all_nouns(&article.content, keywords) {
                debug!("Rejected {:?}: missing a question noun", article.title);
                continue;
            }

            let tokens = tokenize_article(self.analyzer, &article.content);
            debug!("Admitted {:?} ({} tokens)", article.title, tokens.len());
            records.push(ArticleRecord {
                title: article.title,
                raw: article.content,
                tokens,
            });
        }

        Ok(records)
    }

    /// Sum over keywords of exact token matches, proper nouns multiplied by
    /// the configured weight.
    #[must_use]
    pub fn score(&self, record: &ArticleRecord, keywords: &KeywordSet) -> usize {
        keywords
            .iter()
            .map(|keyword| {
                let freq = record
                    .tokens
                    .iter()
                    .filter(|token| **token == keyword.lemma)
                    .count();
                if keyword.is_proper_noun() {
                    freq * self.proper_noun_weight as usize
                } else {
                    freq
                }
            })
            .sum()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rank(&self, records: &[ArticleRecord], keywords: &KeywordSet) -> RankingTable<String> {
        records
            .iter()
            .map(|record| (record.title.clone(), self.score(record, keywords) as f64))
            .collect()
    }

    /// The highest ranked record; the earliest admitted wins a tie.
    pub fn select<'r>(
        &self,
        records: &'r [ArticleRecord],
        keywords: &KeywordSet,
    ) -> Result<&'r ArticleRecord> {
        let table = self.rank(records, keywords);
        for (title, score) in table.ranked().iter().take(5) {
            debug!("Article rank {score}: {title}");
        }
        let top = table.top().ok_or(QueryError::NoRelevantArticle)?;
        info!("Top article: {top}");
        records
            .iter()
            .find(|record| &record.title == top)
            .ok_or(QueryError::NoRelevantArticle)
    }
}
