//! Candidate gathering and title resolution on top of an [`ArticleSource`].

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{QueryError, Result};
use crate::lexical::KeywordSet;
use crate::{ArticleContent, ArticleSource, FetchOutcome};

/// An admitted article: its raw text and the word tokens of that text.
///
/// The raw text answers substring containment, the tokens answer exact
/// frequency counts. Both are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub title: String,
    pub raw: String,
    pub tokens: Vec<String>,
}

/// Titles from one search per noun followed by one search for the whole
/// question, with repeats removed.
///
/// A noun that occurs more than once in the question is searched once.
pub async fn candidate_titles<S: ArticleSource + ?Sized>(
    source: &S,
    keywords: &KeywordSet,
    question: &str,
) -> Result<Vec<String>> {
    let mut phrases: Vec<&str> = keywords.distinct_nouns();
    phrases.push(question);

    let mut seen = HashSet::new();
    let mut titles = Vec::new();
    for phrase in phrases {
        let found = source
            .search(phrase)
            .await
            .map_err(QueryError::RetrievalFailure)?;
        debug!("Search {phrase:?} returned {} titles", found.len());
        for title in found {
            if seen.insert(title.clone()) {
                titles.push(title);
            }
        }
    }
    Ok(titles)
}

/// Fetch `title`, following the first option of a disambiguation page once.
///
/// Missing pages, empty option lists and a second disambiguation all yield
/// `None`. Service errors propagate.
pub async fn resolve<S: ArticleSource + ?Sized>(
    source: &S,
    title: &str,
) -> Result<Option<ArticleContent>> {
    match fetch(source, title).await? {
        FetchOutcome::Found(article) => Ok(Some(article)),
        FetchOutcome::NotFound => {
            debug!("Skipping missing page {title:?}");
            Ok(None)
        }
        FetchOutcome::Ambiguous(options) => {
            let Some(first) = options.first() else {
                warn!("Disambiguation page {title:?} lists no options");
                return Ok(None);
            };
            debug!("{title:?} is ambiguous, following {first:?}");
            match fetch(source, first).await? {
                FetchOutcome::Found(article) => Ok(Some(article)),
                FetchOutcome::NotFound => Ok(None),
                FetchOutcome::Ambiguous(_) => {
                    warn!("{first:?} is ambiguous as well, skipping {title:?}");
                    Ok(None)
                }
            }
        }
    }
}

async fn fetch<S: ArticleSource + ?Sized>(source: &S, title: &str) -> Result<FetchOutcome> {
    source
        .fetch(title)
        .await
        .map_err(QueryError::RetrievalFailure)
}
