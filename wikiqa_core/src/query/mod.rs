//! The per-question pipeline: keywords, candidate articles, top article, top
//! paragraphs, answer.

use serde::{Deserialize, Serialize};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::answer::AnswerExtractor;
use crate::error::{QueryError, Result};
use crate::lexical::{KeywordSet, normalize};
use crate::ranking::{ArticleRanker, ParagraphRanker};
use crate::retrieval::{ArticleRecord, candidate_titles};
use crate::{AnswerModel, ArticleSource, LexicalAnalyzer};

/// Tunables of the ranking pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Paragraphs of the top article passed to the answer model
    #[serde(default = "PipelineConfig::default_top_paragraphs")]
    pub top_paragraphs: usize,
    /// Multiplier for proper-noun occurrences in article scores
    #[serde(default = "PipelineConfig::default_proper_noun_weight")]
    pub proper_noun_weight: u32,
    /// Weight of raw keyword occurrences in paragraph scores
    #[serde(default = "PipelineConfig::default_frequency_weight")]
    pub frequency_weight: f64,
    /// Fail fast with `NoRelevantArticle` when the question has no noun
    #[serde(default = "PipelineConfig::default_require_nouns")]
    pub require_nouns: bool,
}

impl PipelineConfig {
    const fn default_top_paragraphs() -> usize {
        3
    }

    const fn default_proper_noun_weight() -> u32 {
        2
    }

    const fn default_frequency_weight() -> f64 {
        0.0001
    }

    const fn default_require_nouns() -> bool {
        true
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_paragraphs: Self::default_top_paragraphs(),
            proper_noun_weight: Self::default_proper_noun_weight(),
            frequency_weight: Self::default_frequency_weight(),
            require_nouns: Self::default_require_nouns(),
        }
    }
}

/// Pipeline progress. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QueryStage {
    Received,
    KeywordsExtracted,
    ArticlesIdentified,
    ArticleRanked,
    ParagraphsRanked,
    AnswerExtracted,
}

impl QueryStage {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::KeywordsExtracted => "keywords_extracted",
            Self::ArticlesIdentified => "articles_identified",
            Self::ArticleRanked => "article_ranked",
            Self::ParagraphsRanked => "paragraphs_ranked",
            Self::AnswerExtracted => "answer_extracted",
        }
    }
}

/// Result of a completed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    /// Title of the article the answer was taken from
    pub article: String,
    /// Context handed to the answer model
    pub context: String,
}

/// One question and everything derived from it.
///
/// After [`Query::run`] returns, [`Query::stage`] is the last stage the query
/// completed, which is where a failed query stopped. Running again starts over.
pub struct Query<'a, L: ?Sized, S: ?Sized, M: ?Sized> {
    question: String,
    analyzer: &'a L,
    source: &'a S,
    model: &'a M,
    config: PipelineConfig,
    stage: QueryStage,
    keywords: KeywordSet,
    articles: Vec<ArticleRecord>,
    top_article: usize,
    context: String,
}

impl<'a, L, S, M> Query<'a, L, S, M>
where
    L: LexicalAnalyzer + ?Sized,
    S: ArticleSource + ?Sized,
    M: AnswerModel + ?Sized,
{
    pub fn new(question: impl Into<String>, analyzer: &'a L, source: &'a S, model: &'a M) -> Self {
        Self {
            question: question.into(),
            analyzer,
            source,
            model,
            config: PipelineConfig::default(),
            stage: QueryStage::Received,
            keywords: KeywordSet::default(),
            articles: Vec::new(),
            top_article: 0,
            context: String::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn stage(&self) -> QueryStage {
        self.stage
    }

    /// Run every stage in order. The first failing stage aborts the query.
    pub async fn run(&mut self) -> Result<Answer> {
        let span = info_span!("query", id = %Uuid::now_v7());
        async move {
            self.reset();
            info!("Question: {}", self.question);
            let result = self.run_stages().await;
            if let Err(e) = &result {
                warn!("Query stopped after {}: {e}", self.stage.as_str());
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_stages(&mut self) -> Result<Answer> {
        self.extract_keywords()?;
        self.identify_articles().await?;
        self.rank_articles()?;
        self.rank_paragraphs();
        self.extract_answer().await
    }

    fn reset(&mut self) {
        self.stage = QueryStage::Received;
        self.keywords = KeywordSet::default();
        self.articles.clear();
        self.top_article = 0;
        self.context.clear();
    }

    fn advance(&mut self, next: QueryStage) {
        debug_assert!(next > self.stage, "query stages only move forward");
        debug!("{} -> {}", self.stage.as_str(), next.as_str());
        self.stage = next;
    }

    fn extract_keywords(&mut self) -> Result<()> {
        self.keywords = normalize(self.analyzer, &self.question);
        info!(
            "Keywords: {:?}",
            self.keywords
                .iter()
                .map(|k| format!(
                    "{}/{}",
                    k.lemma,
                    k.tag.as_ref().map_or("?", |t| t.as_str())
                ))
                .collect::<Vec<_>>()
        );
        self.advance(QueryStage::KeywordsExtracted);

        if self.config.require_nouns && !self.keywords.has_nouns() {
            info!("Question has no nouns, nothing to search for");
            return Err(QueryError::NoRelevantArticle);
        }
        Ok(())
    }

    async fn identify_articles(&mut self) -> Result<()> {
        let titles = candidate_titles(self.source, &self.keywords, &self.question).await?;
        info!("{} candidate titles", titles.len());

        let ranker = self.article_ranker();
        self.articles = ranker.admit(&self.keywords, &titles).await?;
        info!("{} articles contain every question noun", self.articles.len());
        self.advance(QueryStage::ArticlesIdentified);
        Ok(())
    }

    fn rank_articles(&mut self) -> Result<()> {
        let ranker = self.article_ranker();
        let top = ranker.select(&self.articles, &self.keywords)?;
        self.top_article = self
            .articles
            .iter()
            .position(|record| record.title == top.title)
            .ok_or(QueryError::NoRelevantArticle)?;
        self.advance(QueryStage::ArticleRanked);
        Ok(())
    }

    fn rank_paragraphs(&mut self) {
        let ranker = ParagraphRanker::new(self.analyzer, self.config.frequency_weight);
        self.context = ranker.top_paragraphs(
            &self.articles[self.top_article].raw,
            &self.keywords,
            self.config.top_paragraphs,
        );
        self.advance(QueryStage::ParagraphsRanked);
    }

    async fn extract_answer(&mut self) -> Result<Answer> {
        let text = AnswerExtractor::new(self.model)
            .extract(&self.question, &self.context)
            .await?;
        self.advance(QueryStage::AnswerExtracted);
        info!("Answer: {text}");

        Ok(Answer {
            text,
            article: self.articles[self.top_article].title.clone(),
            context: std::mem::take(&mut self.context),
        })
    }

    const fn article_ranker(&self) -> ArticleRanker<'a, S, L> {
        ArticleRanker::new(self.source, self.analyzer, self.config.proper_noun_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeSource, PlainAnalyzer};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoModel {
        contexts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AnswerModel for EchoModel {
        async fn answer(&self, _question: &str, context: &str) -> anyhow::Result<String> {
            if let Ok(mut log) = self.contexts.lock() {
                log.push(context.to_string());
            }
            Ok(context.split_whitespace().next().unwrap_or_default().to_string())
        }
    }

    #[test]
    fn stages_are_ordered() {
        assert!(QueryStage::Received < QueryStage::KeywordsExtracted);
        assert!(QueryStage::ParagraphsRanked < QueryStage::AnswerExtracted);
    }

    #[test]
    fn default_config_matches_documented_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.top_paragraphs, 3);
        assert_eq!(config.proper_noun_weight, 2);
        assert!((config.frequency_weight - 0.0001).abs() < f64::EPSILON);
        assert!(config.require_nouns);
    }

    #[test]
    fn new_query_starts_received() {
        let source = FakeSource::default();
        let model = EchoModel::default();
        let query = Query::new("Who built Rome?", &PlainAnalyzer, &source, &model);
        assert_eq!(query.stage(), QueryStage::Received);
    }

    #[tokio::test]
    async fn answers_from_best_article() {
        let source = FakeSource::default()
            .with_search("Rome", &["Rome", "Ancient Rome"])
            .with_search("Who built Rome?", &["Romulus"])
            .with_page("Rome", "Rome is a city.\nRome is the capital of Italy.")
            .with_page(
                "Ancient Rome",
                "Romulus founded Rome.\nRome grew.\nRome fell.\nOther text.",
            )
            .with_page("Romulus", "Romulus was a king.");
        let model = EchoModel::default();

        let result = Query::new("Who built Rome?", &PlainAnalyzer, &source, &model)
            .run()
            .await;
        let Ok(answer) = result else {
            panic!("query should succeed");
        };
        assert_eq!(answer.article, "Ancient Rome");
        assert_eq!(answer.context, "Romulus founded Rome.\nRome grew.\nRome fell.");
        assert_eq!(answer.text, "Romulus");
    }

    #[tokio::test]
    async fn question_without_nouns_skips_search() {
        let source = FakeSource::default();
        let model = EchoModel::default();
        let result = Query::new("who is the", &PlainAnalyzer, &source, &model)
            .run()
            .await;
        assert!(matches!(result, Err(QueryError::NoRelevantArticle)));
        assert!(source.search_log().is_empty());
    }

    #[tokio::test]
    async fn question_without_nouns_searches_when_allowed() {
        let source = FakeSource::default()
            .with_search("wrote", &["Writing"])
            .with_page("Writing", "Writing is a medium.");
        let model = EchoModel::default();
        let config = PipelineConfig {
            require_nouns: false,
            ..PipelineConfig::default()
        };
        let result = Query::new("wrote", &PlainAnalyzer, &source, &model)
            .with_config(config)
            .run()
            .await;
        let Ok(answer) = result else {
            panic!("query should succeed");
        };
        assert_eq!(answer.article, "Writing");
        assert_eq!(source.search_log(), ["wrote"]);
    }

    #[tokio::test]
    async fn retrieval_error_aborts_before_extraction() {
        let source = FakeSource {
            fail_search: true,
            ..FakeSource::default()
        };
        let model = EchoModel::default();
        let result = Query::new("Where is Rome?", &PlainAnalyzer, &source, &model)
            .run()
            .await;
        assert!(matches!(result, Err(QueryError::RetrievalFailure(_))));
        assert!(model.contexts.lock().map(|c| c.is_empty()).unwrap_or(false));
    }

    #[tokio::test]
    async fn stage_shows_where_a_query_stopped() {
        let source = FakeSource::default()
            .with_search("Rome", &["Rome"])
            .with_page("Rome", "Rome is a city.");
        let model = EchoModel::default();

        let mut no_nouns = Query::new("who is the", &PlainAnalyzer, &source, &model);
        assert!(no_nouns.run().await.is_err());
        assert_eq!(no_nouns.stage(), QueryStage::KeywordsExtracted);

        let mut no_article = Query::new("Where is Carthage?", &PlainAnalyzer, &source, &model);
        assert!(matches!(
            no_article.run().await,
            Err(QueryError::NoRelevantArticle)
        ));
        assert_eq!(no_article.stage(), QueryStage::ArticlesIdentified);

        let mut answered = Query::new("Where is Rome?", &PlainAnalyzer, &source, &model);
        assert!(answered.run().await.is_ok());
        assert_eq!(answered.stage(), QueryStage::AnswerExtracted);
    }

    #[tokio::test]
    async fn running_again_starts_over() {
        let source = FakeSource::default()
            .with_search("Rome", &["Rome"])
            .with_page("Rome", "Rome is a city.");
        let model = EchoModel::default();
        let mut query = Query::new("Where is Rome?", &PlainAnalyzer, &source, &model);

        let first = query.run().await.ok();
        let second = query.run().await.ok();
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(source.search_log(), ["Rome", "Where is Rome?", "Rome", "Where is Rome?"]);
    }
}
