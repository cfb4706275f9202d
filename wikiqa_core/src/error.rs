use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

/// Fatal outcomes of a question. `NotFound` and single-level disambiguation are
/// handled during candidate filtering and never surface here.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Retrieval service failure: {0:#}")]
    RetrievalFailure(anyhow::Error),

    #[error("No candidate article contains every noun in the question")]
    NoRelevantArticle,

    #[error("Answer extraction failed: {0:#}")]
    ExtractionFailure(anyhow::Error),
}

impl QueryError {
    /// Message printed to the user in place of an answer.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::RetrievalFailure(_) => "Error handling query, please try another question",
            Self::NoRelevantArticle => "No relevant article found, please try another question",
            Self::ExtractionFailure(_) => "Could not extract an answer, please try another question",
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::RetrievalFailure(_) => 1,
            Self::NoRelevantArticle => 2,
            Self::ExtractionFailure(_) => 3,
        }
    }
}
