use tracing::debug;

use crate::AnswerModel;
use crate::error::{QueryError, Result};

/// Thin wrapper over an [`AnswerModel`] that maps its failures to
/// [`QueryError::ExtractionFailure`].
pub struct AnswerExtractor<'a, M: ?Sized> {
    model: &'a M,
}

impl<'a, M: AnswerModel + ?Sized> AnswerExtractor<'a, M> {
    pub const fn new(model: &'a M) -> Self {
        Self { model }
    }

    /// The model's answer as returned. A blank answer counts as no answer.
    pub async fn extract(&self, question: &str, context: &str) -> Result<String> {
        debug!("Extracting answer from {} chars of context", context.len());
        let answer = self
            .model
            .answer(question, context)
            .await
            .map_err(QueryError::ExtractionFailure)?;

        if answer.trim().is_empty() {
            return Err(QueryError::ExtractionFailure(anyhow::anyhow!(
                "model returned an empty answer"
            )));
        }
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Fixed(anyhow::Result<&'static str>);

    #[async_trait]
    impl AnswerModel for Fixed {
        async fn answer(&self, _question: &str, _context: &str) -> anyhow::Result<String> {
            match &self.0 {
                Ok(text) => Ok((*text).to_string()),
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }
    }

    #[tokio::test]
    async fn passes_answer_through_untouched() {
        let model = Fixed(Ok(" William Shakespeare"));
        let answer = AnswerExtractor::new(&model).extract("q", "c").await;
        assert_eq!(answer.ok().as_deref(), Some(" William Shakespeare"));
    }

    #[tokio::test]
    async fn model_error_is_extraction_failure() {
        let model = Fixed(Err(anyhow::anyhow!("model unavailable")));
        let result = AnswerExtractor::new(&model).extract("q", "c").await;
        assert!(matches!(result, Err(QueryError::ExtractionFailure(_))));
    }

    #[tokio::test]
    async fn blank_answer_is_extraction_failure() {
        let model = Fixed(Ok("  "));
        let result = AnswerExtractor::new(&model).extract("q", "c").await;
        assert!(matches!(result, Err(QueryError::ExtractionFailure(_))));
    }
}
