use async_trait::async_trait;
use thiserror::Error;

use super::prompt::RecommendationPrompt;

/// Failure of the external text-generation service.
///
/// Never surfaced to callers of [`super::Recommender`]; it only decides that
/// the rule-based text is used instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("configuration error: {0}")]
    Config(String),

    #[cfg(feature = "llm")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider API error: status={status}, body={body}")]
    Api { status: u16, body: String },

    #[error("provider returned invalid response: {0}")]
    InvalidResponse(String),

    #[error("provider timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// External collaborator that turns a prompt into narrative text.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Short provider name used in log events.
    fn name(&self) -> &'static str;

    /// Sends `prompt` and returns the generated text.
    ///
    /// Implementations make a single attempt; retries and time bounds are
    /// the caller's concern.
    async fn complete(&self, prompt: &RecommendationPrompt) -> Result<String, ProviderError>;
}
