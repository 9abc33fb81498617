/// Upstream provider abstractions
///
/// The recommendation flow talks to two external services: a generative-AI
/// model that proposes one movie, and a metadata provider that resolves that
/// proposal to a canonical record. Each sits behind a trait so the handler
/// and orchestrator can be exercised against test doubles.
use crate::{
    error::AppResult,
    models::{AiSuggestion, MovieRecord, QuizPayload},
};

pub mod gemini;
pub mod tmdb;

/// Trait for generative-AI suggestion providers
#[async_trait::async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Propose exactly one movie for a validated quiz payload
    ///
    /// Implementations must mask malformed-but-received model replies with a
    /// fixed fallback suggestion; only transport-level failures (auth
    /// rejected, rate limit, network) surface as errors.
    async fn suggest(&self, quiz: &QuizPayload) -> AppResult<AiSuggestion>;

    /// Model identifier reported in response metadata
    fn model_name(&self) -> &str;
}

/// Trait for movie metadata providers
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Resolve a suggestion to its canonical record and enrich it
    ///
    /// A search that returns zero results must surface as
    /// `AppError::MovieNotFound`, distinguishable from transport failures.
    async fn enrich(&self, suggestion: &AiSuggestion) -> AppResult<MovieRecord>;
}
