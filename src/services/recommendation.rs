use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::Value;

use crate::{
    error::AppResult,
    models::{Recommendation, RecommendationEnvelope, ResponseMetadata},
    services::{
        providers::{MetadataProvider, SuggestionProvider},
        validation,
    },
};

/// Drives the full recommendation sequence for one request
///
/// validate quiz input → ask the AI provider for one movie → resolve and
/// enrich it through the metadata provider → merge into the success
/// envelope. Each stage boundary emits a structured log line; each failure
/// carries its own typed error so the handler never inspects message text.
pub async fn recommend(
    ai: Arc<dyn SuggestionProvider>,
    metadata: Arc<dyn MetadataProvider>,
    body: &Value,
) -> AppResult<RecommendationEnvelope> {
    let started = Instant::now();

    let quiz = validation::validate_quiz(body)?;
    tracing::info!(quiz_type = quiz.quiz_type(), "Quiz payload validated");

    let suggestion = ai.suggest(&quiz).await?;
    tracing::info!(
        title = %suggestion.title,
        year = ?suggestion.year,
        confidence = suggestion.confidence,
        "AI suggestion received"
    );

    let record = metadata.enrich(&suggestion).await?;
    tracing::info!(
        tmdb_id = record.tmdb_id,
        title = %record.title,
        "Canonical record resolved"
    );

    let quiz_type = quiz.quiz_type().to_string();
    let ai_model = ai.model_name().to_string();
    let recommendation = Recommendation::from_parts(suggestion, record);

    Ok(RecommendationEnvelope {
        success: true,
        recommendation,
        metadata: ResponseMetadata {
            quiz_type,
            processing_time: started.elapsed().as_millis() as u64,
            ai_model,
            timestamp: Utc::now(),
        },
    })
}
