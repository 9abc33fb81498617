use axum::{extract::State, Extension, Json};
use serde_json::Value;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::RecommendationEnvelope,
    routes::AppState,
    services::recommendation,
};

/// Handler for the recommendation endpoint
///
/// Accepts the raw JSON body so the validator (not the extractor) decides
/// whether the payload shape is acceptable and reports the descriptive
/// 400 envelope.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<Value>,
) -> AppResult<Json<RecommendationEnvelope>> {
    tracing::info!(
        request_id = %request_id,
        "Processing recommendation request"
    );

    let envelope = recommendation::recommend(state.ai.clone(), state.metadata.clone(), &body).await?;

    tracing::info!(
        request_id = %request_id,
        tmdb_id = envelope.recommendation.tmdb_id,
        processing_time_ms = envelope.metadata.processing_time,
        "Recommendation completed"
    );

    Ok(Json(envelope))
}
