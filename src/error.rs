use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
///
/// One variant per failure class so the response code is selected from the
/// variant itself, never by inspecting error message text.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid quiz data: {0}")]
    InvalidQuizData(String),

    #[error("AI service error: {0}")]
    AiApi(String),

    #[error("TMDB API error: {0}")]
    MetadataApi(String),

    #[error("No matching movie found: {0}")]
    MovieNotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code reported in the failure envelope
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidQuizData(_) => "INVALID_QUIZ_DATA",
            AppError::AiApi(_) => "AI_API_ERROR",
            AppError::MetadataApi(_) => "TMDB_API_ERROR",
            AppError::MovieNotFound(_) => "MOVIE_NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidQuizData(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "code": self.code(),
        }));

        (self.status(), body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_quiz_data_maps_to_400() {
        let err = AppError::InvalidQuizData("missing intensity".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_QUIZ_DATA");
    }

    #[test]
    fn test_upstream_errors_map_to_500() {
        assert_eq!(
            AppError::AiApi("rate limited".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::MetadataApi("bad gateway".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::MovieNotFound("Zorblax".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_code_is_distinct_from_metadata_failure() {
        // A metadata error whose message happens to contain "not found" must
        // still report TMDB_API_ERROR; the code comes from the variant.
        let err = AppError::MetadataApi("resource not found upstream".to_string());
        assert_eq!(err.code(), "TMDB_API_ERROR");
        assert_eq!(
            AppError::MovieNotFound("whatever".to_string()).code(),
            "MOVIE_NOT_FOUND"
        );
    }
}
