use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::QuizPayload,
};

/// Required fields per quiz tag; the bool marks fields that must be arrays
const MOOD_FIELDS: &[(&str, bool)] = &[
    ("currentMood", false),
    ("desiredFeeling", false),
    ("intensity", false),
    ("preferredGenres", true),
];

const LIKES_FIELDS: &[(&str, bool)] = &[
    ("favoriteMovies", true),
    ("favoriteGenres", true),
    ("favoriteActors", true),
    ("dealbreakers", true),
];

/// Validates an arbitrary decoded body into a typed quiz payload
///
/// Pure function, no I/O. Strict about presence and shape (arrays must be
/// arrays), deliberately permissive about field content: no enum-value
/// checking, unknown extra fields are ignored.
pub fn validate_quiz(body: &Value) -> AppResult<QuizPayload> {
    let obj = body
        .as_object()
        .ok_or_else(|| AppError::InvalidQuizData("request body must be a JSON object".to_string()))?;

    let quiz_type = obj
        .get("quizType")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::InvalidQuizData("missing or non-string 'quizType'".to_string()))?;

    let required = match quiz_type {
        "mood" => MOOD_FIELDS,
        "likes" => LIKES_FIELDS,
        other => {
            return Err(AppError::InvalidQuizData(format!(
                "unrecognized quizType '{}', expected 'mood' or 'likes'",
                other
            )))
        }
    };

    for (field, must_be_array) in required {
        match obj.get(*field) {
            None | Some(Value::Null) => {
                return Err(AppError::InvalidQuizData(format!(
                    "missing required field '{}' for quizType '{}'",
                    field, quiz_type
                )))
            }
            Some(value) if *must_be_array && !value.is_array() => {
                return Err(AppError::InvalidQuizData(format!(
                    "field '{}' must be an array",
                    field
                )))
            }
            Some(_) => {}
        }
    }

    serde_json::from_value(body.clone())
        .map_err(|e| AppError::InvalidQuizData(format!("malformed quiz payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuizPayload;
    use serde_json::json;

    fn valid_mood_body() -> Value {
        json!({
            "quizType": "mood",
            "currentMood": "melancholy",
            "desiredFeeling": "uplifted",
            "intensity": "medium",
            "preferredGenres": ["drama", "comedy"]
        })
    }

    fn valid_likes_body() -> Value {
        json!({
            "quizType": "likes",
            "favoriteMovies": ["Heat", "Collateral"],
            "favoriteGenres": ["crime", "thriller"],
            "favoriteActors": ["Al Pacino"],
            "dealbreakers": ["horror"]
        })
    }

    #[test]
    fn test_valid_mood_payload() {
        let payload = validate_quiz(&valid_mood_body()).unwrap();
        assert!(matches!(payload, QuizPayload::Mood(_)));
    }

    #[test]
    fn test_valid_likes_payload() {
        let payload = validate_quiz(&valid_likes_body()).unwrap();
        assert!(matches!(payload, QuizPayload::Likes(_)));
    }

    #[test]
    fn test_body_must_be_object() {
        let err = validate_quiz(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.code(), "INVALID_QUIZ_DATA");
    }

    #[test]
    fn test_missing_quiz_type_rejected() {
        let mut body = valid_mood_body();
        body.as_object_mut().unwrap().remove("quizType");
        let err = validate_quiz(&body).unwrap_err();
        assert!(err.to_string().contains("quizType"));
    }

    #[test]
    fn test_unknown_quiz_type_rejected() {
        let mut body = valid_mood_body();
        body["quizType"] = json!("vibes");
        let err = validate_quiz(&body).unwrap_err();
        assert!(err.to_string().contains("vibes"));
    }

    #[test]
    fn test_mood_missing_intensity_rejected() {
        let mut body = valid_mood_body();
        body.as_object_mut().unwrap().remove("intensity");
        let err = validate_quiz(&body).unwrap_err();
        assert_eq!(err.code(), "INVALID_QUIZ_DATA");
        assert!(err.to_string().contains("intensity"));
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let mut body = valid_mood_body();
        body["desiredFeeling"] = Value::Null;
        let err = validate_quiz(&body).unwrap_err();
        assert!(err.to_string().contains("desiredFeeling"));
    }

    #[test]
    fn test_likes_non_array_genres_rejected() {
        let mut body = valid_likes_body();
        body["favoriteGenres"] = json!("crime");
        let err = validate_quiz(&body).unwrap_err();
        assert!(err.to_string().contains("favoriteGenres"));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_mood_non_array_genres_rejected() {
        let mut body = valid_mood_body();
        body["preferredGenres"] = json!({"first": "drama"});
        let err = validate_quiz(&body).unwrap_err();
        assert!(err.to_string().contains("preferredGenres"));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut body = valid_mood_body();
        body["sessionId"] = json!("abc-123");
        assert!(validate_quiz(&body).is_ok());
    }

    #[test]
    fn test_content_is_not_enum_checked() {
        // Shape-strict, content-permissive: arbitrary strings pass.
        let mut body = valid_mood_body();
        body["intensity"] = json!("turbo-maximum");
        assert!(validate_quiz(&body).is_ok());
    }
}
