use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Quiz payload
// ============================================================================

/// Tagged quiz payload, one variant per quiz flow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "quizType", rename_all = "lowercase")]
pub enum QuizPayload {
    Mood(MoodQuiz),
    Likes(LikesQuiz),
}

impl QuizPayload {
    /// Tag string reported in response metadata
    pub fn quiz_type(&self) -> &'static str {
        match self {
            QuizPayload::Mood(_) => "mood",
            QuizPayload::Likes(_) => "likes",
        }
    }
}

/// Mood-based quiz answers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodQuiz {
    pub current_mood: String,
    pub desired_feeling: String,
    pub intensity: String,
    pub preferred_genres: Vec<String>,
}

/// Preference-based quiz answers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LikesQuiz {
    pub favorite_movies: Vec<String>,
    pub favorite_genres: Vec<String>,
    pub favorite_actors: Vec<String>,
    pub dealbreakers: Vec<String>,
}

// ============================================================================
// AI suggestion
// ============================================================================

/// The model's single proposed movie plus rationale
///
/// Produced by the AI client from the raw model reply; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiSuggestion {
    pub title: String,
    pub year: Option<i32>,
    pub explanation: String,
    pub match_reasons: Vec<String>,
    /// Always within [0, 1]
    pub confidence: f64,
}

// ============================================================================
// Canonical movie record
// ============================================================================

/// TMDB's authoritative record for a resolved title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub tmdb_id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub release_date: Option<String>,
    pub genres: Vec<String>,
    /// Rounded to one decimal
    pub rating: f64,
    pub vote_count: u64,
    pub runtime: Option<u32>,
    pub cast: Vec<CastMember>,
    pub imdb_id: Option<String>,
}

/// One of the top-billed cast entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub profile_url: Option<String>,
}

// ============================================================================
// Final recommendation
// ============================================================================

/// External watch links derived from the canonical record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchLinks {
    pub tmdb: String,
    pub imdb: Option<String>,
}

/// The merged recommendation returned to the caller
///
/// Factual fields come from the TMDB record, explanatory fields from the AI
/// suggestion. Created per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub tmdb_id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub release_date: Option<String>,
    pub genres: Vec<String>,
    pub rating: f64,
    pub vote_count: u64,
    pub runtime: Option<u32>,
    pub cast: Vec<CastMember>,
    pub explanation: String,
    pub match_reasons: Vec<String>,
    pub confidence: f64,
    pub watch_links: WatchLinks,
}

impl Recommendation {
    /// Merge the AI suggestion's explanatory fields with the canonical record
    pub fn from_parts(suggestion: AiSuggestion, record: MovieRecord) -> Self {
        let watch_links = WatchLinks {
            tmdb: format!("https://www.themoviedb.org/movie/{}", record.tmdb_id),
            imdb: record
                .imdb_id
                .as_deref()
                .map(|id| format!("https://www.imdb.com/title/{}", id)),
        };

        Self {
            tmdb_id: record.tmdb_id,
            title: record.title,
            overview: record.overview,
            poster_url: record.poster_url,
            backdrop_url: record.backdrop_url,
            release_date: record.release_date,
            genres: record.genres,
            rating: record.rating,
            vote_count: record.vote_count,
            runtime: record.runtime,
            cast: record.cast,
            explanation: suggestion.explanation,
            match_reasons: suggestion.match_reasons,
            confidence: suggestion.confidence,
            watch_links,
        }
    }
}

/// Success envelope for the recommendation endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationEnvelope {
    pub success: bool,
    pub recommendation: Recommendation,
    pub metadata: ResponseMetadata,
}

/// Diagnostic metadata attached to every success envelope
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub quiz_type: String,
    /// Wall-clock processing time in milliseconds
    pub processing_time: u64,
    pub ai_model: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /search/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    pub results: Vec<TmdbSearchResult>,
}

/// One entry in a TMDB search result page
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResult {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    pub name: String,
}

/// Response from GET /movie/{id}/credits
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastCredit>,
}

/// One cast credit, in billing order
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastCredit {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> MovieRecord {
        MovieRecord {
            tmdb_id: 27205,
            title: "Inception".to_string(),
            overview: Some("A thief who steals corporate secrets".to_string()),
            poster_url: Some("https://image.tmdb.org/t/p/w500/poster.jpg".to_string()),
            backdrop_url: None,
            release_date: Some("2010-07-16".to_string()),
            genres: vec!["Action".to_string(), "Science Fiction".to_string()],
            rating: 8.4,
            vote_count: 34000,
            runtime: Some(148),
            cast: vec![CastMember {
                name: "Leonardo DiCaprio".to_string(),
                character: Some("Dom Cobb".to_string()),
                profile_url: None,
            }],
            imdb_id: Some("tt1375666".to_string()),
        }
    }

    fn sample_suggestion() -> AiSuggestion {
        AiSuggestion {
            title: "Inception".to_string(),
            year: Some(2010),
            explanation: "A mind-bending heist".to_string(),
            match_reasons: vec![
                "High intensity".to_string(),
                "Sci-fi preference".to_string(),
                "Critically acclaimed".to_string(),
            ],
            confidence: 0.92,
        }
    }

    #[test]
    fn test_quiz_payload_mood_deserializes_from_tag() {
        let body = json!({
            "quizType": "mood",
            "currentMood": "stressed",
            "desiredFeeling": "relaxed",
            "intensity": "low",
            "preferredGenres": ["comedy"]
        });

        let payload: QuizPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.quiz_type(), "mood");
        match payload {
            QuizPayload::Mood(quiz) => {
                assert_eq!(quiz.current_mood, "stressed");
                assert_eq!(quiz.preferred_genres, vec!["comedy"]);
            }
            _ => panic!("expected mood variant"),
        }
    }

    #[test]
    fn test_quiz_payload_likes_deserializes_from_tag() {
        let body = json!({
            "quizType": "likes",
            "favoriteMovies": ["Heat"],
            "favoriteGenres": ["crime"],
            "favoriteActors": ["Al Pacino"],
            "dealbreakers": []
        });

        let payload: QuizPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.quiz_type(), "likes");
    }

    #[test]
    fn test_recommendation_merges_factual_and_explanatory_fields() {
        let rec = Recommendation::from_parts(sample_suggestion(), sample_record());

        assert_eq!(rec.tmdb_id, 27205);
        assert_eq!(rec.title, "Inception");
        assert_eq!(rec.rating, 8.4);
        assert_eq!(rec.explanation, "A mind-bending heist");
        assert_eq!(rec.match_reasons.len(), 3);
        assert_eq!(rec.confidence, 0.92);
    }

    #[test]
    fn test_watch_links_include_imdb_only_when_present() {
        let rec = Recommendation::from_parts(sample_suggestion(), sample_record());
        assert_eq!(rec.watch_links.tmdb, "https://www.themoviedb.org/movie/27205");
        assert_eq!(
            rec.watch_links.imdb.as_deref(),
            Some("https://www.imdb.com/title/tt1375666")
        );

        let mut record = sample_record();
        record.imdb_id = None;
        let rec = Recommendation::from_parts(sample_suggestion(), record);
        assert_eq!(rec.watch_links.imdb, None);
    }

    #[test]
    fn test_recommendation_serializes_camel_case() {
        let rec = Recommendation::from_parts(sample_suggestion(), sample_record());
        let value = serde_json::to_value(&rec).unwrap();

        assert!(value.get("tmdbId").is_some());
        assert!(value.get("posterUrl").is_some());
        assert!(value.get("matchReasons").is_some());
        assert!(value.get("watchLinks").is_some());
        assert!(value.get("match_reasons").is_none());
    }

    #[test]
    fn test_tmdb_details_deserialization_tolerates_nulls() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "overview": null,
            "poster_path": null,
            "backdrop_path": null,
            "release_date": "2010-07-16",
            "genres": [{"id": 28, "name": "Action"}],
            "vote_average": 8.369,
            "vote_count": 34495,
            "runtime": 148,
            "imdb_id": "tt1375666"
        }"#;

        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.id, 27205);
        assert_eq!(details.overview, None);
        assert_eq!(details.genres[0].name, "Action");
        assert_eq!(details.runtime, Some(148));
    }
}
