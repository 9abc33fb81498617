/// Google Gemini suggestion provider
///
/// Sends one `generateContent` call per request (auth via `key` query
/// parameter) carrying a prompt template selected by quiz tag. The model is
/// instructed to return exactly one JSON object, but the reply is not
/// guaranteed to be pure JSON: the first brace-delimited span is extracted
/// and parsed. A malformed or incomplete reply is masked by a fixed fallback
/// suggestion; only transport-level failures surface as errors.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{AiSuggestion, LikesQuiz, MoodQuiz, QuizPayload},
    services::providers::SuggestionProvider,
};

/// Confidence assigned when the model reply omits a score
const DEFAULT_CONFIDENCE: f64 = 0.8;

#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

/// Shape of the JSON object the prompt asks the model to produce
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSuggestion {
    title: Option<String>,
    year: Option<i32>,
    explanation: Option<String>,
    #[serde(default)]
    match_reasons: Vec<String>,
    confidence_score: Option<f64>,
}

impl GeminiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.ai_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: config.gemini_api_key.clone(),
            api_url: config.gemini_api_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.api_url, self.model, self.api_key
        )
    }

    /// Send the prompt and return the concatenated text of the first candidate
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = self.generate_url();
        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 1024
            }
        });

        tracing::debug!(url = %redact_url_key(&url), model = %self.model, "Gemini request");

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AiApi(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::AiApi(format!("failed to read Gemini response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::AiApi(format!(
                "Gemini API returned status {}: {}",
                status, response_text
            )));
        }

        let reply: Value = serde_json::from_str(&response_text)
            .map_err(|e| AppError::AiApi(format!("failed to parse Gemini response: {}", e)))?;

        let mut text = String::new();
        if let Some(parts) = reply
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|a| a.first())
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
        {
            for part in parts {
                if let Some(t) = part.get("text").and_then(|v| v.as_str()) {
                    text.push_str(t);
                }
            }
        }

        Ok(text)
    }
}

#[async_trait::async_trait]
impl SuggestionProvider for GeminiClient {
    async fn suggest(&self, quiz: &QuizPayload) -> AppResult<AiSuggestion> {
        let prompt = build_prompt(quiz);
        let raw = self.generate(&prompt).await?;

        match parse_suggestion(&raw) {
            Some(suggestion) => {
                tracing::info!(
                    title = %suggestion.title,
                    confidence = suggestion.confidence,
                    "AI suggestion parsed"
                );
                Ok(suggestion)
            }
            None => {
                tracing::warn!(raw_reply = %raw, "unparseable model reply, using fallback");
                Ok(fallback_suggestion())
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Build the prompt for the given quiz variant
fn build_prompt(quiz: &QuizPayload) -> String {
    match quiz {
        QuizPayload::Mood(q) => mood_prompt(q),
        QuizPayload::Likes(q) => likes_prompt(q),
    }
}

fn mood_prompt(quiz: &MoodQuiz) -> String {
    format!(
        "You are a movie recommendation expert. A viewer answered a mood quiz:\n\
         - Current mood: {}\n\
         - They want to feel: {}\n\
         - Preferred intensity: {}\n\
         - Genres they enjoy: {}\n\n\
         Recommend exactly ONE movie that fits. {}",
        quiz.current_mood,
        quiz.desired_feeling,
        quiz.intensity,
        quiz.preferred_genres.join(", "),
        OUTPUT_INSTRUCTIONS
    )
}

fn likes_prompt(quiz: &LikesQuiz) -> String {
    format!(
        "You are a movie recommendation expert. A viewer answered a preferences quiz:\n\
         - Favorite movies: {}\n\
         - Favorite genres: {}\n\
         - Favorite actors: {}\n\
         - Dealbreakers to avoid: {}\n\n\
         Recommend exactly ONE movie they have likely not seen that fits their taste. {}",
        quiz.favorite_movies.join(", "),
        quiz.favorite_genres.join(", "),
        quiz.favorite_actors.join(", "),
        quiz.dealbreakers.join(", "),
        OUTPUT_INSTRUCTIONS
    )
}

const OUTPUT_INSTRUCTIONS: &str = "Respond with a single JSON object and nothing else:\n\
    {\"title\": \"<movie title>\", \"year\": <release year>, \
    \"explanation\": \"<2-3 sentences on why this movie fits>\", \
    \"matchReasons\": [\"<reason 1>\", \"<reason 2>\", \"<reason 3>\"], \
    \"confidenceScore\": <0.0-1.0>}";

/// Extract the first brace-delimited span from a raw model reply
fn extract_json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse a raw model reply into a suggestion, or None if it is unusable
///
/// Required fields: title, explanation, at least one match reason. The
/// confidence score is clamped into [0, 1] and defaults to 0.8 when absent.
fn parse_suggestion(raw: &str) -> Option<AiSuggestion> {
    let span = extract_json_span(raw)?;
    let parsed: RawSuggestion = serde_json::from_str(span).ok()?;

    let title = parsed.title.filter(|t| !t.trim().is_empty())?;
    let explanation = parsed.explanation.filter(|e| !e.trim().is_empty())?;
    if parsed.match_reasons.is_empty() {
        return None;
    }

    let confidence = parsed
        .confidence_score
        .unwrap_or(DEFAULT_CONFIDENCE)
        .clamp(0.0, 1.0);

    Some(AiSuggestion {
        title,
        year: parsed.year,
        explanation,
        match_reasons: parsed.match_reasons,
        confidence,
    })
}

/// Fixed recommendation substituted when the model reply cannot be parsed
fn fallback_suggestion() -> AiSuggestion {
    AiSuggestion {
        title: "The Shawshank Redemption".to_string(),
        year: Some(1994),
        explanation: "A universally loved story of hope and friendship that works for \
                      almost any mood and taste."
            .to_string(),
        match_reasons: vec![
            "Broad appeal across genres".to_string(),
            "Consistently rated among the best films ever made".to_string(),
            "Emotionally rewarding without being divisive".to_string(),
        ],
        confidence: 0.7,
    }
}

/// Redact the API key from a URL for safe logging
fn redact_url_key(url: &str) -> String {
    if let Some(idx) = url.find("key=") {
        let prefix = &url[..idx + 4];
        let rest = &url[idx + 4..];
        let end = rest.find('&').unwrap_or(rest.len());
        format!("{prefix}[REDACTED]{}", &rest[end..])
    } else {
        url.to_string()
    }
}
