/// TMDB metadata provider
///
/// Resolves an AI suggestion to a canonical movie record in three calls:
/// 1. Search: /search/movie?query=<title>[&year=<year>] — first result wins
/// 2. Details: /movie/{id}
/// 3. Credits: /movie/{id}/credits
///
/// Details and credits are independent and fetched concurrently. A search
/// with zero results is a distinct "not found" condition, never folded into
/// a generic transport failure.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        AiSuggestion, CastMember, MovieRecord, TmdbCredits, TmdbMovieDetails, TmdbSearchResponse,
        TmdbSearchResult,
    },
    services::providers::MetadataProvider,
};

const POSTER_SIZE: &str = "w500";
const BACKDROP_SIZE: &str = "original";
const PROFILE_SIZE: &str = "w185";
const TOP_CAST: usize = 5;

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.tmdb_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.trim_end_matches('/').to_string(),
            image_url: config.tmdb_image_url.trim_end_matches('/').to_string(),
        })
    }

    /// Keyed GET returning deserialized JSON, with a shared status-check path
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::MetadataApi(format!("TMDB request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::MetadataApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::MetadataApi(format!("failed to parse TMDB response: {}", e)))
    }

    /// Search by title, optionally disambiguated by release year
    ///
    /// The first result is taken as the canonical match; there is no fuzzy
    /// re-ranking beyond the optional year filter.
    async fn search(&self, title: &str, year: Option<i32>) -> AppResult<TmdbSearchResult> {
        let mut query = vec![("query", title.to_string())];
        if let Some(year) = year {
            query.push(("year", year.to_string()));
        }

        let response: TmdbSearchResponse = self.get_json("/search/movie", &query).await?;

        tracing::info!(
            title = %title,
            year = ?year,
            results = response.results.len(),
            provider = "tmdb",
            "Title search completed"
        );

        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::MovieNotFound(title.to_string()))
    }

    async fn movie_details(&self, tmdb_id: u64) -> AppResult<TmdbMovieDetails> {
        self.get_json(&format!("/movie/{}", tmdb_id), &[]).await
    }

    async fn movie_credits(&self, tmdb_id: u64) -> AppResult<TmdbCredits> {
        self.get_json(&format!("/movie/{}/credits", tmdb_id), &[])
            .await
    }

    /// Absolute CDN URL for an image path, or None when the path is absent
    fn image_url(&self, size: &str, path: Option<&str>) -> Option<String> {
        path.map(|p| format!("{}/{}{}", self.image_url, size, p))
    }

    /// Assemble the canonical record from the two fetched halves
    fn assemble(&self, details: TmdbMovieDetails, credits: TmdbCredits) -> MovieRecord {
        let cast = credits
            .cast
            .into_iter()
            .take(TOP_CAST)
            .map(|credit| CastMember {
                profile_url: self.image_url(PROFILE_SIZE, credit.profile_path.as_deref()),
                name: credit.name,
                character: credit.character,
            })
            .collect();

        MovieRecord {
            tmdb_id: details.id,
            poster_url: self.image_url(POSTER_SIZE, details.poster_path.as_deref()),
            backdrop_url: self.image_url(BACKDROP_SIZE, details.backdrop_path.as_deref()),
            title: details.title,
            overview: details.overview,
            release_date: details.release_date,
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            rating: (details.vote_average * 10.0).round() / 10.0,
            vote_count: details.vote_count,
            runtime: details.runtime,
            cast,
            imdb_id: details.imdb_id,
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    async fn enrich(&self, suggestion: &AiSuggestion) -> AppResult<MovieRecord> {
        let matched = self.search(&suggestion.title, suggestion.year).await?;

        let (details, credits) = tokio::try_join!(
            self.movie_details(matched.id),
            self.movie_credits(matched.id)
        )?;

        let record = self.assemble(details, credits);

        tracing::info!(
            tmdb_id = record.tmdb_id,
            title = %record.title,
            cast = record.cast.len(),
            provider = "tmdb",
            "Enrichment completed"
        );

        Ok(record)
    }
}
