use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinequiz_api::{
    config::Config,
    routes::{create_router, AppState},
    services::providers::{gemini::GeminiClient, tmdb::TmdbClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let ai = Arc::new(GeminiClient::new(&config)?);
    let metadata = Arc::new(TmdbClient::new(&config)?);

    let state = AppState { ai, metadata };
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, model = %config.gemini_model, "cinequiz-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
