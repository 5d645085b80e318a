use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinematch_api::{
    api::{create_router, AppState, QueryLimits},
    config::Config,
    data::CsvDataSource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinematch_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Build the model before accepting traffic
    let data_source = Arc::new(CsvDataSource::new(
        config.movies_path.clone(),
        config.ratings_path.clone(),
    ));
    let state = AppState::load(data_source, QueryLimits::from(&config)).await?;

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
