use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{MovieId, ScoredMovie},
    services::ModelStats,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Movie name without the release year, matched exactly
    pub title: String,
    pub n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub query: String,
    pub movie_id: MovieId,
    pub recommendations: Vec<ScoredMovie>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Movies most similar to the requested title
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let n = params.n.unwrap_or(state.limits.default_top_n);
    if n > state.limits.max_top_n {
        return Err(AppError::InvalidInput(format!(
            "n must be at most {}",
            state.limits.max_top_n
        )));
    }

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        n,
        "Processing recommendation request"
    );

    let model = state.model().await;
    let found = model.find_similar(&params.title, n)?;

    tracing::info!(
        request_id = %request_id,
        movie_id = %found.movie_id,
        returned = found.items.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse {
        query: params.title,
        movie_id: found.movie_id,
        recommendations: found.items,
    }))
}

/// Size of the model currently serving queries
pub async fn model_stats(State(state): State<AppState>) -> Json<ModelStats> {
    let model = state.model().await;
    Json(model.stats().clone())
}

/// Reload both tables and rebuild the model
pub async fn reload_model(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<ModelStats>> {
    tracing::info!(request_id = %request_id, "Model reload requested");
    let stats = state.reload().await?;
    Ok(Json(stats))
}
