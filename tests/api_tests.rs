use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use cinematch_api::{
    api::{create_router, AppState, QueryLimits},
    data::{Dataset, InMemoryDataSource},
    models::{MovieRecord, Rating},
};

fn dataset() -> Dataset {
    Dataset::new(
        vec![
            Rating::new(1, 1, 4.0),
            Rating::new(1, 2, 4.0),
            Rating::new(1, 3, 4.0),
            Rating::new(2, 1, 3.0),
            Rating::new(2, 4, 3.0),
            Rating::new(3, 3, 5.0),
            // Movie 99 is not in the catalog
            Rating::new(3, 99, 2.0),
        ],
        vec![
            MovieRecord::new(1, "Heat (1995)"),
            MovieRecord::new(2, "Casino (1995)"),
            MovieRecord::new(3, "Se7en (1995)"),
            MovieRecord::new(4, "Ronin (1998)"),
            MovieRecord::new(5, "Unseen (2020)"),
        ],
    )
}

async fn create_test_server() -> TestServer {
    let source = Arc::new(InMemoryDataSource::new(dataset()));
    let limits = QueryLimits {
        default_top_n: 3,
        max_top_n: 10,
    };
    let state = AppState::load(source, limits).await.unwrap();
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommendations_ranked() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Heat")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["query"], "Heat");
    assert_eq!(body["movie_id"], 1);

    let titles: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Casino", "Ronin", "Se7en"]);
}

#[tokio::test]
async fn test_recommendations_respect_n() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Ronin")
        .add_query_param("n", 1)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["title"], "Heat");
    assert_eq!(recommendations[0]["movie_id"], 1);
}

#[tokio::test]
async fn test_unknown_title_not_found() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Nonexistent Title")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Movie 'Nonexistent Title' not found in the dataset"
    );
}

#[tokio::test]
async fn test_unrated_title() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Unseen")
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_n_above_limit_rejected() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Heat")
        .add_query_param("n", 11)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_title_not_found() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Movie '' not found in the dataset");
}

#[tokio::test]
async fn test_model_stats() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/model").await;
    response.assert_status_ok();
    let stats: Value = response.json();
    assert_eq!(stats["users"], 3);
    assert_eq!(stats["movies"], 5);
    assert_eq!(stats["rated_movies"], 4);
    assert_eq!(stats["ratings_used"], 6);
    assert_eq!(stats["dropped_ratings"], 1);
}

#[tokio::test]
async fn test_reload_returns_stats() {
    let server = create_test_server().await;

    let response = server.post("/api/v1/model/reload").await;
    response.assert_status_ok();
    let stats: Value = response.json();
    assert_eq!(stats["rated_movies"], 4);
}

#[tokio::test]
async fn test_request_id_generated() {
    let server = create_test_server().await;

    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(!header.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_request_id_propagated() {
    let server = create_test_server().await;

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("frontend-123"),
        )
        .await;

    assert_eq!(response.header("x-request-id"), "frontend-123");
}
