//! Item-to-item movie recommendations from MovieLens ratings.
//!
//! Ratings are pivoted into a user-by-movie matrix, movies are compared by
//! the cosine of their rating columns, and a query title is answered with
//! the most similar other movies. The HTTP layer in [`api`] serves one
//! immutable [`services::RecommendationModel`] snapshot at a time.

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

pub use error::{AppError, AppResult};
