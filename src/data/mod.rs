//! Rating data sources
//!
//! The engine only needs two flat tables. Where they come from is pluggable:
//! MovieLens CSV exports on disk in production, in-memory tables in tests.

use crate::{
    error::AppResult,
    models::{MovieRecord, Rating},
};

pub mod csv_files;
pub mod memory;

pub use csv_files::CsvDataSource;
pub use memory::InMemoryDataSource;

/// The two input tables a model is built from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub ratings: Vec<Rating>,
    pub movies: Vec<MovieRecord>,
}

impl Dataset {
    pub fn new(ratings: Vec<Rating>, movies: Vec<MovieRecord>) -> Self {
        Self { ratings, movies }
    }
}

/// Trait for rating data providers
///
/// Called once at start-up and again on every model reload. Implementations
/// report malformed tables as errors; they never hand back partial data.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Load both tables
    async fn load(&self) -> AppResult<Dataset>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
