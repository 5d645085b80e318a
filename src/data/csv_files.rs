use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::{DataSource, Dataset};
use crate::error::{AppError, AppResult};
use crate::models::Rating;

/// Reads an unpacked MovieLens export (`movies.csv` + `ratings.csv`)
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    movies_path: PathBuf,
    ratings_path: PathBuf,
}

impl CsvDataSource {
    pub fn new(movies_path: impl Into<PathBuf>, ratings_path: impl Into<PathBuf>) -> Self {
        Self {
            movies_path: movies_path.into(),
            ratings_path: ratings_path.into(),
        }
    }

    /// Reads both files synchronously
    ///
    /// A row that does not fit the record type, or a rating that is not a
    /// finite number, aborts the whole load.
    pub fn load_blocking(&self) -> AppResult<Dataset> {
        let start = Instant::now();
        let movies = read_table(&self.movies_path)?;
        let ratings: Vec<Rating> = read_table(&self.ratings_path)?;
        check_finite(&ratings)?;

        tracing::info!(
            movies = movies.len(),
            ratings = ratings.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Loaded MovieLens tables"
        );

        Ok(Dataset::new(ratings, movies))
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to open table");
        e
    })?;

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(rows)
}

/// `f64` parsing accepts `NaN` and `inf`; neither is a usable rating
fn check_finite(ratings: &[Rating]) -> AppResult<()> {
    match ratings.iter().position(|r| !r.rating.is_finite()) {
        Some(row) => {
            let rating = &ratings[row];
            Err(AppError::MalformedData(format!(
                "rating row {} (user {}, movie {}) is not a finite number: {}",
                row + 1,
                rating.user_id,
                rating.movie_id,
                rating.rating
            )))
        }
        None => Ok(()),
    }
}

#[async_trait::async_trait]
impl DataSource for CsvDataSource {
    async fn load(&self) -> AppResult<Dataset> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.load_blocking())
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}
