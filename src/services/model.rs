use serde::Serialize;
use std::time::Instant;

use crate::{
    data::Dataset,
    error::AppResult,
    models::{Movie, MovieId, ScoredMovie},
    services::{
        catalog::Catalog,
        matrix::UserItemMatrix,
        recommendations::{self, Recommendations},
        similarity::SimilarityTable,
    },
};

/// Size of a built model, reported by the API and at start-up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    /// Users with at least one surviving rating
    pub users: usize,
    /// Movies in the catalog
    pub movies: usize,
    /// Movies with a column in the similarity table
    pub rated_movies: usize,
    pub ratings_used: usize,
    /// Ratings for movies missing from the catalog or with non-finite values
    pub dropped_ratings: usize,
}

/// Immutable recommendation snapshot
///
/// Built once from a dataset and never modified; a reload builds a new
/// snapshot and replaces the old one as a whole.
#[derive(Debug, Clone, Default)]
pub struct RecommendationModel {
    catalog: Catalog,
    similarity: SimilarityTable,
    stats: ModelStats,
}

impl RecommendationModel {
    /// Runs the full pipeline: normalize titles, build the user-item matrix,
    /// compute item similarities and index the catalog
    ///
    /// CPU bound; async callers should run it on a blocking thread.
    pub fn build(dataset: Dataset) -> Self {
        let start = Instant::now();

        let movies: Vec<Movie> = dataset.movies.into_iter().map(Movie::from).collect();
        let matrix = UserItemMatrix::build(&dataset.ratings, &movies);
        let similarity = SimilarityTable::from_matrix(&matrix);
        let catalog = Catalog::build(&movies);

        let stats = ModelStats {
            users: matrix.n_users(),
            movies: catalog.len(),
            rated_movies: matrix.n_items(),
            ratings_used: matrix.ratings_used(),
            dropped_ratings: matrix.dropped_ratings(),
        };

        if stats.dropped_ratings > 0 {
            tracing::warn!(
                dropped = stats.dropped_ratings,
                "Ratings dropped for unknown movies or non-finite values"
            );
        }

        tracing::info!(
            users = stats.users,
            movies = stats.movies,
            rated_movies = stats.rated_movies,
            ratings = stats.ratings_used,
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendation model built"
        );

        Self {
            catalog,
            similarity,
            stats,
        }
    }

    pub fn recommend(&self, title: &str, n: usize) -> AppResult<Vec<String>> {
        recommendations::recommend(title, &self.similarity, &self.catalog, n)
    }

    pub fn recommend_scored(&self, title: &str, n: usize) -> AppResult<Vec<ScoredMovie>> {
        recommendations::recommend_scored(title, &self.similarity, &self.catalog, n)
    }

    /// Ranked neighbours together with the id the title resolved to
    pub fn find_similar(&self, title: &str, n: usize) -> AppResult<Recommendations> {
        recommendations::find_similar(title, &self.similarity, &self.catalog, n)
    }

    /// Movie a query title resolves to, if any
    pub fn resolve(&self, title: &str) -> Option<MovieId> {
        self.catalog.resolve(title)
    }

    pub fn stats(&self) -> &ModelStats {
        &self.stats
    }

    pub fn similarity(&self) -> &SimilarityTable {
        &self.similarity
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
