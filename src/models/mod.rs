use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod title;

pub use title::{normalize_title, Movie};

/// MovieLens movie identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u32);

/// MovieLens user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of `ratings.csv`
///
/// The `timestamp` column of the MovieLens export is not needed and is
/// ignored on load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f64,
}

impl Rating {
    pub fn new(user_id: u32, movie_id: u32, rating: f64) -> Self {
        Self {
            user_id: UserId(user_id),
            movie_id: MovieId(movie_id),
            rating,
        }
    }
}

/// One row of `movies.csv`, before title normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub movie_id: MovieId,
    pub title: String,
}

impl MovieRecord {
    pub fn new(movie_id: u32, title: impl Into<String>) -> Self {
        Self {
            movie_id: MovieId(movie_id),
            title: title.into(),
        }
    }
}

/// A single entry of a recommendation list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub similarity: f64,
}
