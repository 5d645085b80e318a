use std::collections::HashMap;

use crate::models::{Movie, MovieId};

/// Identifier-to-title map plus the reverse exact-name index
///
/// Several MovieLens entries share a name once the year is stripped
/// ("Hamlet", "Emma", ...). The name index resolves those to the lowest
/// movie id so lookups never depend on input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    titles: HashMap<MovieId, String>,
    by_name: HashMap<String, MovieId>,
}

impl Catalog {
    pub fn build(movies: &[Movie]) -> Self {
        let mut titles = HashMap::with_capacity(movies.len());
        let mut by_name: HashMap<String, MovieId> = HashMap::with_capacity(movies.len());
        let mut shared_names = 0;

        for movie in movies {
            titles.insert(movie.movie_id, movie.normalized_name.clone());

            by_name
                .entry(movie.normalized_name.clone())
                .and_modify(|existing| {
                    shared_names += 1;
                    if movie.movie_id < *existing {
                        *existing = movie.movie_id;
                    }
                })
                .or_insert(movie.movie_id);
        }

        if shared_names > 0 {
            tracing::debug!(
                shared = shared_names,
                "Movies sharing a normalized name; lookups resolve to the lowest id"
            );
        }

        Self { titles, by_name }
    }

    /// Exact match on the normalized name
    pub fn resolve(&self, name: &str) -> Option<MovieId> {
        self.by_name.get(name).copied()
    }

    pub fn title(&self, movie_id: MovieId) -> Option<&str> {
        self.titles.get(&movie_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
