use crate::{
    error::{AppError, AppResult},
    models::{MovieId, ScoredMovie},
    services::{catalog::Catalog, similarity::SimilarityTable},
};

/// Recommendations returned when the caller does not ask for a count
pub const DEFAULT_TOP_N: usize = 3;

/// Largest count a caller may ask for unless configured otherwise
pub const MAX_TOP_N: usize = 50;

/// Ranked neighbours of one resolved query movie
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    /// Movie the query title resolved to
    pub movie_id: MovieId,
    pub items: Vec<ScoredMovie>,
}

/// Finds the movies most similar to `query_title`
///
/// The title must match a normalized movie name exactly. Every other movie
/// in the similarity table is ranked by cosine similarity, highest first;
/// equal scores are ordered by ascending movie id. At most `n` entries are
/// returned, along with the id the title resolved to.
///
/// An unknown title yields [`AppError::MovieNotFound`]. A known title whose
/// ratings were all dropped or missing yields [`AppError::Unrated`].
pub fn find_similar(
    query_title: &str,
    similarity: &SimilarityTable,
    catalog: &Catalog,
    n: usize,
) -> AppResult<Recommendations> {
    let movie_id = catalog.resolve(query_title).ok_or_else(|| {
        tracing::info!(query = query_title, "Movie not found in the dataset");
        AppError::MovieNotFound(query_title.to_string())
    })?;

    let index = similarity.item_index(movie_id).ok_or_else(|| {
        tracing::info!(query = query_title, movie_id = %movie_id, "Movie has no ratings");
        AppError::Unrated(query_title.to_string())
    })?;

    let mut ranked: Vec<(MovieId, f64)> = similarity
        .row(index)
        .filter(|(other, _)| *other != index)
        .map(|(other, score)| (similarity.movie_id(other), score))
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);

    let items = ranked
        .into_iter()
        .map(|(other, score)| {
            let title = catalog.title(other).ok_or_else(|| {
                AppError::Internal(format!("Movie {} missing from catalog", other))
            })?;
            Ok(ScoredMovie {
                movie_id: other,
                title: title.to_string(),
                similarity: score,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Recommendations { movie_id, items })
}

/// [`find_similar`] without the resolved id
pub fn recommend_scored(
    query_title: &str,
    similarity: &SimilarityTable,
    catalog: &Catalog,
    n: usize,
) -> AppResult<Vec<ScoredMovie>> {
    find_similar(query_title, similarity, catalog, n).map(|found| found.items)
}

/// Title-only form of [`recommend_scored`]
pub fn recommend(
    query_title: &str,
    similarity: &SimilarityTable,
    catalog: &Catalog,
    n: usize,
) -> AppResult<Vec<String>> {
    let scored = recommend_scored(query_title, similarity, catalog, n)?;
    Ok(scored.into_iter().map(|movie| movie.title).collect())
}
