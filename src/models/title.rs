use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::{MovieId, MovieRecord};

/// Matches "<name> (<year>)" anchored at the end of the title.
///
/// The name group is lazy so only the final year is stripped, and `\s*`
/// swallows the whitespace in front of the parenthesis.
static YEAR_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s*\(\d{4}\)$").expect("year suffix pattern is valid")
});

/// Strips a trailing `(YYYY)` release year from a raw MovieLens title
///
/// Titles without the suffix are returned unchanged.
pub fn normalize_title(raw: &str) -> &str {
    match YEAR_SUFFIX.captures(raw).and_then(|caps| caps.get(1)) {
        Some(name) => name.as_str(),
        None => raw,
    }
}

/// Item record with its display name resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub movie_id: MovieId,
    /// Title as delivered by the data source, year included
    pub title: String,
    /// Title with the release year removed, used for lookups and display
    pub normalized_name: String,
}

impl From<MovieRecord> for Movie {
    fn from(record: MovieRecord) -> Self {
        let normalized_name = normalize_title(&record.title).to_string();
        Movie {
            movie_id: record.movie_id,
            title: record.title,
            normalized_name,
        }
    }
}
