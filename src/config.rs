use serde::Deserialize;
use std::path::PathBuf;

use crate::services::{DEFAULT_TOP_N, MAX_TOP_N};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// MovieLens `movies.csv` (movieId, title, genres)
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,

    /// MovieLens `ratings.csv` (userId, movieId, rating, timestamp)
    #[serde(default = "default_ratings_path")]
    pub ratings_path: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations returned when the request does not ask
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Upper bound on the `n` a request may ask for
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
}

fn default_movies_path() -> PathBuf {
    PathBuf::from("data/ml-latest-small/movies.csv")
}

fn default_ratings_path() -> PathBuf {
    PathBuf::from("data/ml-latest-small/ratings.csv")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_max_top_n() -> usize {
    MAX_TOP_N
}

impl Default for Config {
    fn default() -> Self {
        Self {
            movies_path: default_movies_path(),
            ratings_path: default_ratings_path(),
            host: default_host(),
            port: default_port(),
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.default_top_n > self.max_top_n {
            anyhow::bail!(
                "DEFAULT_TOP_N ({}) must not exceed MAX_TOP_N ({})",
                self.default_top_n,
                self.max_top_n
            );
        }
        Ok(())
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
