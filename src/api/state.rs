use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Config,
    data::{DataSource, Dataset},
    error::{AppError, AppResult},
    services::{ModelStats, RecommendationModel, DEFAULT_TOP_N, MAX_TOP_N},
};

/// Limits applied to the `n` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub default_top_n: usize,
    pub max_top_n: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_top_n: DEFAULT_TOP_N,
            max_top_n: MAX_TOP_N,
        }
    }
}

impl From<&Config> for QueryLimits {
    fn from(config: &Config) -> Self {
        Self {
            default_top_n: config.default_top_n,
            max_top_n: config.max_top_n,
        }
    }
}

/// Shared application state
///
/// Queries clone the current snapshot out of the lock and release it right
/// away. A reload swaps the whole snapshot, so in-flight queries finish on
/// the model they started with.
#[derive(Clone)]
pub struct AppState {
    model: Arc<RwLock<Arc<RecommendationModel>>>,
    data_source: Arc<dyn DataSource>,
    reload_lock: Arc<Mutex<()>>,
    pub limits: QueryLimits,
}

impl AppState {
    /// Wraps an already built model
    pub fn new(
        model: RecommendationModel,
        data_source: Arc<dyn DataSource>,
        limits: QueryLimits,
    ) -> Self {
        Self {
            model: Arc::new(RwLock::new(Arc::new(model))),
            data_source,
            reload_lock: Arc::new(Mutex::new(())),
            limits,
        }
    }

    /// Loads the tables from `data_source` and builds the first model
    pub async fn load(data_source: Arc<dyn DataSource>, limits: QueryLimits) -> AppResult<Self> {
        tracing::info!(source = data_source.name(), "Loading rating data");
        let dataset = data_source.load().await?;
        let model = build_model(dataset).await?;
        Ok(Self::new(model, data_source, limits))
    }

    /// Current model snapshot
    pub async fn model(&self) -> Arc<RecommendationModel> {
        self.model.read().await.clone()
    }

    /// Rebuilds the model from the data source and swaps it in
    ///
    /// On failure the previous model stays in place.
    pub async fn reload(&self) -> AppResult<ModelStats> {
        let _guard = self.reload_lock.lock().await;

        tracing::info!(source = self.data_source.name(), "Reloading rating data");
        let dataset = self.data_source.load().await?;
        let model = Arc::new(build_model(dataset).await?);
        let stats = model.stats().clone();

        *self.model.write().await = model;

        tracing::info!(
            users = stats.users,
            rated_movies = stats.rated_movies,
            "Recommendation model swapped"
        );
        Ok(stats)
    }
}

/// Builds a model on the blocking pool so the runtime keeps serving
async fn build_model(dataset: Dataset) -> AppResult<RecommendationModel> {
    tokio::task::spawn_blocking(move || RecommendationModel::build(dataset))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MockDataSource;
    use crate::models::{MovieRecord, Rating};

    fn small_dataset() -> Dataset {
        Dataset::new(
            vec![Rating::new(1, 1, 4.0), Rating::new(1, 2, 3.0)],
            vec![MovieRecord::new(1, "Heat (1995)"), MovieRecord::new(2, "Casino (1995)")],
        )
    }

    fn larger_dataset() -> Dataset {
        let mut dataset = small_dataset();
        dataset.ratings.push(Rating::new(2, 3, 5.0));
        dataset.ratings.push(Rating::new(2, 1, 1.0));
        dataset.movies.push(MovieRecord::new(3, "Ronin (1998)"));
        dataset
    }

    #[tokio::test]
    async fn test_load_builds_model() {
        let mut source = MockDataSource::new();
        source.expect_name().return_const("mock");
        source
            .expect_load()
            .times(1)
            .returning(|| Ok(small_dataset()));

        let state = AppState::load(Arc::new(source), QueryLimits::default())
            .await
            .unwrap();

        let model = state.model().await;
        assert_eq!(model.stats().rated_movies, 2);
        assert_eq!(model.recommend("Heat", 3).unwrap(), vec!["Casino".to_string()]);
    }

    #[tokio::test]
    async fn test_reload_swaps_snapshot() {
        let mut source = MockDataSource::new();
        source.expect_name().return_const("mock");
        source
            .expect_load()
            .times(1)
            .returning(|| Ok(larger_dataset()));

        let state = AppState::new(
            RecommendationModel::build(small_dataset()),
            Arc::new(source),
            QueryLimits::default(),
        );
        let before = state.model().await;

        let stats = state.reload().await.unwrap();
        assert_eq!(stats.rated_movies, 3);

        // Readers holding the old snapshot are unaffected
        assert_eq!(before.stats().rated_movies, 2);
        assert_eq!(state.model().await.stats().rated_movies, 3);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_model() {
        let mut source = MockDataSource::new();
        source.expect_name().return_const("mock");
        source
            .expect_load()
            .times(1)
            .returning(|| Err(AppError::Internal("source offline".to_string())));

        let state = AppState::new(
            RecommendationModel::build(small_dataset()),
            Arc::new(source),
            QueryLimits::default(),
        );

        assert!(state.reload().await.is_err());
        assert_eq!(state.model().await.stats().rated_movies, 2);
    }

    #[test]
    fn test_limits_from_config() {
        let config = Config {
            default_top_n: 5,
            max_top_n: 20,
            ..Config::default()
        };
        assert_eq!(
            QueryLimits::from(&config),
            QueryLimits {
                default_top_n: 5,
                max_top_n: 20
            }
        );
    }

    #[test]
    fn test_default_limits_match_config_defaults() {
        assert_eq!(QueryLimits::default(), QueryLimits::from(&Config::default()));
        assert_eq!(QueryLimits::default().default_top_n, DEFAULT_TOP_N);
        assert_eq!(QueryLimits::default().max_top_n, MAX_TOP_N);
    }
}
