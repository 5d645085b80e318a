use super::{DataSource, Dataset};
use crate::error::AppResult;

/// Serves a fixed dataset from memory
///
/// Used by the integration tests and for embedding the engine without files.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    dataset: Dataset,
}

impl InMemoryDataSource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

#[async_trait::async_trait]
impl DataSource for InMemoryDataSource {
    async fn load(&self) -> AppResult<Dataset> {
        Ok(self.dataset.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
