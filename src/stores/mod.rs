mod json_file;
mod memory;

pub use json_file::{decode_recipes, JsonFileStore};
pub use memory::InMemoryStore;

use crate::config::SearchConfig;
use crate::error::FetchError;
use crate::model::Recipe;
use crate::query::QueryModel;
use async_trait::async_trait;

/// Source of candidate recipes for a search.
///
/// A store may narrow the candidates using the query, but callers must not
/// rely on it: the search controller always applies the filter predicate to
/// whatever comes back.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Store name used in log output (e.g., "json_file", "memory")
    fn store_name(&self) -> &str;

    /// Fetch candidate recipes for `query`
    async fn fetch(&self, query: &QueryModel) -> Result<Vec<Recipe>, FetchError>;
}

/// Reject queries no recipe could ever satisfy because they are malformed
pub(crate) fn validate_query(query: &QueryModel) -> Result<(), FetchError> {
    if let (Some(min), Some(max)) = (query.servings_min, query.servings_max) {
        if min > max {
            return Err(FetchError::InvalidQuery(format!(
                "servings minimum {} exceeds maximum {}",
                min, max
            )));
        }
    }
    if query.servings_min == Some(0) {
        return Err(FetchError::InvalidQuery(
            "servings minimum must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Build the store described by `config`
pub fn from_config(config: &SearchConfig) -> Box<dyn RecipeStore> {
    Box::new(
        JsonFileStore::new(&config.data_path)
            .with_latency(config.simulated_latency())
            .with_prefilter(config.prefilter),
    )
}
