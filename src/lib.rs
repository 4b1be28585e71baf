pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod model;
pub mod query;
pub mod stores;

pub use config::SearchConfig;
pub use controller::{SearchController, SearchOutcome, SearchState};
pub use error::{ErrorKind, FetchError, SearchError};
pub use model::{DietaryAttribute, Recipe};
pub use query::{PendingQuery, QueryModel, ServingsBucket};
pub use stores::{InMemoryStore, JsonFileStore, RecipeStore};

use log::debug;

/// Run a single fetch-then-filter cycle outside of a controller.
///
/// # Example
/// ```no_run
/// # use recipe_search::{search_recipes, JsonFileStore, PendingQuery};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = JsonFileStore::new("data/recipes.json");
/// let pending = PendingQuery {
///     search_text: "curry".to_string(),
///     ..Default::default()
/// };
/// let recipes = search_recipes(&store, &pending).await?;
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(
    store: &dyn RecipeStore,
    pending: &PendingQuery,
) -> Result<Vec<Recipe>, SearchError> {
    let query = pending.to_query();
    let candidates = store.fetch(&query).await?;
    debug!(
        "{} returned {} candidates",
        store.store_name(),
        candidates.len()
    );
    Ok(filter::filter_recipes(candidates, &query))
}

/// Load [`SearchConfig`] and build a controller over the configured store
pub fn load_controller() -> Result<SearchController, SearchError> {
    let config = SearchConfig::load()?;
    Ok(SearchController::new(stores::from_config(&config)))
}
