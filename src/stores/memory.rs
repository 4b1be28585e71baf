use super::{validate_query, RecipeStore};
use crate::error::FetchError;
use crate::model::Recipe;
use crate::query::QueryModel;
use async_trait::async_trait;
use log::debug;

/// Serves a fixed, already-parsed recipe collection without filtering.
pub struct InMemoryStore {
    recipes: Vec<Recipe>,
}

impl InMemoryStore {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }
}

#[async_trait]
impl RecipeStore for InMemoryStore {
    fn store_name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, query: &QueryModel) -> Result<Vec<Recipe>, FetchError> {
        validate_query(query)?;
        debug!("Serving {} in-memory recipes", self.recipes.len());
        Ok(self.recipes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            servings: 1,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            dietary_attributes: BTreeSet::new(),
            prep_time_minutes: 0,
            cook_time_minutes: 0,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_returns_everything_in_order() {
        let store = InMemoryStore::new(vec![recipe("b"), recipe("a")]);
        let query = QueryModel {
            search_text: Some("a".to_string()),
            ..Default::default()
        };
        let ids: Vec<String> = store
            .fetch(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_rejects_invalid_query() {
        let store = InMemoryStore::new(vec![recipe("a")]);
        let query = QueryModel {
            servings_min: Some(4),
            servings_max: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            store.fetch(&query).await,
            Err(FetchError::InvalidQuery(_))
        ));
    }
}
