use super::{validate_query, RecipeStore};
use crate::error::FetchError;
use crate::filter;
use crate::model::Recipe;
use crate::query::QueryModel;
use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;

/// Recipe store backed by a JSON array file on disk.
///
/// The file is re-read on every fetch, so edits to the bundle show up on the
/// next search. When prefiltering is on the store applies the same predicate
/// the controller does, standing in for a backend search endpoint.
pub struct JsonFileStore {
    path: PathBuf,
    latency: Option<Duration>,
    prefilter: bool,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            latency: None,
            prefilter: true,
        }
    }

    /// Delay every fetch by `latency` before touching the file
    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_prefilter(mut self, prefilter: bool) -> Self {
        self.prefilter = prefilter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the whole collection
    pub async fn load(&self) -> Result<Vec<Recipe>, FetchError> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.map_io_error(e))?;
        let recipes = decode_recipes(&data)?;
        info!(
            "Loaded {} recipes from {}",
            recipes.len(),
            self.path.display()
        );
        Ok(recipes)
    }

    fn map_io_error(&self, error: io::Error) -> FetchError {
        warn!("Failed to read {}: {}", self.path.display(), error);
        match error.kind() {
            io::ErrorKind::InvalidData => {
                FetchError::DecodeFailure(format!("{} is not valid UTF-8", self.path.display()))
            }
            io::ErrorKind::NotFound => FetchError::DataUnavailable(self.path.display().to_string()),
            _ => FetchError::DataUnavailable(format!("{} ({})", self.path.display(), error)),
        }
    }
}

#[async_trait]
impl RecipeStore for JsonFileStore {
    fn store_name(&self) -> &str {
        "json_file"
    }

    async fn fetch(&self, query: &QueryModel) -> Result<Vec<Recipe>, FetchError> {
        validate_query(query)?;

        if let Some(latency) = self.latency {
            debug!("Simulating {:?} of latency", latency);
            sleep(latency).await;
        }

        let recipes = self.load().await?;
        if self.prefilter {
            let matched = filter::filter_recipes(recipes, query);
            debug!("Prefilter kept {} recipes", matched.len());
            Ok(matched)
        } else {
            Ok(recipes)
        }
    }
}

/// Decode a JSON array of recipes.
///
/// Decoding is all-or-nothing: the first malformed element fails the whole
/// collection, and the error names that element's index (and id, if it has one).
pub fn decode_recipes(data: &str) -> Result<Vec<Recipe>, FetchError> {
    let value: Value =
        serde_json::from_str(data).map_err(|e| FetchError::DecodeFailure(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(FetchError::DecodeFailure(
            "expected a JSON array of recipes at the top level".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_recipe(index, item))
        .collect()
}

fn decode_recipe(index: usize, item: Value) -> Result<Recipe, FetchError> {
    let location = match item.get("id").and_then(Value::as_str) {
        Some(id) => format!("recipe[{}] (id \"{}\")", index, id),
        None => format!("recipe[{}]", index),
    };

    let recipe: Recipe = serde_json::from_value(item)
        .map_err(|e| FetchError::DecodeFailure(format!("{}: {}", location, e)))?;

    if recipe.servings == 0 {
        return Err(FetchError::DecodeFailure(format!(
            "{}.servings: must be at least 1",
            location
        )));
    }
    Ok(recipe)
}
