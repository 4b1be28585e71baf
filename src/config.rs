use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for the recipe search backend
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Path of the bundled recipe collection (JSON array)
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Artificial delay applied to every fetch, in milliseconds (0 disables)
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
    /// Whether the store filters candidates before returning them
    #[serde(default = "default_prefilter")]
    pub prefilter: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            simulated_latency_ms: default_simulated_latency_ms(),
            prefilter: default_prefilter(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/recipes.json")
}

fn default_simulated_latency_ms() -> u64 {
    500
}

fn default_prefilter() -> bool {
    true
}

impl SearchConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SEARCH__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SEARCH__DATA_PATH
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn simulated_latency(&self) -> Option<Duration> {
        if self.simulated_latency_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.simulated_latency_ms))
        }
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<SearchConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_SEARCH")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
