use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub index: IndexConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub address: String,

    /// Cap on suggestions returned over HTTP. 0 = unlimited. Unset leaves an
    /// earlier config file's value in place.
    #[serde(default)]
    pub max_suggestions: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub path: String,
}

/// Result of a successful insert.
#[derive(Debug, Serialize, Deserialize)]
pub struct Inserted {
    pub status: String,
    pub word: String,
}

/// Autocomplete results.
#[derive(Debug, Serialize, Deserialize)]
pub struct Suggestions {
    pub suggestions: Vec<String>,
}

/// Index stats.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    pub words: usize,
    pub nodes: usize,
}
