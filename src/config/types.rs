use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::session::Theme;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where resources are fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the posts API (scheme + host, no trailing slash needed).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Durable store settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file. Defaults to the platform data dir when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme applied at startup (default: dark).
    #[serde(default)]
    pub theme: Theme,
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ApiConfig {
    /// Join `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
