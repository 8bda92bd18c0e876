use serde::{Deserialize, Serialize};
use slidecraft_editor::EditorConfig;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "slidecraft.config.json";

/// Each CLI call is its own session, so cached lessons stay fresh for a day
pub const CLI_FRESHNESS_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Slidecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding cached lessons
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Session settings
    #[serde(default = "default_editor")]
    pub editor: EditorConfig,
}

fn default_cache_dir() -> String {
    ".slidecraft".to_string()
}

fn default_editor() -> EditorConfig {
    EditorConfig {
        freshness_window_ms: CLI_FRESHNESS_WINDOW_MS,
        ..EditorConfig::default()
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the cache directory
    pub fn get_cache_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.cache_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            editor: default_editor(),
        }
    }
}
