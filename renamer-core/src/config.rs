use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the optional project config, relative to the cwd
pub const CONFIG_DIR: &str = ".renamer";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Branch `analyze` compares against
    #[serde(default = "default_compare_with")]
    pub compare_with: String,

    /// Where `analyze` writes the rename list
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// File extensions `rename` rewrites
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Default preview format for dry runs: "diff", "table", "summary" or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Append a timestamped record of every rewrite to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            compare_with: default_compare_with(),
            output_file: default_output_file(),
            extensions: default_extensions(),
            preview_format: default_preview(),
            log_file: None,
            use_color: None,
        }
    }
}

fn default_compare_with() -> String {
    "master".to_string()
}

fn default_output_file() -> PathBuf {
    PathBuf::from("list_output.json")
}

fn default_extensions() -> Vec<String> {
    crate::module_path::MODULE_EXTENSIONS
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_preview() -> String {
    "diff".to_string()
}

impl Config {
    /// Load config from .renamer/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_DIR).join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }
}
