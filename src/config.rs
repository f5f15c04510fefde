//! Generator configuration.
//!
//! Settings come from stock defaults, optionally overridden by a
//! `pubmanifest.toml` in the project root, optionally overridden again by CLI
//! flags. All paths in the file are relative to the project root.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! assets_dir = "assets"                 # Series folders live here
//! metadata_file = "books.xlsx"          # Relative to assets_dir; missing is fine
//! output = "src/content/publications.generated.json"
//! url_prefix = "assets"                 # Prefix of the relative URLs in the manifest
//!
//! [processing]
//! max_processes = 4                     # Max parallel scan workers (omit for auto = CPU cores)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file in the project root.
pub const CONFIG_FILENAME: &str = "pubmanifest.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `pubmanifest.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Directory holding the series folders.
    pub assets_dir: String,
    /// Metadata spreadsheet, relative to `assets_dir`.
    pub metadata_file: String,
    /// Output JSON path.
    pub output: String,
    /// Prefix of every asset URL written to the manifest. Must stay relative.
    pub url_prefix: String,
    /// Parallel scan settings.
    pub processing: ProcessingConfig,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            metadata_file: "books.xlsx".to_string(),
            output: "src/content/publications.generated.json".to_string(),
            url_prefix: "assets".to_string(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl ManifestConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assets_dir must not be empty".into(),
            ));
        }
        if self.output.trim().is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        if self.url_prefix.starts_with('/') || self.url_prefix.contains("://") {
            return Err(ConfigError::Validation(
                "url_prefix must be a relative path".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the configured paths against a project root.
    pub fn paths(&self, root: &Path) -> Paths {
        let assets_root = root.join(&self.assets_dir);
        Paths {
            metadata: assets_root.join(&self.metadata_file),
            assets_root,
            output: root.join(&self.output),
            url_prefix: self.url_prefix.trim_end_matches('/').to_string(),
        }
    }
}

/// Concrete inputs and output of one generator run.
///
/// Everything the pipeline touches on disk is named here, so the core never
/// looks at the working directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Paths {
    pub assets_root: PathBuf,
    pub metadata: PathBuf,
    pub output: PathBuf,
    pub url_prefix: String,
}

impl Paths {
    /// Paths for a project root using the stock layout.
    pub fn for_root(root: &Path) -> Self {
        ManifestConfig::default().paths(root)
    }
}

/// Parallel scan settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel scan workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ManifestConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `pubmanifest.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from the project root, merged over stock defaults and validated.
pub fn load_config(root: &Path) -> Result<ManifestConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: ManifestConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `pubmanifest.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# pubmanifest configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Paths are relative to the project root (the directory holding this file).
# Unknown keys will cause an error.

# Directory holding the series folders (GLM/, GPS/, GPT/, GRP/).
assets_dir = "assets"

# Volume metadata spreadsheet, relative to assets_dir.
# The file is optional: without it every title falls back to "<SERIES> <volume>".
metadata_file = "books.xlsx"

# Where the manifest is written. Parent directories are created.
output = "src/content/publications.generated.json"

# Prefix of the asset URLs in the manifest. Keep it relative so the site
# works when served from a sub-path.
url_prefix = "assets"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel scan workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
