//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::state::options::{clamp_card_width, FeedOptions, LayoutTuning};
use crate::view_state::masonry::DEFAULT_MAX_CARD_WIDTH;
use crate::view_state::virtualizer::{COLUMN_OVERSCAN, DEFAULT_ESTIMATED_SIZE, FEED_OVERSCAN};

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "NOTEFEED_CONFIG";

/// Environment variable overriding `show_properties`.
pub const ENV_SHOW_PROPERTIES: &str = "NOTEFEED_SHOW_PROPERTIES";

/// Environment variable overriding `max_card_width`.
pub const ENV_MAX_CARD_WIDTH: &str = "NOTEFEED_MAX_CARD_WIDTH";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/notefeed/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Show each note's properties block inside its editor.
    #[serde(default)]
    pub show_properties: Option<bool>,

    /// Masonry layout instead of a single feed.
    #[serde(default)]
    pub multiple_columns: Option<bool>,

    /// Max card width in masonry mode, in pixels.
    #[serde(default)]
    pub max_card_width: Option<u32>,

    /// Height assumed for unmeasured cards, in pixels.
    #[serde(default)]
    pub estimated_height: Option<u32>,

    /// Overscan of the single-column feed.
    #[serde(default)]
    pub feed_overscan: Option<usize>,

    /// Overscan of each masonry column.
    #[serde(default)]
    pub column_overscan: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Show properties inside editors.
    pub show_properties: bool,
    /// Masonry layout.
    pub multiple_columns: bool,
    /// Max card width, clamped and snapped.
    pub max_card_width: u32,
    /// Estimated card height.
    pub estimated_height: u32,
    /// Feed overscan.
    pub feed_overscan: usize,
    /// Column overscan.
    pub column_overscan: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl ResolvedConfig {
    /// View options described by this configuration.
    pub fn feed_options(&self) -> FeedOptions {
        FeedOptions {
            show_properties: self.show_properties,
            multiple_columns: self.multiple_columns,
            max_card_width: self.max_card_width,
            tuning: LayoutTuning {
                estimate_size: self.estimated_height.max(1),
                feed_overscan: self.feed_overscan,
                column_overscan: self.column_overscan,
            },
        }
        .normalized()
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            show_properties: false,
            multiple_columns: false,
            max_card_width: DEFAULT_MAX_CARD_WIDTH,
            estimated_height: DEFAULT_ESTIMATED_SIZE,
            feed_overscan: FEED_OVERSCAN,
            column_overscan: COLUMN_OVERSCAN,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/notefeed/notefeed.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("notefeed").join("notefeed.log")
    } else {
        PathBuf::from("notefeed.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/notefeed/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("notefeed").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `NOTEFEED_CONFIG` environment variable
/// 3. Default path `~/.config/notefeed/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Parse a boolean environment value (`1/0`, `true/false`, `yes/no`, `on/off`).
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `NOTEFEED_SHOW_PROPERTIES`: Override properties visibility
/// - `NOTEFEED_MAX_CARD_WIDTH`: Override max card width
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(ENV_SHOW_PROPERTIES) {
        match parse_flag(&raw) {
            Some(show) => config.show_properties = show,
            None => warn!(variable = ENV_SHOW_PROPERTIES, value = %raw, "Ignoring invalid flag"),
        }
    }

    if let Ok(raw) = std::env::var(ENV_MAX_CARD_WIDTH) {
        match raw.trim().parse::<u32>() {
            Ok(width) => config.max_card_width = clamp_card_width(width),
            Err(_) => warn!(variable = ENV_MAX_CARD_WIDTH, value = %raw, "Ignoring invalid width"),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        show_properties: config.show_properties.unwrap_or(defaults.show_properties),
        multiple_columns: config.multiple_columns.unwrap_or(defaults.multiple_columns),
        max_card_width: clamp_card_width(config.max_card_width.unwrap_or(defaults.max_card_width)),
        estimated_height: config.estimated_height.unwrap_or(defaults.estimated_height),
        feed_overscan: config.feed_overscan.unwrap_or(defaults.feed_overscan),
        column_overscan: config.column_overscan.unwrap_or(defaults.column_overscan),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    show_properties: Option<bool>,
    multiple_columns: Option<bool>,
    max_card_width: Option<u32>,
) -> ResolvedConfig {
    if let Some(show) = show_properties {
        config.show_properties = show;
    }

    if let Some(columns) = multiple_columns {
        config.multiple_columns = columns;
    }

    if let Some(width) = max_card_width {
        config.max_card_width = clamp_card_width(width);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
