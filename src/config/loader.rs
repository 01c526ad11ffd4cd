//! Configuration file loading with precedence handling.

use crate::state::buffer::{
    BufferLimits, DEFAULT_CAPACITY, DEFAULT_EVICT_BATCH, DEFAULT_EVICT_GUARD,
};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TAILCHAT_CONFIG";

/// Environment variable overriding the buffer capacity.
pub const CAPACITY_ENV: &str = "TAILCHAT_CAPACITY";

/// Environment variable overriding the log file path.
pub const LOG_ENV: &str = "TAILCHAT_LOG";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An environment override holds a value of the wrong type.
    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/tailchat/config.toml`:
///
/// ```toml
/// capacity = 5000
/// evict_batch = 50
/// evict_guard = 4900
/// follow = false
/// no_color = false
/// log_file_path = "/tmp/tailchat.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Maximum number of records kept in memory.
    #[serde(default)]
    pub capacity: Option<usize>,

    /// Records dropped from the oldest end when the buffer is full.
    #[serde(default)]
    pub evict_batch: Option<usize>,

    /// Scroll offset at which eviction is suppressed.
    #[serde(default)]
    pub evict_guard: Option<usize>,

    /// Keep reading a file after reaching its end.
    #[serde(default)]
    pub follow: Option<bool>,

    /// Disable author colours.
    #[serde(default)]
    pub no_color: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Buffer capacity.
    pub capacity: usize,
    /// Eviction batch size.
    pub evict_batch: usize,
    /// Eviction guard offset.
    pub evict_guard: usize,
    /// Follow mode for file input.
    pub follow: bool,
    /// Colours disabled.
    pub no_color: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl ResolvedConfig {
    /// Buffer policy from the resolved values, clamped into valid ranges.
    pub fn limits(&self) -> BufferLimits {
        BufferLimits::new(self.capacity, self.evict_batch, self.evict_guard)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            evict_batch: DEFAULT_EVICT_BATCH,
            evict_guard: DEFAULT_EVICT_GUARD,
            follow: false,
            no_color: false,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tailchat/tailchat.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("tailchat").join("tailchat.log"),
        None => PathBuf::from("tailchat.log"),
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
/// Returns `~/.config/tailchat/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tailchat").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TAILCHAT_CONFIG` environment variable
/// 3. Default path `~/.config/tailchat/config.toml`
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

    if let Some(env_path) = std::env::var_os(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
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
        capacity: config.capacity.unwrap_or(defaults.capacity),
        evict_batch: config.evict_batch.unwrap_or(defaults.evict_batch),
        evict_guard: config.evict_guard.unwrap_or(defaults.evict_guard),
        follow: config.follow.unwrap_or(defaults.follow),
        no_color: config.no_color.unwrap_or(defaults.no_color),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TAILCHAT_CAPACITY`: buffer capacity (unsigned integer)
/// - `TAILCHAT_LOG`: log file path
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnv` if `TAILCHAT_CAPACITY` is not an unsigned integer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(CAPACITY_ENV) {
        config.capacity = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            name: CAPACITY_ENV,
            value: raw.clone(),
        })?;
    }

    if let Some(path) = std::env::var_os(LOG_ENV) {
        config.log_file_path = PathBuf::from(path);
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    follow_override: Option<bool>,
    no_color_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(follow) = follow_override {
        config.follow = follow;
    }

    if let Some(no_color) = no_color_override {
        config.no_color = no_color;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
