//! Configuration file loading with precedence handling.

use crate::explain::ExplanationSettings;
use crate::model::{Mode, Theme};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

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

    /// Config file contains invalid TOML syntax or unknown values.
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
/// Corresponds to `~/.config/smartcalc/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Colour theme ("light" or "dark").
    #[serde(default)]
    pub theme: Option<Theme>,

    /// Panel shown on startup ("standard", "scientific" or "ai").
    #[serde(default)]
    pub mode: Option<Mode>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Explanation service section.
    #[serde(default)]
    pub explanation: Option<ExplanationSection>,
}

/// `[explanation]` section.
///
/// ```toml
/// [explanation]
/// model = "gemini-3-flash-preview"
/// language = "French"
/// api_key_env = "MY_GEMINI_KEY"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ExplanationSection {
    /// API base URL.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Model name.
    #[serde(default)]
    pub model: Option<String>,

    /// Language the explanation is written in.
    #[serde(default)]
    pub language: Option<String>,

    /// Environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Colour theme.
    pub theme: Theme,
    /// Initial panel.
    pub mode: Mode,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Explanation service settings.
    pub explanation: ExplanationSettings,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            mode: Mode::Standard,
            log_file_path: default_log_path(),
            explanation: ExplanationSettings::default(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/smartcalc/smartcalc.log` on Linux, or the platform
/// state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("smartcalc").join("smartcalc.log")
    } else {
        PathBuf::from("smartcalc.log")
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
/// Returns `~/.config/smartcalc/config.toml` on Linux.
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("smartcalc").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SMARTCALC_CONFIG` environment variable
/// 3. Default path `~/.config/smartcalc/config.toml`
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

    if let Ok(env_path) = std::env::var("SMARTCALC_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let section = config.explanation.unwrap_or_default();
    let explanation = ExplanationSettings {
        endpoint: section.endpoint.unwrap_or(defaults.explanation.endpoint),
        model: section.model.unwrap_or(defaults.explanation.model),
        language: section.language.unwrap_or(defaults.explanation.language),
        api_key_env: section.api_key_env.unwrap_or(defaults.explanation.api_key_env),
    };

    ResolvedConfig {
        theme: config.theme.unwrap_or(defaults.theme),
        mode: config.mode.unwrap_or(defaults.mode),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        explanation,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SMARTCALC_THEME`: Override theme (unknown values are logged and ignored)
/// - `SMARTCALC_MODEL`: Override explanation model
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(theme) = std::env::var("SMARTCALC_THEME") {
        match theme.parse::<Theme>() {
            Ok(theme) => config.theme = theme,
            Err(e) => warn!(error = %e, "Ignoring SMARTCALC_THEME"),
        }
    }

    if let Ok(model) = std::env::var("SMARTCALC_MODEL") {
        if !model.is_empty() {
            config.explanation.model = model;
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually passed
/// are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    theme_override: Option<Theme>,
    mode_override: Option<Mode>,
) -> ResolvedConfig {
    if let Some(theme) = theme_override {
        config.theme = theme;
    }

    if let Some(mode) = mode_override {
        config.mode = mode;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
