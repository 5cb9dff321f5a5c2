//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.scout/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    pub base_uri: Option<String>,
    pub method: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub page_size: Option<usize>,
}

/// Values given on the command line. `None` means the flag was not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_uri: Option<String>,
    pub method: Option<String>,
    pub page_size: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URI: &str = "https://9e4769e3-0d80-4e69-a3da-c9e239a9c60f.mock.pstmn.io";
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_uri: String,
    /// Search method sent with every query. Omitted from requests when unset.
    pub method: Option<String>,
    pub page_size: usize,
    /// No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl ResolvedConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.scout/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".scout").join("config.toml"))
}

/// Load config from `~/.scout/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ScoutConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ScoutConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ScoutConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ScoutConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<ScoutConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ScoutConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Scout Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [search]
# base_uri = "https://search.example.com"   # Or set SCOUT_BASE_URI env var
# method = "fulltext"                       # Or set SCOUT_METHOD env var
# timeout_secs = 30                         # Unset = wait forever

# [ui]
# page_size = 10
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ScoutConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with the environment supplied by `env`.
pub fn resolve_with_env(
    config: &ScoutConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URI: CLI → env → config → default
    let base_uri = cli
        .base_uri
        .clone()
        .or_else(|| env("SCOUT_BASE_URI"))
        .or_else(|| config.search.base_uri.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URI.to_string());

    // Method: CLI → env → config; blank means unset
    let method = cli
        .method
        .clone()
        .or_else(|| env("SCOUT_METHOD"))
        .or_else(|| config.search.method.clone())
        .filter(|m| !m.trim().is_empty());

    let page_size = cli
        .page_size
        .or(config.ui.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .max(1);

    ResolvedConfig {
        base_uri,
        method,
        page_size,
        timeout_secs: config.search.timeout_secs,
    }
}
