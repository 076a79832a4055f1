use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Backend used by release builds.
pub const PRODUCTION_BACKEND_URL: &str = "https://daniel-caesar-lyrics-api.onrender.com";

/// Backend used by debug builds.
pub const DEVELOPMENT_BACKEND_URL: &str = "http://localhost:8000";

/// Configuration for refrain.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (REFRAIN_* prefix)
/// 3. Config file (~/.config/refrain/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the lyrics search backend.
    ///
    /// Can be set via:
    /// - CLI: --backend-url http://localhost:8000
    /// - ENV: REFRAIN_BACKEND_BASE_URL
    /// - Config: backend_base_url = "..."
    /// - Default: production endpoint for release builds, localhost:8000
    ///   for debug builds
    #[serde(default = "default_backend_base_url")]
    pub backend_base_url: String,

    /// Albums offered by the album filter, besides "all".
    ///
    /// From the environment this is a comma-separated list:
    /// `REFRAIN_ALBUMS="Freudian,NEVER ENOUGH"`.
    #[serde(default = "default_albums", deserialize_with = "album_list")]
    pub albums: Vec<String>,

    /// Quiet period after the last keystroke before a search is sent.
    #[serde(default = "default_debounce_ms", deserialize_with = "number_setting")]
    pub debounce_ms: u64,

    /// Per-request timeout for the search backend.
    #[serde(
        default = "default_request_timeout_secs",
        deserialize_with = "number_setting"
    )]
    pub request_timeout_secs: u64,

    /// Logger settings, passed straight to twyg.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_base_url: default_backend_base_url(),
            albums: default_albums(),
            debounce_ms: default_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/refrain/config.toml
    /// Reads environment variables with REFRAIN_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific file (if it exists) and the
    /// environment.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("refrain");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with a custom backend URL.
    ///
    /// This is used when the --backend-url CLI flag is provided.
    pub fn load_with_backend_url(backend_base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::load()?.with_backend_url(backend_base_url))
    }

    /// Replace the backend URL, overriding file and environment values.
    pub fn with_backend_url(mut self, backend_base_url: impl Into<String>) -> Self {
        self.backend_base_url = backend_base_url.into();
        self
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// Environment values reach the deserializer as strings, file values as
// their TOML types; both are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberSetting {
    Number(u64),
    Text(String),
}

fn number_setting<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberSetting::deserialize(deserializer)? {
        NumberSetting::Number(n) => Ok(n),
        NumberSetting::Text(text) => text.trim().parse().map_err(|e| {
            de::Error::custom(format!("expected a whole number, got {:?}: {}", text, e))
        }),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AlbumList {
    List(Vec<String>),
    Text(String),
}

fn album_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match AlbumList::deserialize(deserializer)? {
        AlbumList::List(albums) => albums,
        AlbumList::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|album| !album.is_empty())
            .map(String::from)
            .collect(),
    })
}

fn default_backend_base_url() -> String {
    if cfg!(debug_assertions) {
        DEVELOPMENT_BACKEND_URL.to_string()
    } else {
        PRODUCTION_BACKEND_URL.to_string()
    }
}

fn default_albums() -> Vec<String> {
    ["Freudian", "Case Study 01", "NEVER ENOUGH"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/refrain/config.toml
/// - macOS: ~/Library/Application Support/refrain/config.toml
/// - Windows: %APPDATA%\refrain\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("refrain")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Refrain Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (REFRAIN_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Base URL of the lyrics search backend
#
# Can also be set via:
# - CLI: refrain --backend-url http://localhost:8000
# - Environment: REFRAIN_BACKEND_BASE_URL=http://localhost:8000
#
# Default: the hosted API for release builds, http://localhost:8000 for
# debug builds
#backend_base_url = "http://localhost:8000"

# Albums offered by the album filter (in addition to "all")
#
# Environment: REFRAIN_ALBUMS="Freudian,Case Study 01,NEVER ENOUGH"
albums = ["Freudian", "Case Study 01", "NEVER ENOUGH"]

# Milliseconds to wait after the last keystroke before searching
debounce_ms = 300

# Seconds before a search request is abandoned
request_timeout_secs = 30
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

/// Create the config file at `config_path` unless it already exists.
pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
