//! Configuration loading and credential resolution.
//!
//! Lumen reads an optional TOML file at `~/.lumen/config.toml` and resolves
//! runtime settings from it plus the environment. The search-provider
//! credential is resolved exactly once, at startup, into an [`ApiKey`] that
//! is passed to the places client at construction; nothing downstream reads
//! the environment ambiently. A missing credential is a configuration error,
//! never an empty key handed to the provider.

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

use lumen_types::ApiKey;

/// Environment variable consulted first for the places credential.
pub const API_KEY_ENV: &str = "LUMEN_MAPS_API_KEY";
/// Legacy credential variable, consulted second.
pub const API_KEY_ENV_FALLBACK: &str = "MAP_API_KEY";
/// Environment override for the event database path.
pub const DB_PATH_ENV: &str = "LUMEN_DB";

const DEFAULT_DB_PATH: &str = "guidinglight.db";
const DEFAULT_TABLE: &str = "guidinglight";

/// Raw shape of `config.toml`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct LumenConfig {
    pub providers: Option<ProvidersConfig>,
    pub store: Option<StoreConfig>,
    pub speech: Option<SpeechConfig>,
}

#[derive(Default, Deserialize)]
pub struct ProvidersConfig {
    pub maps_api_key: Option<String>,
}

// Manual Debug impl to prevent leaking the credential in logs.
impl std::fmt::Debug for ProvidersConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked = if self.maps_api_key.is_some() {
            "[REDACTED]"
        } else {
            "None"
        };
        f.debug_struct("ProvidersConfig")
            .field("maps_api_key", &masked)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub path: Option<PathBuf>,
    /// Name of the event table.
    pub table: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SpeechConfig {
    /// Announce resolved landmarks out loud. Default: true.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Override the synthesis command instead of probing for one.
    pub command: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
        }
    }
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(
        "no places API key configured; set {API_KEY_ENV} (or {API_KEY_ENV_FALLBACK}), \
         or add maps_api_key under [providers] in config.toml"
    )]
    MissingApiKey,
}

/// Directory holding Lumen's config file and logs: `~/.lumen`.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lumen"))
}

/// Path of the config file, whether or not it exists.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

impl LumenConfig {
    /// Load the config file if present. `Ok(None)` means no file, which is a
    /// perfectly good configuration.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path).map(Some),
            _ => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: ApiKey,
    pub db_path: PathBuf,
    pub table: String,
    pub speech_enabled: bool,
    pub speech_command: Option<String>,
}

impl Settings {
    /// Resolve settings from the environment and an optional config file.
    ///
    /// Credential precedence: `LUMEN_MAPS_API_KEY`, then `MAP_API_KEY`, then
    /// `[providers] maps_api_key`.
    pub fn resolve(config: Option<&LumenConfig>) -> Result<Self, ConfigError> {
        let env_key = env::var(API_KEY_ENV)
            .or_else(|_| env::var(API_KEY_ENV_FALLBACK))
            .ok();
        let env_db = env::var(DB_PATH_ENV).ok();
        Self::resolve_inner(env_key, env_db, config)
    }

    fn resolve_inner(
        env_key: Option<String>,
        env_db: Option<String>,
        config: Option<&LumenConfig>,
    ) -> Result<Self, ConfigError> {
        let file_key = config
            .and_then(|cfg| cfg.providers.as_ref())
            .and_then(|providers| providers.maps_api_key.clone());

        let api_key = env_key
            .or(file_key)
            .and_then(|raw| ApiKey::new(raw).ok())
            .ok_or(ConfigError::MissingApiKey)?;

        let store = config.and_then(|cfg| cfg.store.as_ref());
        let db_path = env_db
            .map(PathBuf::from)
            .or_else(|| store.and_then(|s| s.path.clone()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        let table = store
            .and_then(|s| s.table.clone())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let speech = config.and_then(|cfg| cfg.speech.as_ref());
        let speech_enabled = speech.is_none_or(|s| s.enabled);
        let speech_command = speech.and_then(|s| s.command.clone());

        if config.is_none() {
            tracing::debug!("No config file; using environment and defaults");
        }

        Ok(Self {
            api_key,
            db_path,
            table,
            speech_enabled,
            speech_command,
        })
    }
}
