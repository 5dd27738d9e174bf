//! # jury-config
//!
//! Layered configuration loading for jury voting using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`JURY_*` prefix, `__` as separator)
//! 2. Externally supplied overrides (e.g., a secret manager)
//! 3. Project-level `.jury/config.toml`
//! 4. User-level `~/.config/jury/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `JURY_BACKEND__URL` -> `backend.url`,
//! `JURY_SESSION__SUBMIT_TIMEOUT_SECS` -> `session.submit_timeout_secs`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use jury_config::JuryConfig;
//!
//! let config = JuryConfig::load_with_dotenv().expect("config");
//!
//! if config.backend.is_configured() {
//!     println!("Backend URL: {}", config.backend.url);
//! }
//! ```

mod backend;
mod error;
mod general;
mod session;

pub use backend::BackendConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use session::SessionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "JURY_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JuryConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

/// A scalar override value, typed the way an env var would be read.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum OverrideValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl OverrideValue {
    fn parse(raw: &str) -> Self {
        if let Ok(b) = raw.parse::<bool>() {
            Self::Bool(b)
        } else if let Ok(n) = raw.parse::<i64>() {
            Self::Int(n)
        } else {
            Self::Str(raw.to_string())
        }
    }
}

impl JuryConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env_overrides(&[])
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load configuration with externally supplied `JURY_*` pairs.
    ///
    /// Overrides sit above the TOML files but below the process environment,
    /// so an operator can still win locally.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_env_overrides(overrides: &[(String, String)]) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with_overrides(overrides).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        Self::figment_with_overrides(&[])
    }

    fn figment_with_overrides(overrides: &[(String, String)]) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".jury/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: External overrides
        for (key, value) in overrides {
            if let Some(path) = Self::env_key_to_path(key) {
                figment = figment.merge(Serialized::default(&path, OverrideValue::parse(value)));
            }
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check cross-field constraints after extraction.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session.validate()?;
        if self.general.history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.history_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// `JURY_BACKEND__ANON_KEY` -> `backend.anon_key`.
    fn env_key_to_path(key: &str) -> Option<String> {
        let rest = key.strip_prefix(ENV_PREFIX)?;
        if rest.is_empty() {
            return None;
        }
        Some(rest.to_ascii_lowercase().replace("__", "."))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jury").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
