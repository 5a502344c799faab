//! # delve-config
//!
//! Layered configuration loading for delve using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RESEARCH_*` prefix, `__` as separator, plus the
//!    raw `OPENAI_API_KEY` credential)
//! 2. Working-directory `delve.toml`
//! 3. User-level `~/.config/delve/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RESEARCH_ENGINE__URL` -> `engine.url` and
//! `RESEARCH_LOG_LEVEL` -> `log_level`. `OPENAI_API_KEY` maps to
//! `openai_api_key`.
//!
//! # Usage
//!
//! ```no_run
//! use delve_config::DelveConfig;
//!
//! let config = DelveConfig::load_with_dotenv().expect("config");
//! if config.engine.is_configured() {
//!     println!("engine at {}", config.engine.base_url());
//! }
//! ```

mod engine;
mod error;
mod logging;

pub use engine::EngineConfig;
pub use error::ConfigError;
pub use logging::{DEFAULT_LOG_LEVEL, log_directive};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the environment variable holding the engine credential.
pub const CREDENTIAL_VAR: &str = "OPENAI_API_KEY";

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Raw env values are type-inferred by figment, so a key such as `12345`
/// arrives as a number. Any scalar is kept in its text form.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(flag) => flag.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DelveConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    /// Verbosity for the diagnostic channel. Accepts Python-style level
    /// names (`DEBUG`, `WARNING`, `CRITICAL`, ...) or tracing directives.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Credential forwarded to the research engine.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub openai_api_key: String,
}

impl Default for DelveConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            log_level: default_log_level(),
            openai_api_key: String::new(),
        }
    }
}

impl DelveConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the working directory (or the nearest parent that has
    /// one) before building the figment. Variables already present in the
    /// process environment win over the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or layer providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from("delve.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(Env::prefixed("RESEARCH_").split("__"))
            .merge(Env::raw().only(&[CREDENTIAL_VAR]))
    }

    /// The engine credential, if one is set and non-empty.
    pub fn credential(&self) -> Option<&str> {
        Some(self.openai_api_key.as_str()).filter(|key| !key.is_empty())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.is_configured() {
            let url = self.engine.base_url();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: "engine.url".into(),
                    reason: format!("expected an http(s) URL, got '{url}'"),
                });
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("delve").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = DelveConfig::default();
        assert!(!config.engine.is_configured());
        assert_eq!(config.log_level, "WARNING");
        assert!(config.credential().is_none());
    }

    #[test]
    fn empty_credential_counts_as_missing() {
        let config = DelveConfig {
            openai_api_key: String::new(),
            ..Default::default()
        };
        assert!(config.credential().is_none());

        let config = DelveConfig {
            openai_api_key: "sk-test".into(),
            ..Default::default()
        };
        assert_eq!(config.credential(), Some("sk-test"));
    }

    #[test]
    fn non_http_engine_url_is_rejected() {
        let config = DelveConfig {
            engine: EngineConfig {
                url: "ftp://engine.local".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "engine.url"));
    }
}
