//! Environment configuration

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the rental API, without trailing slash
    pub api_base_url: String,
    pub host: String,
    pub port: u16,
    /// Timeout applied to every rental API request
    pub api_timeout: Duration,
    /// Currency code shown next to prices
    pub currency: String,
    /// Directory served under `/static`
    pub static_dir: String,
    /// Preload location lists in the background
    pub cache_warmer: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_base_url: load(&lookup, "API_BASE_URL", "http://127.0.0.1:8000".to_string())?
                .trim_end_matches('/')
                .to_string(),
            host: load(&lookup, "HOST", "0.0.0.0".to_string())?,
            port: load(&lookup, "PORT", 3000)?,
            api_timeout: Duration::from_secs(load(&lookup, "API_TIMEOUT_SECS", 10)?),
            currency: load(&lookup, "CURRENCY", "AED".to_string())?,
            static_dir: load(&lookup, "STATIC_DIR", "static".to_string())?,
            cache_warmer: load(&lookup, "CACHE_WARMER", true)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
