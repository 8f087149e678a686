use std::{env, fmt};

use axum::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_UPSTREAM_URL: &str = "https://router.huggingface.co/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";

pub const API_KEY_VAR: &str = "HF_API_KEY";
pub const CORS_ORIGIN_VAR: &str = "CORS_ORIGIN";
pub const PORT_VAR: &str = "PORT";
pub const UPSTREAM_URL_VAR: &str = "HF_API_URL";
pub const MODEL_VAR: &str = "HF_MODEL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid PORT value {0:?}: expected a port number")]
    InvalidPort(String),
    #[error("invalid CORS_ORIGIN value {0:?}: not a valid header value")]
    InvalidOrigin(String),
}

/// Process configuration, read once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub allowed_origin: HeaderValue,
    pub port: u16,
    pub upstream_url: String,
    pub model: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let api_key = var(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let origin = var(CORS_ORIGIN_VAR).ok_or(ConfigError::Missing(CORS_ORIGIN_VAR))?;
        let allowed_origin =
            HeaderValue::from_str(&origin).map_err(|_| ConfigError::InvalidOrigin(origin))?;

        let port = match var(PORT_VAR) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let upstream_url =
            var(UPSTREAM_URL_VAR).unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        let model = var(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            allowed_origin,
            port,
            upstream_url,
            model,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("allowed_origin", &self.allowed_origin)
            .field("port", &self.port)
            .field("upstream_url", &self.upstream_url)
            .field("model", &self.model)
            .finish()
    }
}
