use std::env;

use thiserror::Error;
use url::Url;

/// Environment variable holding the REST API base URL.
pub const API_URL_ENV: &str = "ASSESS_API_URL";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("API base URL is not configured (set {API_URL_ENV} or pass --api)")]
    Missing,
    #[error("invalid API base URL {raw:?}: {source}")]
    Invalid {
        raw: String,
        source: url::ParseError,
    },
}

/// REST API location. The base URL is validated up front so endpoint joins
/// cannot fail later.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    /// Parses and normalizes a base URL (a trailing slash is ensured so
    /// relative joins keep the full path).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the URL does not parse.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Missing);
        }
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        let base_url = Url::parse(&normalized).map_err(|source| ConfigError::Invalid {
            raw: raw.to_string(),
            source,
        })?;
        Ok(Self { base_url })
    }

    /// Reads the base URL from `ASSESS_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when unset, `ConfigError::Invalid` when
    /// set to something unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(API_URL_ENV) {
            Ok(raw) => Self::new(&raw),
            Err(_) => Err(ConfigError::Missing),
        }
    }

    /// Joins a relative endpoint path (no leading slash) onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> Url {
        // The base was validated with a trailing slash, so a relative join
        // cannot fail for the fixed endpoint paths used by the client.
        self.base_url
            .join(path.trim_start_matches('/'))
            .unwrap_or_else(|_| self.base_url.clone())
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
