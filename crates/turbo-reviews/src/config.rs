//! Review API configuration.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::telemetry::mask_secret;

/// Name of the config section holding the review API options.
pub const SECTION_NAME: &str = "review_api";

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "REVIEW_API_";

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Connection and circuit breaker settings for the external review API.
#[derive(Clone, Serialize, Deserialize)]
pub struct ReviewApiOptions {
    /// Base URL of the review API (e.g. `https://reviews.example.com/api`).
    #[serde(default)]
    pub base_url: String,

    /// API key sent with every request.
    #[serde(default)]
    pub api_key: String,

    /// Header carrying the API key.
    #[serde(default = "default_api_key_header_name")]
    pub api_key_header_name: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Consecutive failures that open the circuit.
    #[serde(default = "default_exceptions_allowed_before_breaking")]
    pub exceptions_allowed_before_breaking: u32,

    /// How long the circuit stays open before a trial call, in seconds.
    #[serde(default = "default_circuit_breaker_duration_seconds")]
    pub circuit_breaker_duration_seconds: u64,
}

fn default_api_key_header_name() -> String {
    "x-functions-key".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_exceptions_allowed_before_breaking() -> u32 {
    3
}

fn default_circuit_breaker_duration_seconds() -> u64 {
    30
}

impl Default for ReviewApiOptions {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            api_key_header_name: default_api_key_header_name(),
            timeout_seconds: default_timeout_seconds(),
            exceptions_allowed_before_breaking: default_exceptions_allowed_before_breaking(),
            circuit_breaker_duration_seconds: default_circuit_breaker_duration_seconds(),
        }
    }
}

impl fmt::Debug for ReviewApiOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewApiOptions")
            .field("base_url", &self.base_url)
            .field("api_key", &mask_secret(&self.api_key))
            .field("api_key_header_name", &self.api_key_header_name)
            .field("timeout_seconds", &self.timeout_seconds)
            .field(
                "exceptions_allowed_before_breaking",
                &self.exceptions_allowed_before_breaking,
            )
            .field(
                "circuit_breaker_duration_seconds",
                &self.circuit_breaker_duration_seconds,
            )
            .finish()
    }
}

impl ReviewApiOptions {
    /// Create options for a base URL and key, with defaults for the rest.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Open-circuit duration.
    pub fn break_duration(&self) -> Duration {
        Duration::from_secs(self.circuit_breaker_duration_seconds)
    }

    /// Check that the options describe a usable endpoint and breaker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(invalid("base_url", "must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(invalid("base_url", "must start with http:// or https://"));
        }
        if self.api_key_header_name.trim().is_empty() {
            return Err(invalid("api_key_header_name", "must not be empty"));
        }
        if self.timeout_seconds == 0 {
            return Err(invalid("timeout_seconds", "must be at least 1"));
        }
        if self.exceptions_allowed_before_breaking == 0 {
            return Err(invalid(
                "exceptions_allowed_before_breaking",
                "must be at least 1",
            ));
        }
        if self.circuit_breaker_duration_seconds == 0 {
            return Err(invalid(
                "circuit_breaker_duration_seconds",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Override settings from `REVIEW_API_*` environment variables.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override settings using `lookup` to resolve `REVIEW_API_*` keys.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(value) = var("BASE_URL") {
            self.base_url = value;
        }
        if let Some(value) = var("KEY") {
            self.api_key = value;
        }
        if let Some(value) = var("KEY_HEADER_NAME") {
            self.api_key_header_name = value;
        }
        if let Some(value) = var("TIMEOUT_SECONDS") {
            self.timeout_seconds = parse_number("TIMEOUT_SECONDS", &value)?;
        }
        if let Some(value) = var("EXCEPTIONS_ALLOWED_BEFORE_BREAKING") {
            self.exceptions_allowed_before_breaking =
                parse_number("EXCEPTIONS_ALLOWED_BEFORE_BREAKING", &value)?;
        }
        if let Some(value) = var("CIRCUIT_BREAKER_DURATION_SECONDS") {
            self.circuit_breaker_duration_seconds =
                parse_number("CIRCUIT_BREAKER_DURATION_SECONDS", &value)?;
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: format!("{}{}", ENV_PREFIX, name),
        message: e.to_string(),
    })
}

/// Configuration file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewsConfig {
    /// External review API settings.
    #[serde(default)]
    pub review_api: ReviewApiOptions,
}

impl ReviewsConfig {
    /// Load config from a TOML file (or JSON, by extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: display,
                message: e.to_string(),
            })
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: display,
                message: e.to_string(),
            })
        }
    }

    /// Load from an optional file, then apply environment overrides and validate.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.review_api.apply_env()?;
        config.review_api.validate()?;
        Ok(config)
    }
}

/// Generate a default `reviews.toml` config file.
pub fn generate_default_config(base_url: &str) -> String {
    format!(
        r#"# Product review API configuration

[{section}]
base_url = "{base_url}"
# api_key = "set via REVIEW_API_KEY"
api_key_header_name = "x-functions-key"
timeout_seconds = 30

# Circuit breaker
exceptions_allowed_before_breaking = 3
circuit_breaker_duration_seconds = 30
"#,
        section = SECTION_NAME,
        base_url = base_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let options = ReviewApiOptions::default();
        assert_eq!(options.api_key_header_name, "x-functions-key");
        assert_eq!(options.timeout_seconds, 30);
        assert_eq!(options.exceptions_allowed_before_breaking, 3);
        assert_eq!(options.circuit_breaker_duration_seconds, 30);
        assert_eq!(options.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_toml_with_defaults() {
        let config: ReviewsConfig = toml::from_str(
            r#"
            [review_api]
            base_url = "https://reviews.test/api"
            api_key = "abc123"
            timeout_seconds = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.review_api.base_url, "https://reviews.test/api");
        assert_eq!(config.review_api.timeout_seconds, 5);
        assert_eq!(config.review_api.exceptions_allowed_before_breaking, 3);
        assert!(config.review_api.validate().is_ok());
    }

    #[test]
    fn test_default_config_round_trips() {
        let config: ReviewsConfig =
            toml::from_str(&generate_default_config("http://localhost:7071/api")).unwrap();
        assert_eq!(config.review_api.base_url, "http://localhost:7071/api");
        assert!(config.review_api.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ReviewApiOptions::default().validate().is_err());
        assert!(ReviewApiOptions::new("ftp://x", "k").validate().is_err());

        let mut options = ReviewApiOptions::new("http://x", "k");
        options.exceptions_allowed_before_breaking = 0;
        assert!(options.validate().is_err());

        let mut options = ReviewApiOptions::new("http://x", "k");
        options.timeout_seconds = 0;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("REVIEW_API_BASE_URL", "http://override.test"),
            ("REVIEW_API_KEY", "from-env"),
            ("REVIEW_API_EXCEPTIONS_ALLOWED_BEFORE_BREAKING", "5"),
        ]
        .into_iter()
        .collect();

        let mut options = ReviewApiOptions::new("http://file.test", "from-file");
        options
            .apply_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(options.base_url, "http://override.test");
        assert_eq!(options.api_key, "from-env");
        assert_eq!(options.exceptions_allowed_before_breaking, 5);
        assert_eq!(options.timeout_seconds, 30);
    }

    #[test]
    fn test_overrides_reject_non_numeric() {
        let mut options = ReviewApiOptions::default();
        let result = options.apply_overrides(|k| {
            (k == "REVIEW_API_TIMEOUT_SECONDS").then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let options = ReviewApiOptions::new("http://x", "supersecretkey");
        let debug = format!("{:?}", options);
        assert!(!debug.contains("supersecretkey"));
        assert!(debug.contains("supe***"));
    }

    #[test]
    fn test_load_json_and_toml_files() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("reviews.toml");
        std::fs::write(&toml_path, generate_default_config("http://a.test")).unwrap();
        let config = ReviewsConfig::load(&toml_path).unwrap();
        assert_eq!(config.review_api.base_url, "http://a.test");

        let json_path = dir.path().join("reviews.json");
        std::fs::write(
            &json_path,
            r#"{"review_api": {"base_url": "http://b.test", "api_key": "k"}}"#,
        )
        .unwrap();
        let config = ReviewsConfig::load(&json_path).unwrap();
        assert_eq!(config.review_api.base_url, "http://b.test");

        assert!(matches!(
            ReviewsConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
