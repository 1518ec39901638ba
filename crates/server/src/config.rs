use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DIST_DIR: &str = "dist";
pub const DEFAULT_STATIC_DIR: &str = "assets";
pub const DEFAULT_UPSTREAM: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got {0:?}")]
    InvalidPort(String),
    #[error("UPSTREAM_API_URL must start with http:// or https://, got {0:?}")]
    InvalidUpstream(String),
}

/// Runtime settings for the page host.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// Built frontend bundle; `index.html` lives here.
    pub dist_dir: PathBuf,
    /// Hand-maintained files served under `/static`.
    pub static_dir: PathBuf,
    /// Base URL of the service that owns `/api/*`, without a trailing slash.
    pub upstream: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            upstream: DEFAULT_UPSTREAM.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("PORT") {
            config.port = match raw.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            };
        }
        if let Some(dir) = get("DIST_DIR") {
            config.dist_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get("UPSTREAM_API_URL") {
            let trimmed = raw.trim();
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(ConfigError::InvalidUpstream(raw));
            }
            config.upstream = trimmed.trim_end_matches('/').to_string();
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("DIST_DIR", "/srv/dist"),
            ("STATIC_DIR", "/srv/static"),
            ("UPSTREAM_API_URL", "https://orchard.example.org/"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.dist_dir, PathBuf::from("/srv/dist"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(config.upstream, "https://orchard.example.org");
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "  "), ("DIST_DIR", "")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.dist_dir, PathBuf::from(DEFAULT_DIST_DIR));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::InvalidPort("http".to_string()))
        );
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("PORT", "0")])),
            Err(ConfigError::InvalidPort("0".to_string()))
        );
        assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn test_rejects_upstream_without_scheme() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("UPSTREAM_API_URL", "localhost:8000")])),
            Err(ConfigError::InvalidUpstream("localhost:8000".to_string()))
        );
    }
}
