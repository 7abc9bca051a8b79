use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_MAX_ARTICLE_CHARS: usize = 10_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub wikipedia_api_url: String,
    pub max_article_chars: usize,
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// defaults for anything the lookup does not provide.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let wikipedia_api_url = lookup("WIKIPEDIA_API_URL")
            .unwrap_or_else(|| DEFAULT_WIKIPEDIA_API_URL.to_string());

        let max_article_chars = parse_positive(&lookup, "MAX_ARTICLE_CHARS", DEFAULT_MAX_ARTICLE_CHARS as u64)? as usize;
        let timeout_secs = parse_positive(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            wikipedia_api_url,
            max_article_chars,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_positive<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(AppError::ConfigError(format!("{} must be greater than zero", key))),
        Ok(value) => Ok(value),
        Err(e) => Err(AppError::ConfigError(format!("Invalid {}: {}", key, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.wikipedia_api_url, DEFAULT_WIKIPEDIA_API_URL);
        assert_eq!(config.max_article_chars, 10_000);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_honoured() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("WIKIPEDIA_API_URL", "http://localhost:9999/w/api.php"),
            ("MAX_ARTICLE_CHARS", "500"),
            ("REQUEST_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.wikipedia_api_url, "http://localhost:9999/w/api.php");
        assert_eq!(config.max_article_chars, 500);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(config_from(&[("PORT", "http")]), Err(AppError::ConfigError(_))));
        assert!(matches!(config_from(&[("HOST", "not-an-ip")]), Err(AppError::ConfigError(_))));
        assert!(matches!(config_from(&[("MAX_ARTICLE_CHARS", "0")]), Err(AppError::ConfigError(_))));
        assert!(matches!(config_from(&[("REQUEST_TIMEOUT_SECS", "-1")]), Err(AppError::ConfigError(_))));
    }
}
