use std::str::FromStr;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://fixture_catalog.db";
const DEFAULT_FOOTBALL_API_URL: &str = "https://v3.football.api-sports.io";
const DEFAULT_SERVER_PORT: u16 = 9000;
const DEFAULT_DATABASE_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct FootballApiConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub server_host: String,
    pub server_port: u16,
    pub database: DatabaseConfig,
    pub football_api: FootballApiConfig,
}

impl Config {
    /// Read configuration from the process environment, loading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!(".env not loaded: {}", e);
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let environment = get("ENV")
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| "development".to_string());

        let server_host = get("SERVER_HOST").unwrap_or_else(|| {
            // Reachable from the host machine when running in a dev container
            if environment == "development" {
                "0.0.0.0".to_string()
            } else {
                "127.0.0.1".to_string()
            }
        });

        let default_connections = std::thread::available_parallelism()
            .map(|n| n.get() as u32 * 4)
            .unwrap_or(4);

        Ok(Config {
            server_host,
            server_port: parse_or("SERVER_PORT", get("SERVER_PORT"), DEFAULT_SERVER_PORT)?,
            database: DatabaseConfig {
                url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    get("DATABASE_MAX_CONNECTIONS"),
                    default_connections,
                )?,
                timeout: Duration::from_secs(parse_or(
                    "DATABASE_TIMEOUT_SECS",
                    get("DATABASE_TIMEOUT_SECS"),
                    DEFAULT_DATABASE_TIMEOUT_SECS,
                )?),
            },
            football_api: FootballApiConfig {
                api_key: get("FOOTBALL_API_KEY").unwrap_or_default(),
                base_url: get("FOOTBALL_API_URL")
                    .unwrap_or_else(|| DEFAULT_FOOTBALL_API_URL.to_string()),
            },
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.server_port, 9000);
        assert!(cfg.is_development());
        assert_eq!(cfg.server_host, "0.0.0.0");
        assert_eq!(cfg.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.database.timeout, Duration::from_secs(15));
        assert!(cfg.database.max_connections >= 4);
        assert_eq!(cfg.football_api.base_url, DEFAULT_FOOTBALL_API_URL);
        assert!(cfg.football_api.api_key.is_empty());
    }

    #[test]
    fn test_overrides() {
        let cfg = config_from(&[
            ("ENV", "Production"),
            ("SERVER_PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("FOOTBALL_API_KEY", "secret"),
        ])
        .unwrap();
        assert!(!cfg.is_development());
        assert_eq!(cfg.bind_address(), "127.0.0.1:8080");
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.database.max_connections, 2);
        assert_eq!(cfg.football_api.api_key, "secret");
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let err = config_from(&[("SERVER_PORT", "nine thousand")]).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }
}
