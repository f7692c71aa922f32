use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_DATABASE_NAME: &str = "adopto";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub database_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl AppConfig {

    /// Reads the service configuration from the process environment.
    ///
    /// Loading `.env` is left to the caller so tests see only what they set.
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        let database_url = required("MONGODB_URI")?;
        let database_name = optional("MONGODB_DB")
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());
        let host = optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match optional("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let timeout_ms = match optional("MONGODB_TIMEOUT_MS") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid { var: "MONGODB_TIMEOUT_MS", value })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(AppConfig {
            database_url,
            database_name,
            database_timeout: Duration::from_millis(timeout_ms),
            host,
            port,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    optional(var).ok_or(ConfigError::Missing(var))
}

// Blank values count as unset.
fn optional(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 5] = ["MONGODB_URI", "MONGODB_DB", "MONGODB_TIMEOUT_MS", "HOST", "PORT"];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS.iter().map(|var| (*var, None)).collect()
    }

    #[test]
    fn test_defaults_applied() {
        let mut vars = unset_all();
        vars[0] = ("MONGODB_URI", Some("mongodb://localhost:27017"));

        temp_env::with_vars(vars, || {
            let config = AppConfig::from_env().unwrap();

            assert_eq!(config.database_url, "mongodb://localhost:27017");
            assert_eq!(config.database_name, "adopto");
            assert_eq!(config.database_timeout, Duration::from_millis(5000));
            assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 8080));
        });
    }

    #[test]
    fn test_config_values_are_correctly_loaded() {
        temp_env::with_vars(vec![
            ("MONGODB_URI", Some("mongodb+srv://cluster.example.com")),
            ("MONGODB_DB", Some("shelter")),
            ("MONGODB_TIMEOUT_MS", Some("250")),
            ("HOST", Some("127.0.0.1")),
            ("PORT", Some("5000")),
        ], || {
            let config = AppConfig::from_env().unwrap();

            assert_eq!(config.database_name, "shelter");
            assert_eq!(config.database_timeout, Duration::from_millis(250));
            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 5000);
        });
    }

    #[test]
    fn test_missing_database_url() {
        temp_env::with_vars(unset_all(), || {
            assert_eq!(AppConfig::from_env().unwrap_err(), ConfigError::Missing("MONGODB_URI"));
        });
    }

    #[test]
    fn test_blank_database_url_is_missing() {
        let mut vars = unset_all();
        vars[0] = ("MONGODB_URI", Some("   "));

        temp_env::with_vars(vars, || {
            assert_eq!(AppConfig::from_env().unwrap_err(), ConfigError::Missing("MONGODB_URI"));
        });
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = unset_all();
        vars[0] = ("MONGODB_URI", Some("mongodb://localhost"));
        vars[4] = ("PORT", Some("70000"));

        temp_env::with_vars(vars, || {
            let error = AppConfig::from_env().unwrap_err();
            assert_eq!(error, ConfigError::Invalid { var: "PORT", value: "70000".to_string() });
            assert_eq!(error.to_string(), "PORT has an invalid value: 70000");
        });
    }
}
