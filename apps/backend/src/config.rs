//! Runtime configuration.
//!
//! Everything comes from environment variables; a `.env` file in the
//! working directory is loaded first when present.

use chrono::FixedOffset;
use std::net::SocketAddr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
    /// Offset that decides where one study day ends and the next begins.
    /// `None` follows the host's local time.
    pub study_offset: Option<FixedOffset>,
    /// Fixed seed for the session shuffler. `None` seeds from entropy.
    pub shuffle_seed: Option<u64>,
    /// Create the demo decks when the store has no decks.
    pub seed_sample_decks: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let bind_address = format!("{}:{}", host, port)
            .parse::<SocketAddr>()
            .map_err(|e| invalid("HOST/PORT", e))?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://flashdeck.db".to_string());
        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let study_offset = lookup("STUDY_UTC_OFFSET")
            .map(|raw| {
                raw.trim()
                    .parse::<FixedOffset>()
                    .map_err(|e| invalid("STUDY_UTC_OFFSET", e))
            })
            .transpose()?;

        let shuffle_seed = lookup("SHUFFLE_SEED")
            .map(|raw| raw.trim().parse::<u64>().map_err(|e| invalid("SHUFFLE_SEED", e)))
            .transpose()?;

        let seed_sample_decks = match lookup("SEED_SAMPLE_DECKS") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid("SEED_SAMPLE_DECKS", format!("'{}' is not a boolean", raw))
            })?,
            None => true,
        };

        Ok(Self {
            bind_address,
            database_url,
            log_filter,
            study_offset,
            shuffle_seed,
            seed_sample_decks,
        })
    }
}

fn invalid(key: &str, err: impl ToString) -> ConfigError {
    ConfigError::InvalidValue(key.to_string(), err.to_string())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
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
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.study_offset, None);
        assert_eq!(config.database_url, "sqlite://flashdeck.db");
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.shuffle_seed, None);
        assert!(config.seed_sample_decks);
    }

    #[test]
    fn test_explicit_values() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("STUDY_UTC_OFFSET", "-05:30"),
            ("SHUFFLE_SEED", "99"),
            ("SEED_SAMPLE_DECKS", "off"),
        ])
        .unwrap();
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(
            config.study_offset,
            FixedOffset::west_opt(5 * 3600 + 30 * 60)
        );
        assert_eq!(config.shuffle_seed, Some(99));
        assert!(!config.seed_sample_decks);
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key, _) if key == "HOST/PORT"));
    }

    #[test]
    fn test_invalid_offset() {
        let err = config_from(&[("STUDY_UTC_OFFSET", "noon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key, _) if key == "STUDY_UTC_OFFSET"));
    }

    #[test]
    fn test_invalid_flag() {
        let err = config_from(&[("SEED_SAMPLE_DECKS", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key, _) if key == "SEED_SAMPLE_DECKS"));
    }
}
