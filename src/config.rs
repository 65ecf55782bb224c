//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! ```bash
//! export LISTEN="0.0.0.0:8080"
//! export STORE_PATH="/var/lib/shortlink/links.redb"
//! export DEFAULT_TTL_SECONDS="0"        # 0 = links never expire
//! export DEFAULT_ID_LENGTH="8"          # 1..=64 hex characters
//! export PURGE_INTERVAL_SECONDS="300"   # 0 = no background sweep
//! export RUST_LOG="info"
//! export LOG_FORMAT="text"              # text | json
//! ```
//!
//! Every variable is optional. `STORE_PATH` defaults to `shortlink.redb`
//! in the system temp directory.

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::ShortenerConfig;
use crate::logging::Logger;
use crate::utils::id_generator::{DEFAULT_LENGTH, DIGEST_HEX_LENGTH};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Location of the redb database file.
    pub store_path: PathBuf,
    /// Lifetime applied to links created without an explicit TTL. Zero disables expiry.
    pub default_ttl_seconds: u64,
    pub default_id_length: usize,
    /// Seconds between background purges of expired links. Zero disables the sweeper.
    pub purge_interval_seconds: u64,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            store_path: ShortenerConfig::default_store_path(),
            default_ttl_seconds: 0,
            default_id_length: DEFAULT_LENGTH,
            purge_interval_seconds: 300,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset or unparsable numeric variables fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let store_path = env::var("STORE_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let default_ttl_seconds = env::var("DEFAULT_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.default_ttl_seconds);

        let default_id_length = env::var("DEFAULT_ID_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.default_id_length);

        let purge_interval_seconds = env::var("PURGE_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.purge_interval_seconds);

        Self {
            listen_addr,
            store_path,
            default_ttl_seconds,
            default_id_length,
            purge_interval_seconds,
            log_level,
            log_format,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default_id_length` is outside 1..=64
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `store_path` is empty or names a directory
    pub fn validate(&self) -> Result<()> {
        if self.default_id_length == 0 || self.default_id_length > DIGEST_HEX_LENGTH {
            anyhow::bail!(
                "DEFAULT_ID_LENGTH must be between 1 and {}, got {}",
                DIGEST_HEX_LENGTH,
                self.default_id_length
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.store_path.as_os_str().is_empty() {
            anyhow::bail!("STORE_PATH must not be empty");
        }

        if self.store_path.is_dir() {
            anyhow::bail!(
                "STORE_PATH must name a file, '{}' is a directory",
                self.store_path.display()
            );
        }

        Ok(())
    }

    /// Default link lifetime, `None` when links never expire.
    pub fn default_ttl(&self) -> Option<Duration> {
        (self.default_ttl_seconds > 0).then(|| Duration::from_secs(self.default_ttl_seconds))
    }

    /// Builds the shortener settings, logging through `logger`.
    pub fn shortener_config(&self, logger: Arc<dyn Logger>) -> ShortenerConfig {
        ShortenerConfig {
            store_path: self.store_path.clone(),
            default_ttl: self.default_ttl(),
            default_length: self.default_id_length,
            logger,
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Store: {}", self.store_path.display());
        match self.default_ttl() {
            Some(ttl) => tracing::info!("  Default TTL: {}s", ttl.as_secs()),
            None => tracing::info!("  Default TTL: none"),
        }
        tracing::info!("  Default id length: {}", self.default_id_length);
        if self.purge_interval_seconds > 0 {
            tracing::info!("  Expiry sweep: every {}s", self.purge_interval_seconds);
        } else {
            tracing::info!("  Expiry sweep: disabled");
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NullLogger;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LISTEN",
        "STORE_PATH",
        "DEFAULT_TTL_SECONDS",
        "DEFAULT_ID_LENGTH",
        "PURGE_INTERVAL_SECONDS",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially via #[serial]
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_id_length, 8);
        assert!(config.default_ttl().is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.default_id_length = 0;
        assert!(config.validate().is_err());

        config.default_id_length = 65;
        assert!(config.validate().is_err());

        config.default_id_length = 64;
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "8080".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:8080".to_string();
        config.store_path = PathBuf::new();
        assert!(config.validate().is_err());

        config.store_path = std::env::temp_dir();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shortener_config_carries_defaults() {
        let config = Config {
            default_ttl_seconds: 90,
            default_id_length: 12,
            ..Config::default()
        };

        let shortener_config = config.shortener_config(Arc::new(NullLogger));
        assert_eq!(shortener_config.default_ttl, Some(Duration::from_secs(90)));
        assert_eq!(shortener_config.default_length, 12);
        assert_eq!(shortener_config.store_path, config.store_path);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("LISTEN", "127.0.0.1:9000");
            env::set_var("STORE_PATH", "/var/lib/shortlink/links.redb");
            env::set_var("DEFAULT_TTL_SECONDS", "3600");
            env::set_var("DEFAULT_ID_LENGTH", "10");
            env::set_var("PURGE_INTERVAL_SECONDS", "0");
        }

        let config = Config::from_env();

        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(
            config.store_path,
            PathBuf::from("/var/lib/shortlink/links.redb")
        );
        assert_eq!(config.default_ttl(), Some(Duration::from_secs(3600)));
        assert_eq!(config.default_id_length, 10);
        assert_eq!(config.purge_interval_seconds, 0);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_falls_back_on_garbage() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("DEFAULT_ID_LENGTH", "eight");
            env::set_var("DEFAULT_TTL_SECONDS", "-5");
            env::set_var("STORE_PATH", "");
        }

        let config = Config::from_env();

        assert_eq!(config.default_id_length, DEFAULT_LENGTH);
        assert_eq!(config.default_ttl_seconds, 0);
        assert_eq!(config.store_path, ShortenerConfig::default_store_path());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_from_env_rejects_invalid_length() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("DEFAULT_ID_LENGTH", "100");
        }

        assert!(load_from_env().is_err());

        clear_env();
    }
}
