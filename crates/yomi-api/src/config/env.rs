//! Config loading from environment variables

use std::str::FromStr;
use std::time::Duration;

use yomi::{BackoffPolicy, InitRetryPolicy};

use super::constants::{
  DEFAULT_ANALYZE_TIMEOUT_SECS, DEFAULT_ENGINE_COMMAND, DEFAULT_INIT_ATTEMPT_TIMEOUT_SECS,
  DEFAULT_INIT_BACKOFF_STEP_SECS, DEFAULT_INIT_MAX_ATTEMPTS, DEFAULT_INIT_TIMEOUT_SECS,
  DEFAULT_PORT, DEFAULT_SHUTDOWN_GRACE_SECS, DEFAULT_TRANSLIT_KANJI_LIMIT,
};
use crate::errors::ApiError;

/// API Server Configuration
///
/// Loaded once at startup, immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
  /// Listen port (`PORT`, default 8080)
  pub port: u16,
  /// Engine command line (`YOMI_ENGINE_COMMAND`)
  pub engine_command: String,
  /// Per-request analysis deadline (`YOMI_ANALYZE_TIMEOUT_SECS`)
  pub analyze_timeout: Duration,
  /// Grace period for in-flight requests at shutdown (`YOMI_SHUTDOWN_GRACE_SECS`)
  pub shutdown_grace: Duration,
  /// Top-N kanji kept by selective transliteration (`YOMI_TRANSLIT_KANJI_LIMIT`)
  pub translit_limit: usize,
  /// Engine initialization retry settings (`YOMI_INIT_*`)
  pub init: InitRetryPolicy,
}

/// Reads an environment variable, falling back to `default` when unset
///
/// An unparsable value is a configuration error, never a silent default.
fn env_or<T: FromStr>(key: &str, default: T) -> crate::errors::Result<T> {
  match std::env::var(key) {
    Ok(raw) => raw
      .parse::<T>()
      .map_err(|_| ApiError::config(format!("環境変数 {key} の値が不正です: {raw}"))),
    Err(_) => Ok(default),
  }
}

impl Config {
  /// Loads configuration from environment variables
  ///
  /// # Errors
  /// Returns an error if an environment variable value is invalid.
  pub fn from_env() -> crate::errors::Result<Self> {
    let port = env_or("PORT", DEFAULT_PORT)?;
    let engine_command =
      std::env::var("YOMI_ENGINE_COMMAND").unwrap_or_else(|_| DEFAULT_ENGINE_COMMAND.to_string());
    let analyze_timeout =
      Duration::from_secs(env_or("YOMI_ANALYZE_TIMEOUT_SECS", DEFAULT_ANALYZE_TIMEOUT_SECS)?);
    let shutdown_grace =
      Duration::from_secs(env_or("YOMI_SHUTDOWN_GRACE_SECS", DEFAULT_SHUTDOWN_GRACE_SECS)?);
    let translit_limit = env_or("YOMI_TRANSLIT_KANJI_LIMIT", DEFAULT_TRANSLIT_KANJI_LIMIT)?;

    let init = InitRetryPolicy {
      max_attempts: env_or("YOMI_INIT_MAX_ATTEMPTS", DEFAULT_INIT_MAX_ATTEMPTS)?,
      backoff: BackoffPolicy::Linear(Duration::from_secs(env_or(
        "YOMI_INIT_BACKOFF_STEP_SECS",
        DEFAULT_INIT_BACKOFF_STEP_SECS,
      )?)),
      attempt_timeout: Duration::from_secs(env_or(
        "YOMI_INIT_ATTEMPT_TIMEOUT_SECS",
        DEFAULT_INIT_ATTEMPT_TIMEOUT_SECS,
      )?),
      overall_timeout: Duration::from_secs(env_or(
        "YOMI_INIT_TIMEOUT_SECS",
        DEFAULT_INIT_TIMEOUT_SECS,
      )?),
    };

    Ok(Self { port, engine_command, analyze_timeout, shutdown_grace, translit_limit, init })
  }

  /// Bind address derived from the configured port
  #[must_use]
  pub fn bind_addr(&self) -> String {
    format!("0.0.0.0:{}", self.port)
  }

  /// Test-friendly configuration with all defaults
  #[must_use]
  pub fn for_tests() -> Self {
    Self {
      port: 0,
      engine_command: DEFAULT_ENGINE_COMMAND.to_string(),
      analyze_timeout: Duration::from_secs(DEFAULT_ANALYZE_TIMEOUT_SECS),
      shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
      translit_limit: DEFAULT_TRANSLIT_KANJI_LIMIT,
      init: InitRetryPolicy::default(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn config_from_env_defaults() {
    // Verify default values when environment variables are not set
    // Note: remove_var became unsafe in Rust 2024, so not used here
    // This test assumes environment variables are not set

    let config = Config::from_env().unwrap();
    assert!(!config.engine_command.is_empty());
    assert!(config.analyze_timeout > Duration::ZERO);
  }

  #[test]
  fn bind_addr_uses_port() {
    let mut config = Config::for_tests();
    config.port = 8081;
    assert_eq!(config.bind_addr(), "0.0.0.0:8081");
  }

  #[test]
  fn default_init_policy_reference_values() {
    let config = Config::for_tests();
    assert_eq!(config.init.overall_timeout, Duration::from_secs(120));
    assert_eq!(config.analyze_timeout, Duration::from_secs(30));
  }
}
