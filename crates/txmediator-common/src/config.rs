//! Configuration Module
//!
//! Author: arkSong (arksong2018@gmail.com)
//! Date: 2026-10-17
//! Version: 0.1.0
//!
//! Settings are merged from an optional TOML file, the bare `RPC_URL`,
//! `PRIVATE_KEY` and `CONTRACT_ADDRESS` environment variables, and
//! `TXMEDIATOR_`-prefixed environment variables, later sources winning.
//! [`ConfigFile`] is the raw, all-optional view; [`Config`] is the
//! validated view that a client is built from.

use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ConfigError, Result};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "txmediator.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "TXMEDIATOR_";

const DEFAULT_CONFIRMATIONS: usize = 1;
const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;
const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;

/// Raw settings as found in the configuration sources
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigFile {
    /// JSON-RPC endpoint URL
    pub rpc_url: Option<String>,
    /// Hex-encoded secp256k1 signing key
    pub private_key: Option<String>,
    /// Contract address, overriding the one in the artifact
    pub contract_address: Option<String>,
    /// Path to a contract artifact (`{"address": ..., "abi": [...]}`)
    pub artifact_path: Option<PathBuf>,
    /// Chain id used when signing; queried from the node when absent
    pub chain_id: Option<u64>,
    /// Gas limit attached to submitted transactions
    pub gas_limit: Option<u64>,
    /// Blocks required before a receipt counts as confirmed
    pub confirmations: Option<usize>,
    /// Delay between receipt polls in milliseconds
    pub poll_interval_ms: Option<u64>,
    /// Upper bound on a confirmation wait in seconds, 0 disables it
    pub confirmation_timeout_secs: Option<u64>,
    /// Tracing filter directive
    pub log: Option<String>,
}

impl ConfigFile {
    /// Build the provider chain for the given (optional) config file.
    pub fn figment(path: Option<&Path>) -> Figment {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::raw().only(&["RPC_URL", "PRIVATE_KEY", "CONTRACT_ADDRESS"]))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Read the raw settings. An explicitly named file must exist.
    #[instrument(level = "debug")]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::Invalid(format!(
                    "config file {} not found",
                    path.display()
                )));
            }
        }

        let raw: ConfigFile = Self::figment(path).extract()?;
        debug!("🔧 Configuration sources merged");
        Ok(raw)
    }
}

impl fmt::Debug for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigFile")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("contract_address", &self.contract_address)
            .field("artifact_path", &self.artifact_path)
            .field("chain_id", &self.chain_id)
            .field("gas_limit", &self.gas_limit)
            .field("confirmations", &self.confirmations)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("confirmation_timeout_secs", &self.confirmation_timeout_secs)
            .field("log", &self.log)
            .finish()
    }
}

/// Validated client configuration
#[derive(Clone)]
pub struct Config {
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
    /// Hex-encoded secp256k1 signing key
    pub private_key: String,
    /// Contract address override
    pub contract_address: Option<String>,
    /// Contract artifact path; the bundled artifact is used when absent
    pub artifact_path: Option<PathBuf>,
    /// Chain id used when signing
    pub chain_id: Option<u64>,
    /// Gas limit attached to submitted transactions
    pub gas_limit: Option<u64>,
    /// Blocks required before a receipt counts as confirmed
    pub confirmations: usize,
    /// Delay between receipt polls
    pub poll_interval: Duration,
    /// Upper bound on a confirmation wait, `None` waits forever
    pub confirmation_timeout: Option<Duration>,
}

impl Config {
    /// Load and validate the configuration in one step.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        ConfigFile::load(path)?.try_into()
    }
}

impl TryFrom<ConfigFile> for Config {
    type Error = ConfigError;

    fn try_from(raw: ConfigFile) -> Result<Self> {
        let rpc_url = required(raw.rpc_url, "rpc_url")?;
        let private_key = required(raw.private_key, "private_key")?;

        let confirmations = raw.confirmations.unwrap_or(DEFAULT_CONFIRMATIONS);
        if confirmations == 0 {
            return Err(ConfigError::Invalid(
                "confirmations must be at least 1".to_string(),
            ));
        }

        let poll_interval_ms = raw.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS);
        if poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        let confirmation_timeout = match raw
            .confirmation_timeout_secs
            .unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT_SECS)
        {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            rpc_url,
            private_key,
            contract_address: raw.contract_address.filter(|s| !s.trim().is_empty()),
            artifact_path: raw.artifact_path,
            chain_id: raw.chain_id,
            gas_limit: raw.gas_limit,
            confirmations,
            poll_interval: Duration::from_millis(poll_interval_ms),
            confirmation_timeout,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("contract_address", &self.contract_address)
            .field("artifact_path", &self.artifact_path)
            .field("chain_id", &self.chain_id)
            .field("gas_limit", &self.gas_limit)
            .field("confirmations", &self.confirmations)
            .field("poll_interval", &self.poll_interval)
            .field("confirmation_timeout", &self.confirmation_timeout)
            .finish()
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use test_log::test;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_load_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "txmediator.toml",
                &format!(
                    r#"
                    rpc_url = "http://127.0.0.1:8545"
                    private_key = "{KEY}"
                    confirmations = 2
                    poll_interval_ms = 250
                    confirmation_timeout_secs = 30
                    "#
                ),
            )?;

            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
            assert_eq!(config.private_key, KEY);
            assert_eq!(config.confirmations, 2);
            assert_eq!(config.poll_interval, Duration::from_millis(250));
            assert_eq!(config.confirmation_timeout, Some(Duration::from_secs(30)));
            assert!(config.contract_address.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("RPC_URL", "http://localhost:8545");
            jail.set_env("PRIVATE_KEY", KEY);

            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.confirmations, 1);
            assert_eq!(config.poll_interval, Duration::from_millis(1_000));
            assert_eq!(config.confirmation_timeout, Some(Duration::from_secs(120)));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                rpc_url = "http://file:8545"
                private_key = "from-file"
                contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
                "#,
            )?;
            jail.set_env("RPC_URL", "http://bare-env:8545");
            jail.set_env("TXMEDIATOR_PRIVATE_KEY", KEY);
            jail.set_env("TXMEDIATOR_CONFIRMATION_TIMEOUT_SECS", "0");

            let config = Config::load(Some(Path::new("custom.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.rpc_url, "http://bare-env:8545");
            assert_eq!(config.private_key, KEY);
            assert_eq!(
                config.contract_address.as_deref(),
                Some("0x5FbDB2315678afecb367f032d93F642f64180aa3")
            );
            assert_eq!(config.confirmation_timeout, None);
            Ok(())
        });
    }

    #[test]
    fn test_missing_rpc_url_is_fatal() {
        Jail::expect_with(|jail| {
            jail.set_env("PRIVATE_KEY", KEY);

            let err = Config::load(None).unwrap_err();
            assert!(matches!(err, ConfigError::Missing("rpc_url")));
            Ok(())
        });
    }

    #[test]
    fn test_missing_private_key_is_fatal() {
        Jail::expect_with(|jail| {
            jail.set_env("RPC_URL", "http://localhost:8545");
            jail.set_env("PRIVATE_KEY", "   ");

            let err = Config::load(None).unwrap_err();
            assert!(matches!(err, ConfigError::Missing("private_key")));
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_must_exist() {
        Jail::expect_with(|_jail| {
            let err = ConfigFile::load(Some(Path::new("nope.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
            Ok(())
        });
    }

    #[test]
    fn test_rejects_zero_confirmations() {
        let raw = ConfigFile {
            rpc_url: Some("http://localhost:8545".to_string()),
            private_key: Some(KEY.to_string()),
            confirmations: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            Config::try_from(raw),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let raw = ConfigFile {
            rpc_url: Some("http://localhost:8545".to_string()),
            private_key: Some(KEY.to_string()),
            ..Default::default()
        };
        assert!(!format!("{raw:?}").contains(KEY));

        let config = Config::try_from(raw).unwrap();
        assert!(!format!("{config:?}").contains(KEY));
    }
}
