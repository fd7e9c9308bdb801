//! Wallet Module
//!
//! Loads the signing credential used to authorise transactions.
//! Author: arkSong (arksong2018@gmail.com)
//! Version: 0.1.0
//! Date: 2026-10-17

use std::fmt;

use thiserror::Error;
use tracing::{info, instrument};
use web3::{
    signing::{Key, SecretKey, SecretKeyRef},
    types::Address,
};

/// Transaction signer backed by a single secp256k1 key
#[derive(Clone)]
pub struct Signer {
    secret_key: SecretKey,
    address: Address,
}

impl Signer {
    /// Build a signer from a hex private key, with or without `0x`.
    #[instrument(level = "debug", skip(private_key))]
    pub fn from_hex(private_key: &str) -> Result<Self, WalletError> {
        let digits = private_key.trim();
        let digits = digits.strip_prefix("0x").unwrap_or(digits);

        let raw = hex::decode(digits).map_err(|e| WalletError::InvalidKey(e.to_string()))?;
        if raw.len() != 32 {
            return Err(WalletError::InvalidKey(format!(
                "expected 32 bytes, got {}",
                raw.len()
            )));
        }

        let secret_key =
            SecretKey::from_slice(&raw).map_err(|e| WalletError::InvalidKey(e.to_string()))?;
        let address = SecretKeyRef::new(&secret_key).address();
        info!("🔑 Loaded signer {:?}", address);

        Ok(Self {
            secret_key,
            address,
        })
    }

    /// Account address derived from the key
    pub fn address(&self) -> Address {
        self.address
    }

    pub(crate) fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Wallet-specific errors
#[derive(Error, Debug)]
pub enum WalletError {
    /// Invalid key format
    #[error("Invalid key format: {0}")]
    InvalidKey(String),
}
