//! Pending Transaction Module
//!
//! Tracks a submitted transaction until it is mined and confirmed.
//! Author: arkSong (arksong2018@gmail.com)
//! Version: 0.1.0
//! Date: 2026-10-17

use std::{fmt, time::Duration};

use tracing::{debug, instrument, warn};
use txmediator_common::Config;
use web3::types::{TransactionReceipt, H256, U64};

use crate::{client::ChainClient, error::ConfirmationError};

/// Lifecycle of a state-changing call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    /// Calldata is being assembled
    Building,
    /// Broadcast accepted by the node, awaiting inclusion
    Submitted,
    /// Mined with a successful status and enough confirmations
    Confirmed,
    /// Mined with a failed status
    Reverted,
    /// Never confirmed within the wait bound
    Dropped,
}

impl fmt::Display for WriteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Building => "building",
            Self::Submitted => "submitted",
            Self::Confirmed => "confirmed",
            Self::Reverted => "reverted",
            Self::Dropped => "dropped",
        };
        f.write_str(name)
    }
}

/// How long and how deep to wait for a receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    /// Blocks required, counting the inclusion block
    pub confirmations: usize,
    /// Delay between polls
    pub poll_interval: Duration,
    /// Upper bound on the whole wait
    pub timeout: Option<Duration>,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            confirmations: 1,
            poll_interval: Duration::from_secs(1),
            timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl From<&Config> for ConfirmationPolicy {
    fn from(config: &Config) -> Self {
        Self {
            confirmations: config.confirmations.max(1),
            poll_interval: config.poll_interval,
            timeout: config.confirmation_timeout,
        }
    }
}

/// Handle to a broadcast transaction.
///
/// Consumed by [`PendingTransaction::confirm`]; once resolved into a
/// receipt the handle is gone.
#[must_use = "a pending transaction does nothing until confirmed"]
pub struct PendingTransaction<'a, C: ChainClient + ?Sized> {
    tx_hash: H256,
    chain: &'a C,
    policy: &'a ConfirmationPolicy,
}

impl<'a, C: ChainClient + ?Sized> PendingTransaction<'a, C> {
    pub(crate) fn new(tx_hash: H256, chain: &'a C, policy: &'a ConfirmationPolicy) -> Self {
        Self {
            tx_hash,
            chain,
            policy,
        }
    }

    /// Hash of the broadcast transaction
    pub fn tx_hash(&self) -> H256 {
        self.tx_hash
    }

    /// Wait until the transaction is mined and confirmed.
    ///
    /// A receipt with status 0 is [`ConfirmationError::Reverted`]; running
    /// past the policy timeout is [`ConfirmationError::Dropped`].
    #[instrument(level = "debug", skip(self), fields(tx_hash = ?self.tx_hash))]
    pub async fn confirm(self) -> Result<TransactionReceipt, ConfirmationError> {
        let receipt = match self.policy.timeout {
            Some(limit) => tokio::time::timeout(limit, self.wait_for_receipt())
                .await
                .map_err(|_| {
                    warn!("⏰ No confirmed receipt for {:?} after {:?}", self.tx_hash, limit);
                    ConfirmationError::Dropped {
                        tx_hash: self.tx_hash,
                        waited_secs: limit.as_secs(),
                    }
                })??,
            None => self.wait_for_receipt().await?,
        };

        if receipt.status == Some(U64::zero()) {
            warn!("❌ Transaction {:?} reverted", self.tx_hash);
            return Err(ConfirmationError::Reverted {
                tx_hash: self.tx_hash,
                block: receipt.block_number,
            });
        }

        Ok(receipt)
    }

    async fn wait_for_receipt(&self) -> Result<TransactionReceipt, ConfirmationError> {
        let rpc_error = |source: web3::Error| ConfirmationError::Rpc {
            tx_hash: self.tx_hash,
            source,
        };

        loop {
            let receipt = self
                .chain
                .transaction_receipt(self.tx_hash)
                .await
                .map_err(rpc_error)?;

            if let Some(receipt) = receipt {
                if let Some(mined_in) = receipt.block_number {
                    if self.policy.confirmations <= 1 {
                        return Ok(receipt);
                    }

                    let head = self.chain.block_number().await.map_err(rpc_error)?;
                    let depth = head.saturating_sub(mined_in).as_u64() + 1;
                    if depth >= self.policy.confirmations as u64 {
                        return Ok(receipt);
                    }
                    debug!(
                        "⏳ {:?} has {}/{} confirmations",
                        self.tx_hash, depth, self.policy.confirmations
                    );
                }
            }

            tokio::time::sleep(self.policy.poll_interval).await;
        }
    }
}

impl<C: ChainClient + ?Sized> fmt::Debug for PendingTransaction<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTransaction")
            .field("tx_hash", &self.tx_hash)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_write_state_display() {
        assert_eq!(WriteState::Building.to_string(), "building");
        assert_eq!(WriteState::Submitted.to_string(), "submitted");
        assert_eq!(WriteState::Confirmed.to_string(), "confirmed");
        assert_eq!(WriteState::Reverted.to_string(), "reverted");
        assert_eq!(WriteState::Dropped.to_string(), "dropped");
    }

    #[test]
    fn test_policy_from_config() {
        let config = Config {
            rpc_url: "http://localhost:8545".to_string(),
            private_key: "00".to_string(),
            contract_address: None,
            artifact_path: None,
            chain_id: None,
            gas_limit: None,
            confirmations: 3,
            poll_interval: Duration::from_millis(200),
            confirmation_timeout: None,
        };

        let policy = ConfirmationPolicy::from(&config);
        assert_eq!(policy.confirmations, 3);
        assert_eq!(policy.poll_interval, Duration::from_millis(200));
        assert_eq!(policy.timeout, None);
    }
}
