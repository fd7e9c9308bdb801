//! Error Handling Module
//!
//! Centralized error handling for contract calls.
//! Author: arkSong (arksong2018@gmail.com)
//! Version: 0.1.0
//! Date: 2026-10-17

use thiserror::Error;
use web3::types::{H256, U64};

use crate::pending::WriteState;

/// Unified error type for contract operations
#[derive(Debug, Error)]
pub enum Web3Error {
    /// Transport failure on a read call
    #[error("RPC error: {0}")]
    Rpc(#[source] web3::Error),

    /// The node reported an execution revert for a read call
    #[error("Execution reverted: {0}")]
    Revert(String),

    /// The node rejected a transaction before inclusion
    #[error("Submission failed: {0}")]
    Submission(#[source] web3::Error),

    /// The transaction did not reach a confirmed receipt
    #[error(transparent)]
    Confirmation(#[from] ConfirmationError),

    /// A confirmed receipt carried no log decoding to the expected event
    #[error("Event {event} not found in receipt of {tx_hash:?} ({logs} logs scanned)")]
    EventNotFound {
        /// Expected event name
        event: String,
        /// Transaction whose receipt was scanned
        tx_hash: H256,
        /// Number of log entries in the receipt
        logs: usize,
    },

    /// ABI loading or call encoding failure
    #[error("ABI error: {0}")]
    Abi(#[from] web3::ethabi::Error),

    /// Contract artifact could not be read
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Return value or event arguments did not have the expected shape
    #[error("Unexpected output from {method}: {reason}")]
    UnexpectedOutput {
        /// Method or event that produced the value
        method: String,
        /// What was wrong with it
        reason: String,
    },

    /// Bad amount or encoding input
    #[error(transparent)]
    Units(#[from] txmediator_units::UnitError),

    /// Signing credential could not be used
    #[error(transparent)]
    Wallet(#[from] crate::wallet::WalletError),

    /// Configuration could not be turned into a client
    #[error(transparent)]
    Config(#[from] txmediator_common::ConfigError),
}

/// Failures while waiting for a submitted transaction to be mined
#[derive(Debug, Error)]
pub enum ConfirmationError {
    /// The transaction was mined with a failed status
    #[error("Transaction {tx_hash:?} reverted in block {block:?}")]
    Reverted {
        /// Transaction hash
        tx_hash: H256,
        /// Block the transaction was mined in
        block: Option<U64>,
    },

    /// No confirmed receipt appeared within the wait bound
    #[error("Transaction {tx_hash:?} not confirmed after {waited_secs}s, treating as dropped")]
    Dropped {
        /// Transaction hash
        tx_hash: H256,
        /// Seconds waited before giving up
        waited_secs: u64,
    },

    /// The node could not be polled for the receipt
    #[error("Failed to poll receipt for {tx_hash:?}: {source}")]
    Rpc {
        /// Transaction hash
        tx_hash: H256,
        /// Underlying transport error
        #[source]
        source: web3::Error,
    },
}

impl ConfirmationError {
    /// Terminal write state this failure corresponds to
    pub fn state(&self) -> WriteState {
        match self {
            Self::Reverted { .. } => WriteState::Reverted,
            Self::Dropped { .. } | Self::Rpc { .. } => WriteState::Dropped,
        }
    }

    /// Hash of the transaction that failed to confirm
    pub fn tx_hash(&self) -> H256 {
        match self {
            Self::Reverted { tx_hash, .. }
            | Self::Dropped { tx_hash, .. }
            | Self::Rpc { tx_hash, .. } => *tx_hash,
        }
    }
}

/// A log entry that the interface decoder does not understand
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The log has no topics, so no event selector
    #[error("log has no topics")]
    NoTopics,

    /// No event in the ABI has this selector
    #[error("unknown event selector {0:?}")]
    UnknownSelector(H256),

    /// The selector matched but the payload did not decode
    #[error("malformed {event} log: {reason}")]
    Malformed {
        /// Event whose selector matched
        event: String,
        /// Decoder message
        reason: String,
    },
}

/// Result type for contract operations
pub type Result<T> = std::result::Result<T, Web3Error>;
