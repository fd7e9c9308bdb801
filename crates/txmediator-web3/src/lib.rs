//! Txmediator Web3 Library
//!
//! Author: arkSong (arksong2018@gmail.com)
//! Date: 2026-10-17
//! Version: 0.1.0
//!
//! Contract transaction client: read calls through `eth_call`, write calls
//! through sign, submit and confirm, and extraction of a named event from
//! the confirmation receipt.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod abi;
pub mod client;
pub mod concepts;
pub mod contracts;
pub mod error;
pub mod events;
pub mod pending;
pub mod wallet;

pub use abi::ContractAbi;
pub use client::{ChainClient, Submission, Web3ChainClient};
pub use concepts::{ValueChange, VALUE_CHANGED};
pub use contracts::{CallOutcome, CallSpec, CallTarget, ContractClient, Mutability};
pub use error::{ConfirmationError, DecodeError, Result, Web3Error};
pub use events::{find_event, DecodedEvent, InterfaceDecoder};
pub use pending::{ConfirmationPolicy, PendingTransaction, WriteState};
pub use wallet::{Signer, WalletError};

/// Re-export of common types
pub mod prelude {
    pub use super::{ContractClient, Result, ValueChange, Web3Error};
    pub use web3::ethabi::Token;
    pub use web3::types::*;
}
