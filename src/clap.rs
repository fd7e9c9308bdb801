// =============================================================================
// Txmediator - Clap Module
// =============================================================================
//
// Project: Txmediator - Transaction mediation client
// Author: arkSong (arksong2018@gmail.com)
// Date: 2026-10-17
// Version: 0.1.0
// License: Apache 2.0 / MIT
//
// Description:
//   Command line definitions. Contract commands need `rpc_url` and
//   `private_key`; `units` commands run offline.
//
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, instrument};
use txmediator_web3::prelude::{Address, U256};

/// Returns the current version of the crate with extra info if supplied
///
/// Set the environment variable `TXMEDIATOR_VERSION_EXTRA` at build time to
/// any UTF-8 string to include it in parenthesis after the SemVer version.
#[instrument(level = "debug")]
pub fn version() -> String {
    let cargo_pkg_version = env!("CARGO_PKG_VERSION");

    let result = match option_env!("TXMEDIATOR_VERSION_EXTRA") {
        Some(x) => format!("{} ({})", cargo_pkg_version, x),
        None => cargo_pkg_version.to_owned(),
    };

    debug!("✅ Version string generated: {}", result);
    result
}

/// Txmediator - read and write calls against the concepts contract
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[clap(about, version, name = "txmediator")]
pub struct Args {
    /// Path to configuration file
    #[clap(short, long, env = "TXMEDIATOR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[clap(short, long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand to run
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Read the contract owner
    Owner,

    /// Read FIXED_VALUE
    FixedValue,

    /// Read the stored value
    Value,

    /// Ask the contract to classify a value
    CheckValue {
        /// Value to classify
        #[clap(value_parser = parse_u256)]
        value: U256,
    },

    /// Sum the integers from 1 to LIMIT on-chain
    SumUpTo {
        /// Upper bound
        #[clap(value_parser = parse_u256)]
        limit: U256,
    },

    /// Call the owner-only function
    OwnerFunction,

    /// Read the contract balance in ether
    ContractBalance,

    /// Update the stored value and report the old and new values
    UpdateValue {
        /// New value
        #[clap(value_parser = parse_u256)]
        value: U256,
    },

    /// Forward ether to an address through the contract
    SendEther {
        /// Recipient address
        #[clap(value_parser = parse_address)]
        to: Address,

        /// Amount in ether, e.g. 0.5
        amount: String,
    },

    /// Send ether straight to the contract
    Deposit {
        /// Amount in ether, e.g. 1.5
        amount: String,
    },

    /// Withdraw the contract balance to the owner
    Withdraw,

    /// Offline unit conversions
    Units {
        #[clap(subcommand)]
        action: UnitCommands,
    },
}

/// Unit conversion commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum UnitCommands {
    /// Ether to wei
    ParseEther {
        /// Amount in ether
        amount: String,
    },

    /// Wei to ether
    FormatEther {
        /// Amount in wei
        #[clap(value_parser = parse_u256)]
        wei: U256,
    },

    /// String to zero-padded bytes32
    EncodeBytes32 {
        /// Text of at most 32 UTF-8 bytes
        text: String,
    },

    /// Bytes32 hex word back to a string
    DecodeBytes32 {
        /// 0x-prefixed 32-byte hex word
        word: String,
    },

    /// Left-pad a hex byte string to 32 bytes
    ZeroPad {
        /// 0x-prefixed hex bytes
        data: String,
    },

    /// Check whether a string is 0x-prefixed hex bytes
    IsBytesLike {
        /// Candidate string
        data: String,
    },

    /// String to UTF-8 bytes
    Utf8Bytes {
        /// Text to encode
        text: String,
    },
}

/// Parse command line arguments
pub fn parse() -> Args {
    Args::parse()
}

fn parse_u256(value: &str) -> Result<U256, String> {
    U256::from_dec_str(value).map_err(|e| format!("{value:?} is not an unsigned integer: {e:?}"))
}

fn parse_address(value: &str) -> Result<Address, String> {
    txmediator_web3::contracts::parse_address(value).map_err(|e| e.to_string())
}
