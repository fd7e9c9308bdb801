//! Receipt Event Extraction Module
//!
//! Locates a named event among the log entries of a confirmed receipt.
//! Author: arkSong (arksong2018@gmail.com)
//! Version: 0.1.0
//! Date: 2026-10-17

use tracing::trace;
use web3::{ethabi::Token, types::Log};

use crate::error::DecodeError;

/// Turns raw log entries into named events
pub trait InterfaceDecoder: Send + Sync {
    /// Decode one log entry against a known ABI
    fn decode_log(&self, log: &Log) -> Result<DecodedEvent, DecodeError>;
}

/// An event decoded from a log entry
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    /// Event name as declared in the ABI
    pub name: String,
    /// Arguments in declaration order
    pub args: Vec<Token>,
}

impl DecodedEvent {
    /// Positional argument, `None` past the end
    pub fn arg(&self, index: usize) -> Option<&Token> {
        self.args.get(index)
    }
}

/// Return the first log, in receipt order, that decodes to `target`.
///
/// Logs that fail to decode belong to some other contract or event and
/// are skipped; everything after the first match is left untouched.
pub fn find_event<D>(decoder: &D, logs: &[Log], target: &str) -> Option<DecodedEvent>
where
    D: InterfaceDecoder + ?Sized,
{
    logs.iter()
        .enumerate()
        .filter_map(|(index, log)| match decoder.decode_log(log) {
            Ok(event) => Some(event),
            Err(err) => {
                trace!(index, %err, "skipping undecodable log");
                None
            }
        })
        .find(|event| event.name == target)
}
