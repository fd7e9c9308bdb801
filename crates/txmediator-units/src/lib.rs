//! Txmediator Unit Codec
//!
//! Author: arkSong (arksong2018@gmail.com)
//! Date: 2026-10-17
//! Version: 0.1.0
//!
//! Stateless conversions between display units and wire units:
//! ether and wei amounts, fixed-width `bytes32` strings, UTF-8 byte
//! sequences and hex byte strings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bytes;
pub mod ether;

mod error;

pub use bytes::{
    decode_bytes32_string, encode_bytes32_string, hexlify, is_bytes_like, to_utf8_bytes,
    to_utf8_string, zero_pad_value, zero_pad_value32,
};
pub use error::{UnitError, UnitResult};
pub use ether::{format_ether, format_units, parse_ether, parse_units, ETHER_DECIMALS};
