//! Txmediator Common Library
//!
//! Author: arkSong (arksong2018@gmail.com)
//! Date: 2026-10-17
//! Version: 0.1.0
//!
//! Configuration model and loading shared by the txmediator crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;

pub use config::{Config, ConfigFile};
pub use error::{ConfigError, Result};
