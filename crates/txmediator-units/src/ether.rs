//! Ether / Wei Conversion Module
//!
//! Fixed-point conversion between decimal display strings and integer
//! base units. Amounts are unsigned and held in `U256`.

use web3::types::U256;

use crate::error::{UnitError, UnitResult};

/// Number of fractional digits in one ether (1 ether = 10^18 wei)
pub const ETHER_DECIMALS: u32 = 18;

/// Largest power of ten that still fits in a `U256`
const MAX_DECIMALS: u32 = 77;

/// Convert an ether amount such as `"1.5"` into wei.
///
/// Trailing fractional zeros beyond 18 digits are accepted; any
/// significant digit past the 18th fails with [`UnitError::InvalidAmount`]
/// instead of being truncated.
pub fn parse_ether(value: &str) -> UnitResult<U256> {
    parse_units(value, ETHER_DECIMALS)
}

/// Convert a wei amount into its canonical ether string (`"1.5"`, `"2.0"`).
pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

/// Parse a decimal string into an integer scaled by `10^decimals`.
pub fn parse_units(value: &str, decimals: u32) -> UnitResult<U256> {
    if decimals > MAX_DECIMALS {
        return Err(UnitError::InvalidAmount(format!(
            "unsupported precision: {decimals} decimals"
        )));
    }

    let invalid = |reason: &str| UnitError::InvalidAmount(format!("{value:?}: {reason}"));

    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("empty amount"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("expected an unsigned decimal number"));
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(invalid(&format!(
            "more than {decimals} fractional digits"
        )));
    }

    let scale = U256::exp10(decimals as usize);
    let whole = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| invalid("amount out of range"))?
    };
    let fraction = if fraction.is_empty() {
        U256::zero()
    } else {
        let padded = format!("{fraction:0<width$}", width = decimals as usize);
        U256::from_dec_str(&padded).map_err(|_| invalid("amount out of range"))?
    };

    whole
        .checked_mul(scale)
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(|| invalid("amount out of range"))
}

/// Format an integer amount scaled by `10^decimals` as a decimal string.
///
/// The result always carries at least one fractional digit and never
/// carries trailing fractional zeros.
pub fn format_units(value: U256, decimals: u32) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    if decimals == 0 {
        return format!("{value}.0");
    }

    let scale = U256::exp10(decimals as usize);
    let whole = value / scale;
    let digits = (value % scale).to_string();
    let fraction = format!("{digits:0>width$}", width = decimals as usize);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}
