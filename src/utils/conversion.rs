//! Type conversion and formatting utilities.
//!
//! Functions for converting raw on-chain integers into decimal-adjusted
//! `BigDecimal` amounts, plus address normalization helpers.

use alloy::primitives::{hex, Address, U256};
use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use once_cell::sync::Lazy;
use std::str::FromStr;

// ============================================
// Hex Encoding
// ============================================

/// Encode bytes as a lowercase hex string with 0x prefix.
pub fn hex_encode(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse and re-encode an address as lowercase hex with 0x prefix.
///
/// Every record id in the store uses this form so that comparisons
/// are plain string equality.
pub fn normalize_address(address: &str) -> Result<String> {
    let parsed = Address::from_str(address.trim())
        .with_context(|| format!("Invalid address: {}", address))?;
    Ok(hex_encode(parsed.as_slice()))
}

// ============================================
// Decimal Conversions
// ============================================

/// Convert a raw U256 token amount to a decimal-adjusted BigDecimal.
///
/// # Example
/// ```ignore
/// let value = U256::from(1_500_000u64);
/// let adjusted = convert_token_to_decimal(value, 6); // 1.5
/// ```
pub fn convert_token_to_decimal(amount: U256, decimals: u8) -> BigDecimal {
    // Via bytes, faster than string parsing
    let bytes: [u8; 32] = amount.to_le_bytes();
    let big_int = BigInt::from_bytes_le(num_bigint::Sign::Plus, &bytes);
    let big_value = BigDecimal::from(big_int);

    if decimals == 0 {
        big_value
    } else {
        big_value / big_pow10(decimals)
    }
}

/// Convert a u128 reserve (V2 reserves are uint112) to a decimal-adjusted BigDecimal.
pub fn reserve_to_decimal(reserve: u128, decimals: u8) -> BigDecimal {
    let big_value = BigDecimal::from(reserve);

    if decimals == 0 {
        big_value
    } else {
        big_value / big_pow10(decimals)
    }
}

/// Divide two decimals, returning zero when the denominator is zero.
pub fn safe_div(amount0: &BigDecimal, amount1: &BigDecimal) -> BigDecimal {
    if amount1.is_zero() {
        BigDecimal::zero()
    } else {
        amount0 / amount1
    }
}

// ============================================
// Internal Helpers
// ============================================

static POW10_CACHE: Lazy<[BigDecimal; 25]> =
    Lazy::new(|| std::array::from_fn(|i| BigDecimal::from(BigInt::from(10u32).pow(i as u32))));

/// Compute 10^exp as BigDecimal.
pub(crate) fn big_pow10(exp: u8) -> BigDecimal {
    if (exp as usize) < POW10_CACHE.len() {
        POW10_CACHE[exp as usize].clone()
    } else {
        BigDecimal::from(BigInt::from(10u32).pow(exp as u32))
    }
}
