//! Utility functions for the pairwise oracle.
//!
//! - [`conversion`] - Raw integer to BigDecimal conversions, address normalization
//! - [`pair_address`] - Uniswap V2 CREATE2 pair address computation

mod conversion;
mod pair_address;

// ============================================
// Common Constants
// ============================================

/// The Ethereum zero address (0x0000000000000000000000000000000000000000)
/// Returned by the factory's getPair when no pair exists.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

// ============================================
// Re-exports
// ============================================

pub use conversion::{
    convert_token_to_decimal, hex_encode, normalize_address, reserve_to_decimal, safe_div,
};

pub use pair_address::{compute_pair_address, sort_tokens};
