//! Reference deployment addresses and pricing thresholds.
//!
//! These seed the defaults of [`PricingSettings`](super::PricingSettings);
//! a `config.yaml` can override every one of them.

/// Wrapped native token (WETH).
pub const WETH_ADDRESS: &str = "0x5aea5775959fbc2557cc8789bc1bf90a239d9a91";

/// USD Coin.
pub const USDC_ADDRESS: &str = "0x3355df6d4c9c3035724fd0e3914de96a5a83aaf4";

/// Tether USD.
pub const USDT_ADDRESS: &str = "0x59ac51cfb025adce007d1ec96a21f7c7e3f32330";

/// USDC/WETH pair (created at block 10008355). USDC is token0.
pub const USDC_WETH_PAIR: &str = "0xc402a6f07d003456b7e3e00f80b558aa5be0cc81";

/// Minimum pair reserve, in ETH, for a pair to be used as a price source.
pub const MINIMUM_LIQUIDITY_THRESHOLD_ETH: &str = "0.2";

/// Minimum pair reserve, in USD, for young pairs to count towards tracked volume.
pub const MINIMUM_USD_THRESHOLD_NEW_PAIRS: &str = "400";

/// Pairs with fewer distinct liquidity providers than this are considered young.
pub const MINIMUM_LIQUIDITY_PROVIDERS: u64 = 5;
