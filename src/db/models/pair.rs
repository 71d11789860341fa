use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    abis::v2,
    utils::{hex_encode, safe_div},
};

/// Uniswap V2 style pair state.
///
/// Primary Key: id (lowercase hex pair address)
///
/// Prices follow the subgraph convention:
/// - token0_price = reserve0 / reserve1 (token0 per 1 token1)
/// - token1_price = reserve1 / reserve0 (token1 per 1 token0)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pair {
    pub id: String,
    pub token0: String,
    pub token1: String,

    // Reserves (decimal adjusted)
    pub reserve0: BigDecimal,
    pub reserve1: BigDecimal,

    // Derived liquidity
    pub reserve_eth: BigDecimal,
    pub reserve_usd: BigDecimal,
    pub tracked_reserve_eth: BigDecimal,

    pub token0_price: BigDecimal,
    pub token1_price: BigDecimal,

    /// Distinct addresses that have ever held a liquidity position
    pub liquidity_provider_count: u64,

    // Lifetime stats
    pub volume_token0: BigDecimal,
    pub volume_token1: BigDecimal,
    pub volume_usd: BigDecimal,
    pub untracked_volume_usd: BigDecimal,
    pub tx_count: u64,

    pub block_number: Option<u64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Pair {
    pub fn new(id: &str, token0: &str, token1: &str) -> Self {
        Self {
            id: id.to_lowercase(),
            token0: token0.to_lowercase(),
            token1: token1.to_lowercase(),
            ..Self::default()
        }
    }

    pub fn from_pair_created(event: &v2::PairCreated) -> Self {
        Self::new(
            &hex_encode(event.pair.as_slice()),
            &hex_encode(event.token0.as_slice()),
            &hex_encode(event.token1.as_slice()),
        )
    }

    /// Set reserves and recompute both exchange rates.
    ///
    /// A zero reserve zeroes the rate that divides by it.
    pub fn update_reserves(&mut self, reserve0: BigDecimal, reserve1: BigDecimal) {
        self.token0_price = safe_div(&reserve0, &reserve1);
        self.token1_price = safe_div(&reserve1, &reserve0);
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        self.updated_at = Some(Utc::now());
    }
}
