use std::sync::Arc;

use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use log::debug;
use num_traits::{One, Zero};

use crate::{
    config::PricingConfig,
    db::{models::Token, Store},
    worker::PairLookup,
};

/// Price resolution for ETH and USD valuations.
///
/// Resolves token prices with the Uniswap V2 subgraph approach:
/// 1. Wrapped native → 1 ETH (identity)
/// 2. Otherwise walk the whitelist in order and price the token through the
///    first whitelist pair holding more than the minimum ETH liquidity
/// 3. No such pair → 0
///
/// Derived prices are one hop deep: a pair's counterpart contributes its own
/// cached `derived_eth`, so results depend on the order tokens are refreshed
/// within a block.
///
/// Tracked volume and liquidity (see `tracked.rs`) only trust whitelisted
/// sides, which keeps scam token prices out of USD metrics.
///
/// The resolver never writes records. Callers persist what it returns.
pub struct PriceResolver<L> {
    config: Arc<PricingConfig>,
    lookup: L,
}

impl<L: PairLookup> PriceResolver<L> {
    pub fn new(config: Arc<PricingConfig>, lookup: L) -> Self {
        Self { config, lookup }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn lookup_mut(&mut self) -> &mut L {
        &mut self.lookup
    }

    /// Get the ETH price in USD from the stable pair.
    ///
    /// The stablecoin is token0 of that pair, so `token0_price` is USD per ETH.
    /// Returns 0 while the pair has not been created yet.
    pub fn get_eth_price_in_usd<S: Store>(&self, store: &S) -> BigDecimal {
        match store.pair(&self.config.stable_pair_address) {
            Some(stable_pair) => {
                debug!(
                    "stable pair {} token0_price: {} token1_price: {}",
                    stable_pair.id, stable_pair.token0_price, stable_pair.token1_price
                );
                stable_pair.token0_price.clone()
            },
            None => BigDecimal::zero(),
        }
    }

    /// Derive the token's price in ETH from its first liquid whitelist pair.
    ///
    /// Pairs must hold strictly more than `minimum_liquidity_threshold_eth` in
    /// `reserve_eth` to be used. The first accepted pair wins, even if a later
    /// whitelist entry has deeper liquidity.
    ///
    /// Errors only when the store contradicts the lookup (pair reported but
    /// not stored, or counterpart token missing).
    pub fn find_eth_per_token<S: Store>(&self, store: &S, token: &Token) -> Result<BigDecimal> {
        if self.config.is_wrapped_native(&token.id) {
            return Ok(BigDecimal::one());
        }

        for whitelisted in self.config.whitelist.iter() {
            let Some(pair_id) = self.lookup.get_pair(&token.id, whitelisted) else {
                continue;
            };

            let pair = store
                .pair(&pair_id)
                .with_context(|| format!("Pair {} returned by lookup is not stored", pair_id))?;

            if pair.reserve_eth <= self.config.minimum_liquidity_threshold_eth {
                continue;
            }

            // token price in paired token * paired token ETH price
            let (price_in_paired, paired_id) = if pair.token0.eq_ignore_ascii_case(&token.id) {
                (&pair.token1_price, &pair.token1)
            } else if pair.token1.eq_ignore_ascii_case(&token.id) {
                (&pair.token0_price, &pair.token0)
            } else {
                continue;
            };

            let paired = store.token(paired_id).with_context(|| {
                format!("Token {} of pair {} is not stored", paired_id, pair.id)
            })?;

            return Ok(price_in_paired * paired.derived_eth_or_zero());
        }

        Ok(BigDecimal::zero())
    }
}
