//! Whitelist-weighted USD tracking for swaps and pool reserves.

use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::{
    db::{
        models::{Pair, Token},
        Store,
    },
    worker::{PairLookup, PriceResolver},
};

impl<L: PairLookup> PriceResolver<L> {
    /// USD prices of both tokens from their cached `derived_eth` and the bundle.
    fn token_prices_usd<S: Store>(
        &self,
        store: &S,
        token0: &Token,
        token1: &Token,
    ) -> Result<(BigDecimal, BigDecimal)> {
        let bundle = store.bundle().context("Bundle is not stored")?;
        let price0 = token0.derived_eth_or_zero() * &bundle.eth_price;
        let price1 = token1.derived_eth_or_zero() * &bundle.eth_price;
        Ok((price0, price1))
    }

    /// Tracked USD volume of a swap.
    ///
    /// - Both tokens whitelisted → average of both sides
    /// - One token whitelisted → that side only
    /// - Neither → 0
    ///
    /// Untracked pairs are always 0. Pairs with fewer than
    /// `minimum_liquidity_providers` LPs must also hold at least
    /// `minimum_usd_threshold_new_pairs` of whitelisted reserves (one side is
    /// doubled when only one token is whitelisted).
    pub fn get_tracked_volume_usd<S: Store>(
        &self,
        store: &S,
        token_amount0: &BigDecimal,
        token0: &Token,
        token_amount1: &BigDecimal,
        token1: &Token,
        pair: &Pair,
    ) -> Result<BigDecimal> {
        let (price0, price1) = self.token_prices_usd(store, token0, token1)?;
        let config = self.config();

        // Usually rebasing tokens
        if config.is_untracked_pair(&pair.id) {
            return Ok(BigDecimal::zero());
        }

        let whitelisted = (config.is_whitelisted(&token0.id), config.is_whitelisted(&token1.id));

        if pair.liquidity_provider_count < config.minimum_liquidity_providers {
            let reserve0_usd = &pair.reserve0 * &price0;
            let reserve1_usd = &pair.reserve1 * &price1;

            let trusted_reserve_usd = match whitelisted {
                (true, true) => Some(reserve0_usd + reserve1_usd),
                (true, false) => Some(reserve0_usd * BigDecimal::from(2)),
                (false, true) => Some(reserve1_usd * BigDecimal::from(2)),
                (false, false) => None,
            };

            if let Some(reserve_usd) = trusted_reserve_usd {
                if reserve_usd < config.minimum_usd_threshold_new_pairs {
                    return Ok(BigDecimal::zero());
                }
            }
        }

        let volume = match whitelisted {
            (true, true) => {
                (token_amount0 * &price0 + token_amount1 * &price1) / BigDecimal::from(2)
            },
            (true, false) => token_amount0 * &price0,
            (false, true) => token_amount1 * &price1,
            (false, false) => BigDecimal::zero(),
        };

        Ok(volume)
    }

    /// Tracked USD liquidity of a pool's reserves.
    ///
    /// - Both tokens whitelisted → sum of both sides
    /// - One token whitelisted → that side doubled
    /// - Neither → 0
    pub fn get_tracked_liquidity_usd<S: Store>(
        &self,
        store: &S,
        token_amount0: &BigDecimal,
        token0: &Token,
        token_amount1: &BigDecimal,
        token1: &Token,
    ) -> Result<BigDecimal> {
        let (price0, price1) = self.token_prices_usd(store, token0, token1)?;
        let config = self.config();

        let liquidity = match (config.is_whitelisted(&token0.id), config.is_whitelisted(&token1.id)) {
            (true, true) => token_amount0 * &price0 + token_amount1 * &price1,
            (true, false) => token_amount0 * &price0 * BigDecimal::from(2),
            (false, true) => token_amount1 * &price1 * BigDecimal::from(2),
            (false, false) => BigDecimal::zero(),
        };

        Ok(liquidity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{constants::*, PricingConfig, PricingSettings},
        db::{models::Bundle, MemoryStore, StoreWriter},
        worker::{
            price_resolver::tests::{dec, pair, token, DAI, SHIB},
            PairRegistry,
        },
    };
    use std::sync::Arc;

    const TRACKED_PAIR: &str = "0xcccccccccccccccccccccccccccccccccccccccc";

    fn store_with_eth_price(eth_price: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        let mut bundle = Bundle::new();
        bundle.eth_price = dec(eth_price);
        store.save_bundle(bundle);
        store
    }

    fn resolver_with(settings: PricingSettings) -> PriceResolver<PairRegistry> {
        let config = PricingConfig::try_from(&settings).unwrap();
        PriceResolver::new(Arc::new(config), PairRegistry::new())
    }

    fn resolver() -> PriceResolver<PairRegistry> {
        resolver_with(PricingSettings::default())
    }

    fn mature_pair(token0: &str, token1: &str) -> Pair {
        let mut pair = pair(TRACKED_PAIR, token0, token1, "1000", "1000");
        pair.liquidity_provider_count = 10;
        pair
    }

    #[test]
    fn test_volume_both_whitelisted_is_average() {
        let store = store_with_eth_price("1");
        let token0 = token(USDC_ADDRESS, Some("1"));
        let token1 = token(WETH_ADDRESS, Some("1"));
        let pair = mature_pair(USDC_ADDRESS, WETH_ADDRESS);

        let volume = resolver()
            .get_tracked_volume_usd(&store, &dec("100"), &token0, &dec("100"), &token1, &pair)
            .unwrap();
        assert_eq!(volume, dec("100"));
    }

    #[test]
    fn test_volume_only_token0_whitelisted() {
        let store = store_with_eth_price("1");
        let token0 = token(USDC_ADDRESS, Some("2"));
        let token1 = token(DAI, Some("1000"));
        let pair = mature_pair(USDC_ADDRESS, DAI);

        let resolver = resolver();
        let volume = resolver
            .get_tracked_volume_usd(&store, &dec("50"), &token0, &dec("7"), &token1, &pair)
            .unwrap();
        assert_eq!(volume, dec("100"));

        // token1 side does not matter
        let volume = resolver
            .get_tracked_volume_usd(&store, &dec("50"), &token0, &dec("99999"), &token1, &pair)
            .unwrap();
        assert_eq!(volume, dec("100"));
    }

    #[test]
    fn test_volume_only_token1_whitelisted() {
        let store = store_with_eth_price("2000");
        let token0 = token(DAI, Some("0.0005"));
        let token1 = token(WETH_ADDRESS, Some("1"));
        let pair = mature_pair(DAI, WETH_ADDRESS);

        let volume = resolver()
            .get_tracked_volume_usd(&store, &dec("4000"), &token0, &dec("2"), &token1, &pair)
            .unwrap();
        assert_eq!(volume, dec("4000"));
    }

    #[test]
    fn test_volume_neither_whitelisted_is_zero() {
        let store = store_with_eth_price("1");
        let token0 = token(DAI, Some("1"));
        let token1 = token(SHIB, Some("1"));
        let mut pair = mature_pair(DAI, SHIB);

        let resolver = resolver();
        let volume = resolver
            .get_tracked_volume_usd(&store, &dec("100"), &token0, &dec("100"), &token1, &pair)
            .unwrap();
        assert_eq!(volume, BigDecimal::zero());

        // Young pairs skip the reserve check but still track nothing
        pair.liquidity_provider_count = 1;
        let volume = resolver
            .get_tracked_volume_usd(&store, &dec("100"), &token0, &dec("100"), &token1, &pair)
            .unwrap();
        assert_eq!(volume, BigDecimal::zero());
    }

    #[test]
    fn test_untracked_pair_is_zero() {
        let store = store_with_eth_price("1");
        let token0 = token(USDC_ADDRESS, Some("1"));
        let token1 = token(WETH_ADDRESS, Some("1"));
        let pair = mature_pair(USDC_ADDRESS, WETH_ADDRESS);

        let resolver = resolver_with(PricingSettings {
            untracked_pairs: vec![TRACKED_PAIR.to_uppercase().replace("0X", "0x")],
            ..PricingSettings::default()
        });
        let volume = resolver
            .get_tracked_volume_usd(&store, &dec("100"), &token0, &dec("100"), &token1, &pair)
            .unwrap();
        assert_eq!(volume, BigDecimal::zero());
    }

    #[test]
    fn test_new_pair_threshold_both_whitelisted() {
        let store = store_with_eth_price("1");
        let token0 = token(USDC_ADDRESS, Some("1"));
        let token1 = token(WETH_ADDRESS, Some("1"));
        let resolver = resolver();

        // 199 + 200 = 399 < 400
        let mut young = pair(TRACKED_PAIR, USDC_ADDRESS, WETH_ADDRESS, "199", "200");
        young.liquidity_provider_count = 3;
        let volume = resolver
            .get_tracked_volume_usd(&store, &dec("100"), &token0, &dec("100"), &token1, &young)
            .unwrap();
        assert_eq!(volume, BigDecimal::zero());

        // 200 + 200 = 400 passes
        young.reserve0 = dec("200");
        let volume = resolver
            .get_tracked_volume_usd(&store, &dec("100"), &token0, &dec("100"), &token1, &young)
            .unwrap();
        assert_eq!(volume, dec("100"));

        // Mature pairs skip the check even with tiny reserves
        young.reserve0 = dec("1");
        young.reserve1 = dec("1");
        young.liquidity_provider_count = 5;
        let volume = resolver
            .get_tracked_volume_usd(&store, &dec("100"), &token0, &dec("100"), &token1, &young)
            .unwrap();
        assert_eq!(volume, dec("100"));
    }

    #[test]
    fn test_new_pair_threshold_single_whitelisted_side_is_doubled() {
        let store = store_with_eth_price("1");
        let resolver = resolver();

        // token0 whitelisted: 2 * 199.5 = 399 fails
        let usdc = token(USDC_ADDRESS, Some("1"));
        let dai = token(DAI, Some("1"));
        let mut young = pair(TRACKED_PAIR, USDC_ADDRESS, DAI, "199.5", "1000000");
        young.liquidity_provider_count = 0;
        let volume = resolver
            .get_tracked_volume_usd(&store, &dec("10"), &usdc, &dec("10"), &dai, &young)
            .unwrap();
        assert_eq!(volume, BigDecimal::zero());

        // 2 * 200 = 400 passes
        young.reserve0 = dec("200");
        let volume = resolver
            .get_tracked_volume_usd(&store, &dec("10"), &usdc, &dec("10"), &dai, &young)
            .unwrap();
        assert_eq!(volume, dec("10"));

        // token1 whitelisted: only reserve1 counts
        let mut young = pair(TRACKED_PAIR, DAI, USDC_ADDRESS, "1000000", "150");
        young.liquidity_provider_count = 4;
        let volume = resolver
            .get_tracked_volume_usd(&store, &dec("10"), &dai, &dec("10"), &usdc, &young)
            .unwrap();
        assert_eq!(volume, BigDecimal::zero());
    }

    #[test]
    fn test_volume_requires_bundle() {
        let token0 = token(USDC_ADDRESS, Some("1"));
        let token1 = token(WETH_ADDRESS, Some("1"));
        let pair = mature_pair(USDC_ADDRESS, WETH_ADDRESS);

        let result = resolver().get_tracked_volume_usd(
            &MemoryStore::new(),
            &dec("1"),
            &token0,
            &dec("1"),
            &token1,
            &pair,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_liquidity_both_whitelisted_is_sum() {
        let store = store_with_eth_price("1");
        let token0 = token(USDC_ADDRESS, Some("1"));
        let token1 = token(WETH_ADDRESS, Some("1"));

        let liquidity = resolver()
            .get_tracked_liquidity_usd(&store, &dec("100"), &token0, &dec("50"), &token1)
            .unwrap();
        assert_eq!(liquidity, dec("150"));
    }

    #[test]
    fn test_liquidity_single_whitelisted_is_doubled() {
        let store = store_with_eth_price("1");
        let resolver = resolver();

        let usdc = token(USDC_ADDRESS, Some("3"));
        let dai = token(DAI, Some("1000"));
        let liquidity = resolver
            .get_tracked_liquidity_usd(&store, &dec("10"), &usdc, &dec("5"), &dai)
            .unwrap();
        assert_eq!(liquidity, dec("60"));

        let liquidity = resolver
            .get_tracked_liquidity_usd(&store, &dec("5"), &dai, &dec("10"), &usdc)
            .unwrap();
        assert_eq!(liquidity, dec("60"));
    }

    #[test]
    fn test_liquidity_neither_whitelisted_is_zero() {
        let store = store_with_eth_price("2000");
        let liquidity = resolver()
            .get_tracked_liquidity_usd(
                &store,
                &dec("100"),
                &token(DAI, Some("1")),
                &dec("100"),
                &token(SHIB, Some("1")),
            )
            .unwrap();
        assert_eq!(liquidity, BigDecimal::zero());
    }

    #[test]
    fn test_liquidity_ignores_young_and_untracked_pairs() {
        let store = store_with_eth_price("1");
        let resolver = resolver_with(PricingSettings {
            untracked_pairs: vec![TRACKED_PAIR.to_string()],
            ..PricingSettings::default()
        });
        let liquidity = resolver
            .get_tracked_liquidity_usd(
                &store,
                &dec("1"),
                &token(USDC_ADDRESS, Some("1")),
                &dec("1"),
                &token(WETH_ADDRESS, Some("1")),
            )
            .unwrap();
        assert_eq!(liquidity, dec("2"));
    }
}
