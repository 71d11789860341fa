use std::str::FromStr;

use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use rustc_hash::FxHashSet;

use super::{PricingSettings, Whitelist};
use crate::utils::normalize_address;

/// Validated, immutable pricing configuration.
///
/// Built once from [`PricingSettings`] and shared behind an `Arc` by every
/// component that values tokens. Addresses are normalized to lowercase hex.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub wrapped_native_token: String,
    pub stable_pair_address: String,
    pub whitelist: Whitelist,
    pub untracked_pairs: FxHashSet<String>,
    pub minimum_liquidity_threshold_eth: BigDecimal,
    pub minimum_usd_threshold_new_pairs: BigDecimal,
    pub minimum_liquidity_providers: u64,
}

impl PricingConfig {
    pub fn is_wrapped_native(&self, token: &str) -> bool {
        self.wrapped_native_token.eq_ignore_ascii_case(token)
    }

    pub fn is_whitelisted(&self, token: &str) -> bool {
        self.whitelist.contains(token)
    }

    pub fn is_untracked_pair(&self, pair: &str) -> bool {
        self.untracked_pairs.contains(&pair.to_lowercase())
    }
}

impl TryFrom<&PricingSettings> for PricingConfig {
    type Error = anyhow::Error;

    fn try_from(settings: &PricingSettings) -> Result<Self> {
        let wrapped_native_token = normalize_address(&settings.wrapped_native_token)
            .context("Invalid wrapped_native_token")?;
        let stable_pair_address = normalize_address(&settings.stable_pair_address)
            .context("Invalid stable_pair_address")?;

        let whitelist = settings
            .whitelist
            .iter()
            .map(|token| normalize_address(token))
            .collect::<Result<Vec<_>>>()
            .context("Invalid whitelist entry")?;

        let untracked_pairs = settings
            .untracked_pairs
            .iter()
            .map(|pair| normalize_address(pair))
            .collect::<Result<FxHashSet<_>>>()
            .context("Invalid untracked pair")?;

        let minimum_liquidity_threshold_eth =
            BigDecimal::from_str(&settings.minimum_liquidity_threshold_eth)
                .context("Invalid minimum_liquidity_threshold_eth")?;
        let minimum_usd_threshold_new_pairs =
            BigDecimal::from_str(&settings.minimum_usd_threshold_new_pairs)
                .context("Invalid minimum_usd_threshold_new_pairs")?;

        Ok(Self {
            wrapped_native_token,
            stable_pair_address,
            whitelist: Whitelist::new(whitelist),
            untracked_pairs,
            minimum_liquidity_threshold_eth,
            minimum_usd_threshold_new_pairs,
            minimum_liquidity_providers: settings.minimum_liquidity_providers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::{USDC_ADDRESS, WETH_ADDRESS};

    #[test]
    fn test_default_settings_validate() {
        let config = PricingConfig::try_from(&PricingSettings::default()).unwrap();
        assert_eq!(config.wrapped_native_token, WETH_ADDRESS);
        assert!(config.is_wrapped_native("0x5AEa5775959fBC2557Cc8789bC1bf90A239D9a91"));
        assert!(config.is_whitelisted(USDC_ADDRESS));
        assert_eq!(
            config.minimum_liquidity_threshold_eth,
            BigDecimal::from_str("0.2").unwrap()
        );
        assert_eq!(config.minimum_usd_threshold_new_pairs, BigDecimal::from(400));
        assert_eq!(config.minimum_liquidity_providers, 5);
    }

    #[test]
    fn test_untracked_pairs_are_normalized() {
        let settings = PricingSettings {
            untracked_pairs: vec!["0x9EA3B5B4EC044B70375236A281986106457B20EF".to_string()],
            ..PricingSettings::default()
        };
        let config = PricingConfig::try_from(&settings).unwrap();
        assert!(config.is_untracked_pair("0x9ea3b5b4ec044b70375236a281986106457b20ef"));
        assert!(config.is_untracked_pair("0x9EA3b5b4ec044b70375236a281986106457b20ef"));
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let settings = PricingSettings {
            minimum_liquidity_threshold_eth: "zero point two".to_string(),
            ..PricingSettings::default()
        };
        assert!(PricingConfig::try_from(&settings).is_err());
    }

    #[test]
    fn test_invalid_whitelist_address_is_rejected() {
        let settings = PricingSettings {
            whitelist: vec!["0x1234".to_string()],
            ..PricingSettings::default()
        };
        assert!(PricingConfig::try_from(&settings).is_err());
    }
}
