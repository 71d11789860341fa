use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use super::constants::{
    MINIMUM_LIQUIDITY_PROVIDERS, MINIMUM_LIQUIDITY_THRESHOLD_ETH,
    MINIMUM_USD_THRESHOLD_NEW_PAIRS, USDC_ADDRESS, USDC_WETH_PAIR, WETH_ADDRESS,
};

/// Price derivation and volume tracking configuration.
///
/// Thresholds are kept as strings so they round-trip into `BigDecimal`
/// without passing through f64. Validated into a
/// [`PricingConfig`](super::PricingConfig) before use.
#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    #[serde(default = "default_wrapped_native_token")]
    pub wrapped_native_token: String,
    /// Stablecoin/wrapped-native pair used as the ETH/USD source.
    /// The stablecoin must be token0 of this pair.
    #[serde(default = "default_stable_pair_address")]
    pub stable_pair_address: String,
    /// Anchor tokens, in search priority order
    #[serde(default = "default_whitelist")]
    pub whitelist: Vec<String>,
    /// Pairs excluded from tracked volume (usually rebasing tokens)
    #[serde(default)]
    pub untracked_pairs: Vec<String>,
    #[serde(default = "default_minimum_liquidity_threshold_eth")]
    pub minimum_liquidity_threshold_eth: String,
    #[serde(default = "default_minimum_usd_threshold_new_pairs")]
    pub minimum_usd_threshold_new_pairs: String,
    #[serde(default = "default_minimum_liquidity_providers")]
    pub minimum_liquidity_providers: u64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            wrapped_native_token: default_wrapped_native_token(),
            stable_pair_address: default_stable_pair_address(),
            whitelist: default_whitelist(),
            untracked_pairs: Vec::new(),
            minimum_liquidity_threshold_eth: default_minimum_liquidity_threshold_eth(),
            minimum_usd_threshold_new_pairs: default_minimum_usd_threshold_new_pairs(),
            minimum_liquidity_providers: default_minimum_liquidity_providers(),
        }
    }
}

fn default_wrapped_native_token() -> String {
    WETH_ADDRESS.to_string()
}

fn default_stable_pair_address() -> String {
    USDC_WETH_PAIR.to_string()
}

fn default_whitelist() -> Vec<String> {
    vec![WETH_ADDRESS.to_string(), USDC_ADDRESS.to_string()]
}

fn default_minimum_liquidity_threshold_eth() -> String {
    MINIMUM_LIQUIDITY_THRESHOLD_ETH.to_string()
}

fn default_minimum_usd_threshold_new_pairs() -> String {
    MINIMUM_USD_THRESHOLD_NEW_PAIRS.to_string()
}

fn default_minimum_liquidity_providers() -> u64 {
    MINIMUM_LIQUIDITY_PROVIDERS
}

/// Uniswap V2 factory configuration.
///
/// When present, registered pairs are checked against their CREATE2 address.
#[derive(Debug, Deserialize, Clone)]
pub struct FactorySettings {
    pub address: String,
    pub init_code_hash: String,
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub pricing: PricingSettings,
    #[serde(default)]
    pub factory: Option<FactorySettings>,
    /// JSON snapshot of pair/token/bundle records replayed by the binary
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

fn default_snapshot_path() -> String {
    "snapshot.json".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }

    /// Load settings from an in-memory YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?;

        s.try_deserialize()
    }
}
