use serde::{Deserialize, Serialize};

/// A provider's position in a pair.
///
/// Primary Key: id (`{pair}-{provider}`, lowercase)
///
/// Only existence matters: one record per distinct provider feeds the
/// pair's `liquidity_provider_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPosition {
    /// Rebuilt from `pair` and `provider` when loaded from a snapshot
    #[serde(default)]
    pub id: String,
    pub pair: String,
    pub provider: String,
}

impl LiquidityPosition {
    pub fn new(pair: &str, provider: &str) -> Self {
        let pair = pair.to_lowercase();
        let provider = provider.to_lowercase();
        Self {
            id: Self::position_id(&pair, &provider),
            pair,
            provider,
        }
    }

    pub fn position_id(pair: &str, provider: &str) -> String {
        format!("{}-{}", pair, provider).to_lowercase()
    }
}
