use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Key of the singleton bundle record.
pub const BUNDLE_ID: &str = "1";

/// Global ETH price singleton.
///
/// Refreshed from the stable pair once per processed block and read by
/// every USD valuation in that block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default = "default_bundle_id")]
    pub id: String,
    /// USD per wrapped native token
    #[serde(default)]
    pub eth_price: BigDecimal,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_bundle_id() -> String {
    BUNDLE_ID.to_string()
}

impl Bundle {
    pub fn new() -> Self {
        Self {
            id: default_bundle_id(),
            eth_price: BigDecimal::zero(),
            updated_at: None,
        }
    }

    pub fn set_eth_price(&mut self, eth_price: BigDecimal) {
        self.eth_price = eth_price;
        self.updated_at = Some(Utc::now());
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}
