use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::tokens::TokenDefinition;
use crate::utils::hex_encode;

/// Token metadata and derived price state.
///
/// Primary Key: id (lowercase hex address)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,

    // On-chain metadata (immutable after first fetch)
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub decimals: u8,

    /// Price in wrapped native units. `None` until first derived.
    #[serde(default)]
    pub derived_eth: Option<BigDecimal>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Token {
    pub fn new(id: &str, symbol: String, name: String, decimals: u8) -> Self {
        Self {
            // Always lowercase ids for consistent comparisons
            id: id.to_lowercase(),
            symbol,
            name,
            decimals,
            derived_eth: None,
            updated_at: None,
        }
    }

    pub fn from_definition(definition: &TokenDefinition) -> Self {
        Self::new(
            &hex_encode(definition.address.as_slice()),
            definition.symbol.to_string(),
            definition.name.to_string(),
            definition.decimals,
        )
    }

    /// Derived price with "not yet derived" read as zero.
    pub fn derived_eth_or_zero(&self) -> BigDecimal {
        self.derived_eth.clone().unwrap_or_else(BigDecimal::zero)
    }

    pub fn set_derived_eth(&mut self, derived_eth: BigDecimal) {
        self.derived_eth = Some(derived_eth);
        self.updated_at = Some(Utc::now());
    }

    /// Fill blank metadata from the static definition table.
    ///
    /// Returns true if anything was filled in.
    pub fn fill_missing_metadata(&mut self) -> bool {
        if !self.symbol.is_empty() && !self.name.is_empty() {
            return false;
        }
        let Some(definition) = TokenDefinition::from_id(&self.id) else {
            return false;
        };

        if self.symbol.is_empty() {
            self.symbol = definition.symbol.to_string();
        }
        if self.name.is_empty() {
            self.name = definition.name.to_string();
        }
        self.decimals = definition.decimals;
        true
    }
}
