use std::str::FromStr;

use alloy::primitives::{address, Address};

/// Hardcoded token metadata.
///
/// Used as a fallback when `symbol()`/`name()`/`decimals()` calls fail
/// for tokens that do not follow the ERC20 metadata conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDefinition {
    pub address: Address,
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
}

static STATIC_DEFINITIONS: [TokenDefinition; 3] = [
    TokenDefinition {
        address: address!("3355df6d4c9c3035724fd0e3914de96a5a83aaf4"),
        symbol: "USDC",
        name: "USD Coin",
        decimals: 6,
    },
    TokenDefinition {
        address: address!("59ac51cfb025adce007d1ec96a21f7c7e3f32330"),
        symbol: "USDT",
        name: "Tether USD",
        decimals: 18,
    },
    TokenDefinition {
        address: address!("5aea5775959fbc2557cc8789bc1bf90a239d9a91"),
        symbol: "WETH",
        name: "Wrapped Ether",
        decimals: 18,
    },
];

impl TokenDefinition {
    /// All tokens with a static definition.
    pub fn static_definitions() -> &'static [TokenDefinition] {
        &STATIC_DEFINITIONS
    }

    pub fn from_address(address: &Address) -> Option<&'static TokenDefinition> {
        STATIC_DEFINITIONS
            .iter()
            .find(|definition| definition.address == *address)
    }

    /// Same as [`from_address`](Self::from_address) for a hex string id.
    /// Unparseable ids have no definition.
    pub fn from_id(id: &str) -> Option<&'static TokenDefinition> {
        let address = Address::from_str(id).ok()?;
        Self::from_address(&address)
    }
}
