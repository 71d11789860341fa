use std::str::FromStr;

use alloy::primitives::{Address, B256};
use log::warn;
use rustc_hash::FxHashMap;

use crate::{
    abis::v2,
    utils::{compute_pair_address, hex_encode, ZERO_ADDRESS},
};

/// Resolves the pair between two tokens, the way the factory's `getPair` does.
///
/// Order-independent. `None` means no pair has been created.
pub trait PairLookup {
    fn get_pair(&self, token_a: &str, token_b: &str) -> Option<String>;
}

/// Pair directory built from `PairCreated` logs.
///
/// Answers lookups locally instead of calling the factory contract. When
/// built with a factory, registered pairs are checked against their
/// CREATE2 address.
#[derive(Debug, Clone, Default)]
pub struct PairRegistry {
    pairs: FxHashMap<(String, String), String>,
    factory: Option<(Address, B256)>,
}

impl PairRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factory(factory: Address, init_code_hash: B256) -> Self {
        Self {
            pairs: FxHashMap::default(),
            factory: Some((factory, init_code_hash)),
        }
    }

    /// Record the pair for two tokens. Zero-address pairs are ignored.
    pub fn register(&mut self, token_a: &str, token_b: &str, pair: &str) {
        let pair = pair.to_lowercase();
        if pair == ZERO_ADDRESS {
            return;
        }
        if let Some((factory, init_code_hash)) = self.factory {
            check_pair_address(factory, init_code_hash, token_a, token_b, &pair);
        }
        self.pairs.insert(pair_key(token_a, token_b), pair);
    }

    /// Record the pair announced by a factory `PairCreated` event.
    ///
    /// Returns the pair id.
    pub fn register_pair_created(&mut self, event: &v2::PairCreated) -> String {
        let pair = hex_encode(event.pair.as_slice());
        self.register(
            &hex_encode(event.token0.as_slice()),
            &hex_encode(event.token1.as_slice()),
            &pair,
        );
        pair
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl PairLookup for PairRegistry {
    fn get_pair(&self, token_a: &str, token_b: &str) -> Option<String> {
        self.pairs.get(&pair_key(token_a, token_b)).cloned()
    }
}

/// Warn when a pair does not sit at its CREATE2 address.
fn check_pair_address(
    factory: Address,
    init_code_hash: B256,
    token_a: &str,
    token_b: &str,
    pair: &str,
) {
    let (Ok(token_a), Ok(token_b)) = (Address::from_str(token_a), Address::from_str(token_b)) else {
        warn!("Pair {}: unparseable token address {} / {}", pair, token_a, token_b);
        return;
    };

    let expected = hex_encode(compute_pair_address(factory, token_a, token_b, init_code_hash).as_slice());
    if expected != pair {
        warn!("Pair address mismatch! Registered: {}, Computed: {}", pair, expected);
    }
}

fn pair_key(token_a: &str, token_b: &str) -> (String, String) {
    let a = token_a.to_lowercase();
    let b = token_b.to_lowercase();
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
