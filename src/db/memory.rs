use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{
    models::{Bundle, LiquidityPosition, Pair, Token},
    Store, StoreWriter,
};

/// Serialized store contents, as read and written by the replay binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub pairs: Vec<Pair>,
    #[serde(default)]
    pub bundle: Option<Bundle>,
    #[serde(default)]
    pub liquidity_positions: Vec<LiquidityPosition>,
}

/// In-memory record store.
///
/// Keys are lowercase ids; lookups lowercase their argument so callers may
/// pass checksummed addresses.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pairs: FxHashMap<String, Pair>,
    tokens: FxHashMap<String, Token>,
    bundle: Option<Bundle>,
    liquidity_positions: FxHashMap<String, LiquidityPosition>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot, filling blank token metadata from the
    /// static definition table.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self::new();
        for mut token in snapshot.tokens {
            token.id = token.id.to_lowercase();
            token.fill_missing_metadata();
            store.save_token(token);
        }
        for mut pair in snapshot.pairs {
            pair.id = pair.id.to_lowercase();
            pair.token0 = pair.token0.to_lowercase();
            pair.token1 = pair.token1.to_lowercase();
            store.save_pair(pair);
        }
        for position in snapshot.liquidity_positions {
            store.save_liquidity_position(LiquidityPosition::new(
                &position.pair,
                &position.provider,
            ));
        }
        store.bundle = snapshot.bundle;
        store
    }

    /// Dump the store, with records sorted by id for stable output.
    pub fn to_snapshot(&self) -> Snapshot {
        let mut tokens: Vec<Token> = self.tokens.values().cloned().collect();
        tokens.sort_by(|a, b| a.id.cmp(&b.id));
        let mut pairs: Vec<Pair> = self.pairs.values().cloned().collect();
        pairs.sort_by(|a, b| a.id.cmp(&b.id));
        let mut liquidity_positions: Vec<LiquidityPosition> =
            self.liquidity_positions.values().cloned().collect();
        liquidity_positions.sort_by(|a, b| a.id.cmp(&b.id));

        Snapshot {
            tokens,
            pairs,
            bundle: self.bundle.clone(),
            liquidity_positions,
        }
    }

    pub fn pairs(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.values()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }
}

impl Store for MemoryStore {
    fn pair(&self, id: &str) -> Option<&Pair> {
        self.pairs.get(&id.to_lowercase())
    }

    fn token(&self, id: &str) -> Option<&Token> {
        self.tokens.get(&id.to_lowercase())
    }

    fn bundle(&self) -> Option<&Bundle> {
        self.bundle.as_ref()
    }

    fn liquidity_position(&self, id: &str) -> Option<&LiquidityPosition> {
        self.liquidity_positions.get(&id.to_lowercase())
    }
}

impl StoreWriter for MemoryStore {
    fn save_pair(&mut self, pair: Pair) {
        self.pairs.insert(pair.id.to_lowercase(), pair);
    }

    fn save_token(&mut self, token: Token) {
        self.tokens.insert(token.id.to_lowercase(), token);
    }

    fn save_bundle(&mut self, bundle: Bundle) {
        self.bundle = Some(bundle);
    }

    fn save_liquidity_position(&mut self, position: LiquidityPosition) {
        self.liquidity_positions
            .insert(position.id.to_lowercase(), position);
    }
}
