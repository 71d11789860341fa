pub mod memory;
pub mod models;

pub use memory::{MemoryStore, Snapshot};

use models::{Bundle, LiquidityPosition, Pair, Token};

/// Read access to pair, token, bundle and liquidity position records.
///
/// Lookups are keyed by record id; a miss returns `None`.
pub trait Store {
    fn pair(&self, id: &str) -> Option<&Pair>;
    fn token(&self, id: &str) -> Option<&Token>;
    fn bundle(&self) -> Option<&Bundle>;
    fn liquidity_position(&self, id: &str) -> Option<&LiquidityPosition>;
}

/// Write access, used by the event handlers that own the records.
pub trait StoreWriter: Store {
    fn save_pair(&mut self, pair: Pair);
    fn save_token(&mut self, token: Token);
    fn save_bundle(&mut self, bundle: Bundle);
    fn save_liquidity_position(&mut self, position: LiquidityPosition);
}
