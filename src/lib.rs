pub mod abis;
pub mod config;
pub mod db;
pub mod tokens;
pub mod utils;
pub mod worker;

pub use crate::config::{PricingConfig, Settings, Whitelist};
pub use db::{MemoryStore, Snapshot, Store, StoreWriter};
pub use tokens::TokenDefinition;
pub use worker::{PairLookup, PairRegistry, PairSyncer, PriceResolver};
