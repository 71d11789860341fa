pub mod pair_lookup;
pub mod price_resolver;
pub mod syncer;
mod tracked;

pub use pair_lookup::{PairLookup, PairRegistry};
pub use price_resolver::PriceResolver;
pub use syncer::PairSyncer;
