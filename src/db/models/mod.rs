mod bundle;
mod liquidity_position;
mod pair;
mod token;

pub use bundle::{Bundle, BUNDLE_ID};
pub use liquidity_position::LiquidityPosition;
pub use pair::Pair;
pub use token::Token;
