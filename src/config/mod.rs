#[allow(clippy::module_inception)]
mod config;
pub mod constants;
mod pricing;
mod whitelist;

pub use self::config::{FactorySettings, PricingSettings, Settings};
pub use pricing::PricingConfig;
pub use whitelist::Whitelist;
