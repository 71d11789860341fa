use std::{fs, str::FromStr, sync::Arc};

use alloy::primitives::{Address, B256};
use anyhow::Context;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use pairwise::{
    MemoryStore, PairRegistry, PairSyncer, PriceResolver, PricingConfig, Settings, Snapshot,
};

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .context("Failed to initialize logger")?;

    // Load configuration
    let settings = Settings::new()
        .context("Failed to load config.yaml. Please ensure it exists and is valid")?;
    let config = Arc::new(
        PricingConfig::try_from(&settings.pricing).context("Invalid pricing configuration")?,
    );

    // First argument overrides the configured snapshot
    let snapshot_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| settings.snapshot_path.clone());

    let raw = fs::read_to_string(&snapshot_path)
        .with_context(|| format!("Failed to read snapshot {}", snapshot_path))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot {}", snapshot_path))?;

    let mut registry = match &settings.factory {
        Some(factory) => PairRegistry::with_factory(
            Address::from_str(&factory.address).context("Invalid factory address")?,
            B256::from_str(&factory.init_code_hash).context("Invalid factory init code hash")?,
        ),
        None => PairRegistry::new(),
    };
    for pair in &snapshot.pairs {
        registry.register(&pair.token0, &pair.token1, &pair.id);
    }

    let mut store = MemoryStore::from_snapshot(snapshot);
    info!(
        "Loaded {} pairs and {} tokens from {}",
        registry.len(),
        store.tokens().count(),
        snapshot_path
    );

    let syncer = PairSyncer::new(PriceResolver::new(config, registry));
    let derived = syncer
        .refresh_prices(&mut store)
        .context("Failed to refresh prices")?;
    info!("Derived prices for {} tokens", derived);

    let snapshot = store.to_snapshot();
    for pair in &snapshot.pairs {
        info!(
            "Pair {}: reserve_usd={} tracked_reserve_eth={}",
            pair.id, pair.reserve_usd, pair.tracked_reserve_eth
        );
    }

    let output = serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
    println!("{}", output);

    Ok(())
}
