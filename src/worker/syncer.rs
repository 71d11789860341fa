use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use log::{debug, info};
use num_traits::Zero;

use crate::{
    abis::v2,
    db::{
        models::{LiquidityPosition, Pair, Token},
        MemoryStore, Store, StoreWriter,
    },
    tokens::TokenDefinition,
    utils::{convert_token_to_decimal, hex_encode, reserve_to_decimal, safe_div, ZERO_ADDRESS},
    worker::{PairLookup, PairRegistry, PriceResolver},
};

/// Applies pair events to the store and persists the resolver's outputs.
///
/// This is the single writer of pair, token, bundle and liquidity position
/// records: the resolver computes prices and tracked values, the syncer
/// saves them.
pub struct PairSyncer<L> {
    resolver: PriceResolver<L>,
}

impl<L: PairLookup> PairSyncer<L> {
    pub fn new(resolver: PriceResolver<L>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &PriceResolver<L> {
        &self.resolver
    }

    /// Apply a `Sync` event.
    ///
    /// Updates reserves and exchange rates, refreshes the bundle ETH price,
    /// re-derives both tokens' ETH prices and recomputes the pair's ETH/USD
    /// liquidity. Both tokens are derived against the prices stored before
    /// this event, so token1 never sees token0's new price.
    pub fn handle_sync<S: StoreWriter>(
        &self,
        store: &mut S,
        pair_id: &str,
        reserve0: u128,
        reserve1: u128,
        block_number: u64,
    ) -> Result<()> {
        let mut pair = store
            .pair(pair_id)
            .cloned()
            .with_context(|| format!("Sync for unknown pair {}", pair_id))?;
        let mut token0 = load_token(&*store, &pair.token0)?;
        let mut token1 = load_token(&*store, &pair.token1)?;

        pair.update_reserves(
            reserve_to_decimal(reserve0, token0.decimals),
            reserve_to_decimal(reserve1, token1.decimals),
        );
        pair.block_number = Some(block_number);
        store.save_pair(pair.clone());

        // Reserves of the stable pair may have moved
        let mut bundle = store.bundle().cloned().unwrap_or_default();
        bundle.set_eth_price(self.resolver.get_eth_price_in_usd(&*store));
        store.save_bundle(bundle);

        let derived0 = self.resolver.find_eth_per_token(&*store, &token0)?;
        let derived1 = self.resolver.find_eth_per_token(&*store, &token1)?;
        token0.set_derived_eth(derived0);
        token1.set_derived_eth(derived1);
        store.save_token(token0);
        store.save_token(token1);

        self.refresh_pair_liquidity(&*store, &mut pair)?;
        debug!(
            "Sync {}: reserve_eth {} reserve_usd {} tracked_reserve_eth {}",
            pair.id, pair.reserve_eth, pair.reserve_usd, pair.tracked_reserve_eth
        );
        store.save_pair(pair);

        Ok(())
    }

    pub fn handle_sync_event<S: StoreWriter>(
        &self,
        store: &mut S,
        pair_id: &str,
        event: &v2::Sync,
        block_number: u64,
    ) -> Result<()> {
        let reserve0: u128 = event.reserve0.to();
        let reserve1: u128 = event.reserve1.to();
        self.handle_sync(store, pair_id, reserve0, reserve1, block_number)
    }

    /// Apply a `Swap` event and return its tracked USD volume.
    ///
    /// Untracked volume accumulates the naive average of both sides at their
    /// derived prices, whatever the whitelist says.
    pub fn handle_swap<S: StoreWriter>(
        &self,
        store: &mut S,
        pair_id: &str,
        event: &v2::Swap,
    ) -> Result<BigDecimal> {
        let mut pair = store
            .pair(pair_id)
            .cloned()
            .with_context(|| format!("Swap for unknown pair {}", pair_id))?;
        let token0 = load_token(&*store, &pair.token0)?;
        let token1 = load_token(&*store, &pair.token1)?;
        let eth_price = store
            .bundle()
            .map(|bundle| bundle.eth_price.clone())
            .context("Bundle is not stored")?;

        let amount0_total = convert_token_to_decimal(event.amount0Out, token0.decimals)
            + convert_token_to_decimal(event.amount0In, token0.decimals);
        let amount1_total = convert_token_to_decimal(event.amount1Out, token1.decimals)
            + convert_token_to_decimal(event.amount1In, token1.decimals);

        let derived_amount_eth = (token1.derived_eth_or_zero() * &amount1_total
            + token0.derived_eth_or_zero() * &amount0_total)
            / BigDecimal::from(2);
        let derived_amount_usd = &derived_amount_eth * &eth_price;

        let tracked_amount_usd = self.resolver.get_tracked_volume_usd(
            &*store,
            &amount0_total,
            &token0,
            &amount1_total,
            &token1,
            &pair,
        )?;

        pair.volume_token0 = &pair.volume_token0 + &amount0_total;
        pair.volume_token1 = &pair.volume_token1 + &amount1_total;
        pair.volume_usd = &pair.volume_usd + &tracked_amount_usd;
        pair.untracked_volume_usd = &pair.untracked_volume_usd + &derived_amount_usd;
        pair.tx_count += 1;
        store.save_pair(pair);

        Ok(tracked_amount_usd)
    }

    /// Record that `provider` holds a position in the pair.
    ///
    /// The pair's liquidity provider count only grows, once per distinct
    /// provider. Positions are stored, so a provider is counted once across
    /// restarts. The zero address (mints) and the pair itself (LP tokens
    /// returned for a burn) are not providers. Returns true if this is a new
    /// provider.
    pub fn handle_liquidity_position<S: StoreWriter>(
        &self,
        store: &mut S,
        pair_id: &str,
        provider: &str,
    ) -> Result<bool> {
        let mut pair = store
            .pair(pair_id)
            .cloned()
            .with_context(|| format!("Liquidity position for unknown pair {}", pair_id))?;

        let provider = provider.to_lowercase();
        if provider == ZERO_ADDRESS || provider == pair.id {
            return Ok(false);
        }

        let position = LiquidityPosition::new(&pair.id, &provider);
        if store.liquidity_position(&position.id).is_some() {
            return Ok(false);
        }
        store.save_liquidity_position(position);

        pair.liquidity_provider_count += 1;
        store.save_pair(pair);
        Ok(true)
    }

    /// Recompute the bundle, every token's `derived_eth` and every pair's
    /// liquidity from the stored reserves.
    ///
    /// Pairs are refreshed before and after the tokens so that `reserve_eth`
    /// floors see current values. Whitelist tokens are derived first, in
    /// priority order, then the rest by id. Returns the number of tokens
    /// refreshed.
    pub fn refresh_prices(&self, store: &mut MemoryStore) -> Result<usize> {
        let mut bundle = store.bundle().cloned().unwrap_or_default();
        bundle.set_eth_price(self.resolver.get_eth_price_in_usd(&*store));
        info!("ETH price: {} USD", bundle.eth_price);
        store.save_bundle(bundle);

        self.refresh_all_pairs(store)?;

        let whitelist = &self.resolver.config().whitelist;
        let mut others: Vec<String> = store
            .tokens()
            .filter(|token| !whitelist.contains(&token.id))
            .map(|token| token.id.clone())
            .collect();
        others.sort();

        let order: Vec<String> = whitelist.iter().map(str::to_string).chain(others).collect();

        let mut refreshed = 0;
        for id in order {
            let Some(mut token) = store.token(&id).cloned() else {
                continue;
            };
            let derived_eth = self.resolver.find_eth_per_token(&*store, &token)?;
            info!("{} ({}) derived_eth: {}", token.id, token.symbol, derived_eth);
            token.set_derived_eth(derived_eth);
            store.save_token(token);
            refreshed += 1;
        }

        self.refresh_all_pairs(store)?;

        Ok(refreshed)
    }

    fn refresh_all_pairs(&self, store: &mut MemoryStore) -> Result<()> {
        let pair_ids: Vec<String> = store.pairs().map(|pair| pair.id.clone()).collect();
        for id in pair_ids {
            let Some(mut pair) = store.pair(&id).cloned() else {
                continue;
            };
            self.refresh_pair_liquidity(&*store, &mut pair)?;
            store.save_pair(pair);
        }
        Ok(())
    }

    /// Recompute `reserve_eth`, `reserve_usd` and `tracked_reserve_eth` from
    /// the pair's reserves and the stored token prices.
    fn refresh_pair_liquidity<S: Store>(&self, store: &S, pair: &mut Pair) -> Result<()> {
        let token0 = store
            .token(&pair.token0)
            .with_context(|| format!("Token {} of pair {} is not stored", pair.token0, pair.id))?;
        let token1 = store
            .token(&pair.token1)
            .with_context(|| format!("Token {} of pair {} is not stored", pair.token1, pair.id))?;
        let eth_price = store
            .bundle()
            .map(|bundle| bundle.eth_price.clone())
            .unwrap_or_else(BigDecimal::zero);

        // 0 if neither token is whitelisted
        let tracked_liquidity_usd = self.resolver.get_tracked_liquidity_usd(
            store,
            &pair.reserve0,
            token0,
            &pair.reserve1,
            token1,
        )?;

        pair.tracked_reserve_eth = safe_div(&tracked_liquidity_usd, &eth_price);
        pair.reserve_eth = &pair.reserve0 * token0.derived_eth_or_zero()
            + &pair.reserve1 * token1.derived_eth_or_zero();
        pair.reserve_usd = &pair.reserve_eth * &eth_price;

        Ok(())
    }
}

impl PairSyncer<PairRegistry> {
    /// Apply a factory `PairCreated` event.
    ///
    /// Tokens missing from the store are created from the static definition
    /// table; a token with neither is an error and nothing is written.
    pub fn handle_pair_created<S: StoreWriter>(
        &mut self,
        store: &mut S,
        event: &v2::PairCreated,
        block_number: u64,
    ) -> Result<Pair> {
        let mut new_tokens = Vec::new();
        for address in [event.token0, event.token1] {
            let id = hex_encode(address.as_slice());
            if store.token(&id).is_some() {
                continue;
            }
            let definition = TokenDefinition::from_address(&address)
                .with_context(|| format!("Token {} has no stored or static metadata", id))?;
            new_tokens.push(Token::from_definition(definition));
        }

        for token in new_tokens {
            store.save_token(token);
        }

        self.resolver.lookup_mut().register_pair_created(event);

        let mut pair = Pair::from_pair_created(event);
        pair.block_number = Some(block_number);
        store.save_pair(pair.clone());

        info!("Pair created: {} ({} / {})", pair.id, pair.token0, pair.token1);
        Ok(pair)
    }
}

fn load_token<S: Store>(store: &S, id: &str) -> Result<Token> {
    store
        .token(id)
        .cloned()
        .with_context(|| format!("Token {} is not stored", id))
}
