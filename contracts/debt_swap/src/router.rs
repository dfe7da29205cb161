//! Liquidity path discovery. Paths are recomputed on every call; reserves
//! move between ledgers.

use debtswap_interface::{
    amm::{self, AmmFactoryClient, AmmPairClient},
    math::get_amount_in,
    DebtSwapError, Hop,
};
use soroban_sdk::{vec, Address, Env, Vec};

use crate::storage::EngineConfig;

/// Pool registered for `(token_a, token_b)`, if both its reserves are
/// non-zero.
fn usable_pool(env: &Env, factory: &AmmFactoryClient, token_a: &Address, token_b: &Address) -> Option<Address> {
    let pool = factory.get_pair(token_a, token_b)?;
    let (reserve_a, reserve_b, _) = AmmPairClient::new(env, &pool).get_reserves();
    if reserve_a > 0 && reserve_b > 0 {
        Some(pool)
    } else {
        None
    }
}

/// Finds where to flash-draw `from_asset` against `to_asset`.
///
/// A direct pool always wins. Otherwise the path goes through the configured
/// intermediary: hop 1 draws `from_asset` against the intermediary, hop 2
/// buys that intermediary with `to_asset`.
pub fn find_path(
    env: &Env,
    config: &EngineConfig,
    from_asset: &Address,
    to_asset: &Address,
) -> Result<Vec<Hop>, DebtSwapError> {
    let factory = AmmFactoryClient::new(env, &config.factory);

    if let Some(pool) = usable_pool(env, &factory, from_asset, to_asset) {
        return Ok(vec![
            env,
            Hop { pool, token_in: to_asset.clone(), token_out: from_asset.clone() },
        ]);
    }

    let via = &config.intermediary;
    if via == from_asset || via == to_asset {
        return Err(DebtSwapError::LiquidityPathNotFound);
    }

    match (
        usable_pool(env, &factory, from_asset, via),
        usable_pool(env, &factory, via, to_asset),
    ) {
        (Some(first), Some(second)) => Ok(vec![
            env,
            Hop { pool: first, token_in: via.clone(), token_out: from_asset.clone() },
            Hop { pool: second, token_in: to_asset.clone(), token_out: via.clone() },
        ]),
        _ => Err(DebtSwapError::LiquidityPathNotFound),
    }
}

/// `to_asset` needed to source `amount` of `from_asset` along `path` at
/// current reserves, fees included.
///
/// Doubles as the pre-flight liquidity check: every hop must hold strictly
/// more of its output than is taken from it, or the path is unusable.
pub fn quote_borrow(env: &Env, path: &Vec<Hop>, amount: i128) -> Result<i128, DebtSwapError> {
    if path.is_empty() {
        return Err(DebtSwapError::LiquidityPathNotFound);
    }

    let mut needed = amount;
    for hop in path.iter() {
        let snap = amm::snapshot(env, &hop.pool, &hop.token_in);
        needed = get_amount_in(needed, snap.reserve_in, snap.reserve_out, snap.fee_bps)
            .ok_or(DebtSwapError::LiquidityPathNotFound)?;
    }
    Ok(needed)
}
