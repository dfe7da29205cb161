//! What the new debt has to cover, and paying it back along the path.

use debtswap_interface::{
    amm::{self, AmmPairClient},
    math::get_amount_in,
    DebtSwapError, FlashContext,
};
use soroban_sdk::{token::TokenClient, Address, Bytes, Env};

/// Second-hop leg of a two-hop settlement: `amount_in` of `to_asset` goes
/// into `pool`, which releases the intermediary straight to the first pool.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BridgeLeg {
    pub pool: Address,
    pub intermediary: Address,
    pub amount_in: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettlementPlan {
    /// `to_asset` to borrow on the borrower's behalf.
    pub borrow_amount: i128,
    /// `amount_owed + fee_owed` due to the first hop, in its input token.
    pub first_hop_owed: i128,
    pub bridge: Option<BridgeLeg>,
}

/// Sizes the new debt. A direct path owes the first pool in `to_asset`
/// already; a two-hop path buys the owed intermediary on the second pool at
/// its current reserves.
pub fn plan(
    env: &Env,
    context: &FlashContext,
    amount_owed: i128,
    fee_owed: i128,
) -> Result<SettlementPlan, DebtSwapError> {
    if amount_owed <= 0 || fee_owed < 0 {
        return Err(DebtSwapError::InsufficientSettlement);
    }
    let first_hop_owed = amount_owed
        .checked_add(fee_owed)
        .ok_or(DebtSwapError::InsufficientSettlement)?;

    let Some(hop) = context.path.get(1) else {
        return Ok(SettlementPlan { borrow_amount: first_hop_owed, first_hop_owed, bridge: None });
    };

    let snap = amm::snapshot(env, &hop.pool, &hop.token_in);
    let amount_in = get_amount_in(first_hop_owed, snap.reserve_in, snap.reserve_out, snap.fee_bps)
        .ok_or(DebtSwapError::InsufficientSettlement)?;

    Ok(SettlementPlan {
        borrow_amount: amount_in,
        first_hop_owed,
        bridge: Some(BridgeLeg { pool: hop.pool, intermediary: hop.token_out, amount_in }),
    })
}

/// Pays `first_pool` what it is owed out of the `received` borrow proceeds.
pub fn settle(
    env: &Env,
    context: &FlashContext,
    first_pool: &Address,
    plan: &SettlementPlan,
    received: i128,
) -> Result<(), DebtSwapError> {
    if received < plan.borrow_amount {
        return Err(DebtSwapError::InsufficientSettlement);
    }

    let me = env.current_contract_address();
    let to_token = TokenClient::new(env, &context.to_asset);

    match &plan.bridge {
        None => to_token.transfer(&me, first_pool, &plan.borrow_amount),
        Some(leg) => {
            to_token.transfer(&me, &leg.pool, &leg.amount_in);
            let (amount_a_out, amount_b_out) =
                amm::swap_outputs(env, &leg.pool, &leg.intermediary, plan.first_hop_owed);
            AmmPairClient::new(env, &leg.pool).swap(
                &amount_a_out,
                &amount_b_out,
                first_pool,
                &Bytes::new(env),
            );
        }
    }
    Ok(())
}
