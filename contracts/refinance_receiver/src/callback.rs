use debtswap_interface::DebtSwapError;
use soroban_sdk::{log, token::TokenClient, xdr::ToXdr, Address, Bytes, Env};

use crate::{
    events::ReceiverEvents,
    helpers::LendingPoolClient,
    reentrancy,
    settlement,
    storage::FlashStage,
};

/// Runs one refinance inside the first pool's flash swap.
///
/// `AwaitingCallback -> Repaying -> Borrowing -> Settling -> idle`. Any error
/// reverts the pool's swap and with it the whole refinance.
pub fn on_flash_swap(
    env: &Env,
    initiator: Address,
    token_out: Address,
    amount_out: i128,
    amount_owed: i128,
    fee_owed: i128,
    data: Bytes,
) -> Result<(), DebtSwapError> {
    // Authenticate. The payload must be byte-equal to the armed context;
    // untrusted bytes are never decoded.
    let mut active = reentrancy::enter(env)?;
    let context = active.context.clone();

    if data != context.clone().to_xdr(env) || initiator != context.expected_caller {
        return Err(DebtSwapError::UnauthorizedCallback);
    }
    initiator.require_auth();

    if token_out != context.from_asset || amount_out != context.amount {
        return Err(DebtSwapError::UnauthorizedCallback);
    }
    let first_pool = context
        .path
        .get(0)
        .map(|hop| hop.pool)
        .ok_or(DebtSwapError::UnauthorizedCallback)?;

    let me = env.current_contract_address();
    let lending = LendingPoolClient::new(env, &context.lending_pool);
    let rate_mode = context.rate_mode.code();

    // Repay the old debt with the flash proceeds
    reentrancy::advance(env, &mut active, FlashStage::Repaying);
    log!(env, "refinance: repaying", context.amount);

    TokenClient::new(env, &context.from_asset).approve(
        &me,
        &context.lending_pool,
        &context.amount,
        &env.ledger().sequence(),
    );
    lending.repay(&me, &context.from_asset, &context.amount, &rate_mode, &context.borrower);

    // Open the new debt against the borrower's delegation
    reentrancy::advance(env, &mut active, FlashStage::Borrowing);
    let plan = settlement::plan(env, &context, amount_owed, fee_owed)?;
    log!(env, "refinance: borrowing", plan.borrow_amount);

    let to_token = TokenClient::new(env, &context.to_asset);
    let before = to_token.balance(&me);
    match lending.try_borrow(
        &me,
        &context.to_asset,
        &plan.borrow_amount,
        &rate_mode,
        &context.borrower,
    ) {
        Ok(Ok(())) => {}
        _ => return Err(DebtSwapError::InsufficientDelegation),
    }
    let received = to_token.balance(&me) - before;

    // Pay the pool(s) back
    reentrancy::advance(env, &mut active, FlashStage::Settling);
    log!(env, "refinance: settling", plan.first_hop_owed);
    settlement::settle(env, &context, &first_pool, &plan, received)?;

    reentrancy::release(env);
    ReceiverEvents::refinanced(
        env,
        &context.borrower,
        &context.from_asset,
        &context.to_asset,
        context.amount,
        plan.borrow_amount,
        context.path.len(),
    );
    Ok(())
}
