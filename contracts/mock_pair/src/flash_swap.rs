use soroban_sdk::{token::TokenClient, Address, Bytes, Env};

use debtswap_interface::{
    math::{quote_flash_repayment, BPS_DENOMINATOR},
    FlashSwapReceiverClient,
};

use crate::{
    errors::PairError,
    events::PairEvents,
    reentrancy,
    storage::{get_pair_state, set_pair_state},
};

/// Maximum allowed byte length for the `data` payload passed to the receiver.
const MAX_PAYLOAD_SIZE: u32 = 1024;

/// Input actually paid in for one token: whatever the balance holds beyond
/// `reserve - amount_out`.
fn amount_in(balance: i128, reserve: i128, amount_out: i128) -> i128 {
    let kept = reserve - amount_out;
    if balance > kept {
        balance - kept
    } else {
        0
    }
}

/// Executes a swap, optionally as a flash swap.
///
/// # Flow
/// 1. **Pre-flight checks**: payload size, amount signs, outputs within
///    reserves.  A flash swap (non-empty `data`) must be single-sided.
/// 2. **Reentrancy guard**: acquired before any token movement.
/// 3. **Optimistic transfer**: send the outputs to `to`.
/// 4. **Callback**: for a flash swap, quote the repayment and call
///    `to.on_flash_swap(...)`.  The receiver MUST pay
///    `amount_owed + fee_owed` of the other token before returning.
/// 5. **Input accounting**: derive inputs from post-callback balances.
/// 6. **k-invariant**: fee-adjusted product must not shrink.
/// 7. **Persist + emit**, then release the lock.
///
/// # Errors
/// | Error                     | Condition                                         |
/// |---------------------------|---------------------------------------------------|
/// | `FlashPayloadTooLarge`    | `data.len() > MAX_PAYLOAD_SIZE` (1024 bytes)      |
/// | `InsufficientOutputAmount`| Both outputs are zero, or either is negative      |
/// | `InvalidFlashSwap`        | Flash swap requested for both tokens at once      |
/// | `NotInitialized`          | Pair storage not yet written by `initialize`      |
/// | `InsufficientLiquidity`   | An output would drain its reserve                 |
/// | `Locked`                  | Reentrancy: a swap is already in progress        |
/// | `InsufficientInputAmount` | Nothing was paid in                               |
/// | `InvalidK`                | Fee-adjusted k is lower than before the swap      |
/// | `Overflow`                | Arithmetic overflow computing quotes or k         |
pub fn execute_swap(
    env: &Env,
    amount_a_out: i128,
    amount_b_out: i128,
    to: &Address,
    data: &Bytes,
) -> Result<(), PairError> {
    // -----------------------------------------------------------------------
    // 1. Pre-flight checks (no state mutation)
    // -----------------------------------------------------------------------

    if data.len() > MAX_PAYLOAD_SIZE {
        return Err(PairError::FlashPayloadTooLarge);
    }

    if amount_a_out < 0 || amount_b_out < 0 {
        return Err(PairError::InsufficientOutputAmount);
    }
    if amount_a_out == 0 && amount_b_out == 0 {
        return Err(PairError::InsufficientOutputAmount);
    }

    let flash = !data.is_empty();
    if flash && amount_a_out > 0 && amount_b_out > 0 {
        return Err(PairError::InvalidFlashSwap);
    }

    let mut state = get_pair_state(env).ok_or(PairError::NotInitialized)?;

    if amount_a_out >= state.reserve_a || amount_b_out >= state.reserve_b {
        return Err(PairError::InsufficientLiquidity);
    }

    // -----------------------------------------------------------------------
    // 2. Reentrancy guard: first state write
    // -----------------------------------------------------------------------

    reentrancy::acquire(env)?;

    // -----------------------------------------------------------------------
    // 3. Optimistic transfer
    // -----------------------------------------------------------------------

    let contract = env.current_contract_address();
    let token_a = TokenClient::new(env, &state.token_a);
    let token_b = TokenClient::new(env, &state.token_b);

    if amount_a_out > 0 {
        token_a.transfer(&contract, to, &amount_a_out);
    }
    if amount_b_out > 0 {
        token_b.transfer(&contract, to, &amount_b_out);
    }

    // -----------------------------------------------------------------------
    // 4. Flash callback
    // -----------------------------------------------------------------------

    let mut flash_quote = None;
    if flash {
        let (token_out, amount_out, reserve_in, reserve_out) = if amount_a_out > 0 {
            (state.token_a.clone(), amount_a_out, state.reserve_b, state.reserve_a)
        } else {
            (state.token_b.clone(), amount_b_out, state.reserve_a, state.reserve_b)
        };

        let (amount_owed, fee_owed) =
            quote_flash_repayment(amount_out, reserve_in, reserve_out, state.fee_bps)
                .ok_or(PairError::Overflow)?;

        // `initiator` is this pair: the receiver authenticates it and pays it.
        FlashSwapReceiverClient::new(env, to).on_flash_swap(
            &contract,
            &token_out,
            &amount_out,
            &amount_owed,
            &fee_owed,
            data,
        );

        flash_quote = Some((token_out, amount_out, amount_owed, fee_owed));
    }

    // -----------------------------------------------------------------------
    // 5. Input accounting
    // -----------------------------------------------------------------------

    let balance_a = token_a.balance(&contract);
    let balance_b = token_b.balance(&contract);

    let amount_a_in = amount_in(balance_a, state.reserve_a, amount_a_out);
    let amount_b_in = amount_in(balance_b, state.reserve_b, amount_b_out);

    if amount_a_in == 0 && amount_b_in == 0 {
        return Err(PairError::InsufficientInputAmount);
    }

    // -----------------------------------------------------------------------
    // 6. k-invariant check (fee charged on inputs only)
    // -----------------------------------------------------------------------

    let fee = state.fee_bps as i128;
    let adjusted_a = balance_a
        .checked_mul(BPS_DENOMINATOR)
        .and_then(|v| v.checked_sub(amount_a_in.checked_mul(fee)?))
        .ok_or(PairError::Overflow)?;
    let adjusted_b = balance_b
        .checked_mul(BPS_DENOMINATOR)
        .and_then(|v| v.checked_sub(amount_b_in.checked_mul(fee)?))
        .ok_or(PairError::Overflow)?;

    let post_k = adjusted_a.checked_mul(adjusted_b).ok_or(PairError::Overflow)?;
    let pre_k = state
        .reserve_a
        .checked_mul(state.reserve_b)
        .and_then(|v| v.checked_mul(BPS_DENOMINATOR * BPS_DENOMINATOR))
        .ok_or(PairError::Overflow)?;

    if post_k < pre_k {
        return Err(PairError::InvalidK);
    }

    // -----------------------------------------------------------------------
    // 7. Persist updated reserves, emit, release
    // -----------------------------------------------------------------------

    state.reserve_a = balance_a;
    state.reserve_b = balance_b;
    state.block_timestamp_last = env.ledger().timestamp();
    state.k_last = balance_a.checked_mul(balance_b).ok_or(PairError::Overflow)?;
    set_pair_state(env, &state);

    if let Some((token_out, amount_out, amount_owed, fee_owed)) = flash_quote {
        PairEvents::flash_swap(env, to, &token_out, amount_out, amount_owed, fee_owed);
    }
    PairEvents::swap(
        env,
        to,
        amount_a_in,
        amount_b_in,
        amount_a_out,
        amount_b_out,
        state.fee_bps,
    );

    reentrancy::release(env);

    Ok(())
}
