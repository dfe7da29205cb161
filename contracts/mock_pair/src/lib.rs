#![no_std]

//! Constant-product pool standing in for an AMM pair, with
//! Uniswap-V2-style flash swaps. Liquidity is seeded by transferring tokens
//! in and calling `sync`; there is no LP share accounting.

mod errors;
mod events;
mod flash_swap;
mod reentrancy;
mod storage;

#[cfg(test)]
extern crate std; // soroban-sdk testutils require std; pair is no_std so we must opt-in explicitly.


use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Bytes, Env};

use debtswap_interface::{amm::sort_tokens, math::BPS_DENOMINATOR};
pub use errors::PairError;
use events::PairEvents;
use storage::{get_pair_state, set_pair_state, PairStorage};

#[contract]
pub struct MockPair;

#[contractimpl]
impl MockPair {
    pub fn initialize(
        env: Env, factory: Address, token_a: Address,
        token_b: Address, fee_bps: u32,
    ) -> Result<(), PairError> {
        if get_pair_state(&env).is_some() {
            return Err(PairError::AlreadyInitialized);
        }
        if token_a == token_b {
            return Err(PairError::IdenticalTokens);
        }
        if fee_bps as i128 >= BPS_DENOMINATOR {
            return Err(PairError::InvalidFee);
        }

        let (token_a, token_b) = sort_tokens(&token_a, &token_b);
        set_pair_state(
            &env,
            &PairStorage {
                factory,
                token_a,
                token_b,
                fee_bps,
                reserve_a: 0,
                reserve_b: 0,
                block_timestamp_last: env.ledger().timestamp(),
                k_last: 0,
            },
        );
        Ok(())
    }

    /// Swaps out `amount_a_out` / `amount_b_out` to `to`.  With a non-empty
    /// `data`, `to` is called back through `on_flash_swap` before the pool
    /// checks that it was paid.
    pub fn swap(
        env: Env, amount_a_out: i128, amount_b_out: i128,
        to: Address, data: Bytes,
    ) -> Result<(), PairError> {
        flash_swap::execute_swap(&env, amount_a_out, amount_b_out, &to, &data)
    }

    /// Sets reserves to the current token balances.
    pub fn sync(env: Env) -> Result<(), PairError> {
        let mut state = get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        let contract = env.current_contract_address();

        state.reserve_a = TokenClient::new(&env, &state.token_a).balance(&contract);
        state.reserve_b = TokenClient::new(&env, &state.token_b).balance(&contract);
        state.block_timestamp_last = env.ledger().timestamp();
        state.k_last = state
            .reserve_a
            .checked_mul(state.reserve_b)
            .ok_or(PairError::Overflow)?;
        set_pair_state(&env, &state);

        PairEvents::sync(&env, state.reserve_a, state.reserve_b);
        Ok(())
    }

    pub fn get_reserves(env: Env) -> Result<(i128, i128, u64), PairError> {
        let state = get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        Ok((state.reserve_a, state.reserve_b, state.block_timestamp_last))
    }

    pub fn get_current_fee_bps(env: Env) -> Result<u32, PairError> {
        get_pair_state(&env)
            .map(|s| s.fee_bps)
            .ok_or(PairError::NotInitialized)
    }

    pub fn token_a(env: Env) -> Result<Address, PairError> {
        get_pair_state(&env)
            .map(|s| s.token_a)
            .ok_or(PairError::NotInitialized)
    }

    pub fn token_b(env: Env) -> Result<Address, PairError> {
        get_pair_state(&env)
            .map(|s| s.token_b)
            .ok_or(PairError::NotInitialized)
    }

    pub fn factory(env: Env) -> Result<Address, PairError> {
        get_pair_state(&env)
            .map(|s| s.factory)
            .ok_or(PairError::NotInitialized)
    }
}
