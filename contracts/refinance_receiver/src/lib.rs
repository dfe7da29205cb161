#![no_std]

//! Flash-swap callback half of the refinance engine.
//!
//! The engine arms this contract with a `FlashContext` through `open_flash`
//! and then draws a flash swap with this contract as recipient. Inside the
//! pool's callback the receiver repays the borrower's old debt, borrows the
//! new asset against the borrower's credit delegation (granted to this
//! contract's address) and pays the pool back.

mod callback;
mod events;
mod helpers;
mod reentrancy;
mod settlement;
mod storage;

#[cfg(test)]
extern crate std;


use debtswap_interface::{DebtSwapError, FlashContext, FlashSwapReceiver};
use soroban_sdk::{contract, contractimpl, Address, Bytes, Env};

pub use storage::{ActiveFlash, FlashStage};

#[contract]
pub struct RefinanceReceiver;

#[contractimpl]
impl RefinanceReceiver {
    /// Binds the receiver to the engine allowed to arm it.
    pub fn initialize(env: Env, engine: Address) -> Result<(), DebtSwapError> {
        if storage::get_engine(&env).is_some() {
            return Err(DebtSwapError::AlreadyInitialized);
        }
        storage::set_engine(&env, &engine);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    /// Arms the slot for the next callback. Engine only.
    pub fn open_flash(env: Env, context: FlashContext) -> Result<(), DebtSwapError> {
        let engine = storage::get_engine(&env).ok_or(DebtSwapError::NotInitialized)?;
        engine.require_auth();

        reentrancy::arm(&env, &context)?;
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn is_idle(env: Env) -> bool {
        reentrancy::is_idle(&env)
    }

    pub fn active_flash(env: Env) -> Option<ActiveFlash> {
        storage::get_active(&env)
    }

    pub fn engine(env: Env) -> Result<Address, DebtSwapError> {
        storage::get_engine(&env).ok_or(DebtSwapError::NotInitialized)
    }
}

#[contractimpl]
impl FlashSwapReceiver for RefinanceReceiver {
    fn on_flash_swap(
        env: Env,
        initiator: Address,
        token_out: Address,
        amount_out: i128,
        amount_owed: i128,
        fee_owed: i128,
        data: Bytes,
    ) -> Result<(), DebtSwapError> {
        callback::on_flash_swap(&env, initiator, token_out, amount_out, amount_owed, fee_owed, data)
    }
}
