#![no_std]

//! Lending pool double with the debt-position surface the refinance engine
//! talks to: per-rate-mode debt, collateral deposits, and credit delegation.
//!
//! Interest accrual, health factors and liquidations are out of scope; a
//! borrow only needs the pool to hold enough of the asset.

mod errors;
mod events;
mod storage;

#[cfg(test)]
extern crate std;


use soroban_sdk::{contract, contractimpl, contracttype, token::TokenClient, Address, Env};

pub use errors::LendingError;
use events::LendingEvents;

pub const RATE_MODE_STABLE: u32 = 1;
pub const RATE_MODE_VARIABLE: u32 = 2;

/// Per-user view of one reserve.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserReserveData {
    pub current_stable_debt: i128,
    pub current_variable_debt: i128,
    pub collateral_balance: i128,
}

fn check_rate_mode(rate_mode: u32) -> Result<(), LendingError> {
    match rate_mode {
        RATE_MODE_STABLE | RATE_MODE_VARIABLE => Ok(()),
        _ => Err(LendingError::InvalidRateMode),
    }
}

fn check_amount(amount: i128) -> Result<(), LendingError> {
    if amount <= 0 {
        return Err(LendingError::InvalidAmount);
    }
    Ok(())
}

#[contract]
pub struct MockLendingPool;

#[contractimpl]
impl MockLendingPool {
    /// Moves `amount` of `asset` from `from` into the pool as collateral.
    pub fn deposit(env: Env, from: Address, asset: Address, amount: i128) -> Result<(), LendingError> {
        from.require_auth();
        check_amount(amount)?;

        TokenClient::new(&env, &asset).transfer(&from, &env.current_contract_address(), &amount);

        let balance = storage::get_collateral(&env, &from, &asset);
        storage::set_collateral(&env, &from, &asset, balance + amount);
        storage::extend_instance_ttl(&env);

        LendingEvents::deposit(&env, &from, &asset, amount);
        Ok(())
    }

    /// Lends `amount` of `asset` to `caller`, recording the debt against
    /// `on_behalf_of`. Borrowing for someone else consumes the allowance
    /// they delegated to `caller` for this asset and rate mode.
    pub fn borrow(
        env: Env, caller: Address, asset: Address, amount: i128,
        rate_mode: u32, on_behalf_of: Address,
    ) -> Result<(), LendingError> {
        caller.require_auth();
        check_amount(amount)?;
        check_rate_mode(rate_mode)?;

        if caller != on_behalf_of {
            let allowance =
                storage::get_allowance(&env, &on_behalf_of, &caller, &asset, rate_mode);
            if allowance < amount {
                return Err(LendingError::InsufficientDelegation);
            }
            storage::set_allowance(&env, &on_behalf_of, &caller, &asset, rate_mode, allowance - amount);
        }

        let pool = env.current_contract_address();
        let token = TokenClient::new(&env, &asset);
        if token.balance(&pool) < amount {
            return Err(LendingError::InsufficientLiquidity);
        }

        let debt = storage::get_debt(&env, &on_behalf_of, &asset, rate_mode);
        storage::set_debt(&env, &on_behalf_of, &asset, rate_mode, debt + amount);
        storage::extend_instance_ttl(&env);

        token.transfer(&pool, &caller, &amount);

        LendingEvents::borrow(&env, &caller, &on_behalf_of, &asset, amount, rate_mode);
        Ok(())
    }

    /// Pays down `on_behalf_of`'s debt with `caller`'s funds. The pool pulls
    /// the tokens with `transfer_from`, so `caller` must have approved it.
    /// Returns the amount repaid.
    pub fn repay(
        env: Env, caller: Address, asset: Address, amount: i128,
        rate_mode: u32, on_behalf_of: Address,
    ) -> Result<i128, LendingError> {
        caller.require_auth();
        check_amount(amount)?;
        check_rate_mode(rate_mode)?;

        let debt = storage::get_debt(&env, &on_behalf_of, &asset, rate_mode);
        if amount > debt {
            return Err(LendingError::RepayExceedsDebt);
        }

        let pool = env.current_contract_address();
        TokenClient::new(&env, &asset).transfer_from(&pool, &caller, &pool, &amount);

        storage::set_debt(&env, &on_behalf_of, &asset, rate_mode, debt - amount);
        storage::extend_instance_ttl(&env);

        LendingEvents::repay(&env, &caller, &on_behalf_of, &asset, amount, rate_mode);
        Ok(amount)
    }

    /// Lets `delegatee` borrow up to `amount` of `asset` at `rate_mode`
    /// against `delegator`'s position. Overwrites any previous allowance.
    pub fn approve_delegation(
        env: Env, delegator: Address, delegatee: Address,
        asset: Address, rate_mode: u32, amount: i128,
    ) -> Result<(), LendingError> {
        delegator.require_auth();
        check_rate_mode(rate_mode)?;
        if amount < 0 {
            return Err(LendingError::InvalidAmount);
        }

        storage::set_allowance(&env, &delegator, &delegatee, &asset, rate_mode, amount);
        storage::extend_instance_ttl(&env);

        LendingEvents::delegate(&env, &delegator, &delegatee, &asset, rate_mode, amount);
        Ok(())
    }

    pub fn borrow_allowance(
        env: Env, delegator: Address, delegatee: Address,
        asset: Address, rate_mode: u32,
    ) -> i128 {
        storage::get_allowance(&env, &delegator, &delegatee, &asset, rate_mode)
    }

    pub fn get_user_reserve_data(env: Env, asset: Address, user: Address) -> UserReserveData {
        UserReserveData {
            current_stable_debt: storage::get_debt(&env, &user, &asset, RATE_MODE_STABLE),
            current_variable_debt: storage::get_debt(&env, &user, &asset, RATE_MODE_VARIABLE),
            collateral_balance: storage::get_collateral(&env, &user, &asset),
        }
    }
}
