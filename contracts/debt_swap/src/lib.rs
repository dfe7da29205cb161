#![no_std]

//! Debt refinance engine.
//!
//! Moves a borrower's lending-pool debt from one asset to another in a single
//! invocation, funded by an AMM flash swap. The engine resolves the amount,
//! finds a pool path and draws the flash swap; the `refinance_receiver`
//! contract handles the pool's callback, repaying the old debt and opening
//! the new one through the borrower's credit delegation.

mod accounting;
mod events;
mod helpers;
mod initiator;
mod router;
mod storage;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod test;

use accounting::AmountSpec;
use debtswap_interface::{DebtSwapError, Hop, RateMode};
use events::EngineEvents;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Vec};

pub use storage::EngineConfig;

/// Observed change of both debt positions.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapReceipt {
    /// Decrease of the `from_asset` debt.
    pub repaid: i128,
    /// Increase of the `to_asset` debt.
    pub borrowed: i128,
}

fn load_config(env: &Env) -> Result<EngineConfig, DebtSwapError> {
    let config = storage::get_config(env).ok_or(DebtSwapError::NotInitialized)?;
    storage::extend_instance_ttl(env);
    Ok(config)
}

fn execute(
    env: &Env,
    borrower: Address,
    from_asset: Address,
    to_asset: Address,
    rate_mode: RateMode,
    spec: AmountSpec,
) -> Result<SwapReceipt, DebtSwapError> {
    borrower.require_auth();
    let config = load_config(env)?;

    if from_asset == to_asset {
        return Err(DebtSwapError::IdenticalAssets);
    }

    let amount = accounting::resolve_amount(
        env,
        &config.data_provider,
        &borrower,
        &from_asset,
        rate_mode,
        spec,
    )?;

    let path = router::find_path(env, &config, &from_asset, &to_asset)?;
    router::quote_borrow(env, &path, amount)?;

    let debt = |asset: &Address| {
        accounting::current_debt(env, &config.data_provider, &borrower, asset, rate_mode)
    };
    let from_before = debt(&from_asset);
    let to_before = debt(&to_asset);

    initiator::draw(env, &config, &borrower, &from_asset, &to_asset, amount, rate_mode, path)?;

    let receipt = SwapReceipt {
        repaid: from_before - debt(&from_asset),
        borrowed: debt(&to_asset) - to_before,
    };

    EngineEvents::swapped(
        env,
        &borrower,
        &from_asset,
        &to_asset,
        rate_mode.code(),
        receipt.repaid,
        receipt.borrowed,
    );
    Ok(receipt)
}

#[contract]
pub struct DebtSwap;

#[contractimpl]
impl DebtSwap {
    pub fn initialize(env: Env, config: EngineConfig) -> Result<(), DebtSwapError> {
        if storage::has_config(&env) {
            return Err(DebtSwapError::AlreadyInitialized);
        }
        storage::set_config(&env, &config);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    /// Migrates exactly `amount` of `from_asset` debt into `to_asset` debt.
    pub fn swap_debt_token(
        env: Env,
        borrower: Address,
        from_asset: Address,
        to_asset: Address,
        amount: i128,
        rate_mode: RateMode,
    ) -> Result<SwapReceipt, DebtSwapError> {
        execute(&env, borrower, from_asset, to_asset, rate_mode, AmountSpec::Exact(amount))
    }

    /// Migrates the whole current `from_asset` debt.
    pub fn swap_full_debt(
        env: Env,
        borrower: Address,
        from_asset: Address,
        to_asset: Address,
        rate_mode: RateMode,
    ) -> Result<SwapReceipt, DebtSwapError> {
        execute(&env, borrower, from_asset, to_asset, rate_mode, AmountSpec::Full)
    }

    /// Migrates `floor(debt * bps / 10000)`, `bps` in `1..=10000`.
    pub fn swap_partial_debt(
        env: Env,
        borrower: Address,
        from_asset: Address,
        to_asset: Address,
        bps: u32,
        rate_mode: RateMode,
    ) -> Result<SwapReceipt, DebtSwapError> {
        execute(&env, borrower, from_asset, to_asset, rate_mode, AmountSpec::Percentage(bps))
    }

    pub fn get_config(env: Env) -> Result<EngineConfig, DebtSwapError> {
        storage::get_config(&env).ok_or(DebtSwapError::NotInitialized)
    }

    /// Path a migration from `from_asset` to `to_asset` would take right now.
    pub fn find_path(
        env: Env,
        from_asset: Address,
        to_asset: Address,
    ) -> Result<Vec<Hop>, DebtSwapError> {
        let config = storage::get_config(&env).ok_or(DebtSwapError::NotInitialized)?;
        if from_asset == to_asset {
            return Err(DebtSwapError::IdenticalAssets);
        }
        router::find_path(&env, &config, &from_asset, &to_asset)
    }

    /// `to_asset` debt that migrating `amount` of `from_asset` would open at
    /// current reserves.
    pub fn quote(
        env: Env,
        from_asset: Address,
        to_asset: Address,
        amount: i128,
    ) -> Result<i128, DebtSwapError> {
        let config = storage::get_config(&env).ok_or(DebtSwapError::NotInitialized)?;
        if from_asset == to_asset {
            return Err(DebtSwapError::IdenticalAssets);
        }
        if amount <= 0 {
            return Err(DebtSwapError::InvalidAmount);
        }
        let path = router::find_path(&env, &config, &from_asset, &to_asset)?;
        router::quote_borrow(&env, &path, amount)
    }
}
