use soroban_sdk::{symbol_short, Address, Env};

pub struct LendingEvents;

impl LendingEvents {
    /// Topics: `("deposit", user, asset)`
    /// Data:   `amount`
    pub fn deposit(env: &Env, user: &Address, asset: &Address, amount: i128) {
        env.events()
            .publish((symbol_short!("deposit"), user.clone(), asset.clone()), amount);
    }

    /// Topics: `("borrow", on_behalf_of, asset)`
    /// Data:   `(caller, amount, rate_mode)`
    pub fn borrow(
        env: &Env, caller: &Address, on_behalf_of: &Address,
        asset: &Address, amount: i128, rate_mode: u32,
    ) {
        env.events().publish(
            (symbol_short!("borrow"), on_behalf_of.clone(), asset.clone()),
            (caller.clone(), amount, rate_mode),
        );
    }

    /// Topics: `("repay", on_behalf_of, asset)`
    /// Data:   `(caller, amount, rate_mode)`
    pub fn repay(
        env: &Env, caller: &Address, on_behalf_of: &Address,
        asset: &Address, amount: i128, rate_mode: u32,
    ) {
        env.events().publish(
            (symbol_short!("repay"), on_behalf_of.clone(), asset.clone()),
            (caller.clone(), amount, rate_mode),
        );
    }

    /// Topics: `("delegate", delegator, delegatee)`
    /// Data:   `(asset, rate_mode, amount)`
    pub fn delegate(
        env: &Env, delegator: &Address, delegatee: &Address,
        asset: &Address, rate_mode: u32, amount: i128,
    ) {
        env.events().publish(
            (symbol_short!("delegate"), delegator.clone(), delegatee.clone()),
            (asset.clone(), rate_mode, amount),
        );
    }
}
