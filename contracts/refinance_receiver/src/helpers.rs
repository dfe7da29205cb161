#![allow(dead_code)]

use soroban_sdk::{contractclient, Address, Env};

/// Lending protocol entry points used mid-callback. `rate_mode` is the
/// protocol's numeric tag (1 stable, 2 variable).
#[contractclient(name = "LendingPoolClient")]
pub trait LendingPoolInterface {
    fn borrow(
        env: Env, caller: Address, asset: Address, amount: i128,
        rate_mode: u32, on_behalf_of: Address,
    );
    fn repay(
        env: Env, caller: Address, asset: Address, amount: i128,
        rate_mode: u32, on_behalf_of: Address,
    ) -> i128;
}
