#![allow(dead_code)]

use debtswap_interface::FlashContext;
use soroban_sdk::{contractclient, contracttype, Address, Env};

/// Per-user reserve view returned by the lending data provider.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserReserveData {
    pub current_stable_debt: i128,
    pub current_variable_debt: i128,
    pub collateral_balance: i128,
}

#[contractclient(name = "DataProviderClient")]
pub trait DataProviderInterface {
    fn get_user_reserve_data(env: Env, asset: Address, user: Address) -> UserReserveData;
}

#[contractclient(name = "ReceiverClient")]
pub trait ReceiverInterface {
    fn open_flash(env: Env, context: FlashContext);
    fn is_idle(env: Env) -> bool;
}
