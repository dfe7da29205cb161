use soroban_sdk::{contracttype, Address, Env};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day in 5s ledgers
const INSTANCE_BUMP_AMOUNT: u32 = 518400; // ~30 days in 5s ledgers

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    /// (user, asset, rate mode code)
    Debt(Address, Address, u32),
    /// (user, asset)
    Collateral(Address, Address),
    /// (delegator, delegatee, asset, rate mode code)
    Allowance(Address, Address, Address, u32),
}

fn get_amount(env: &Env, key: &DataKey) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

fn set_amount(env: &Env, key: &DataKey, amount: i128) {
    env.storage().instance().set(key, &amount);
}

pub fn get_debt(env: &Env, user: &Address, asset: &Address, rate_mode: u32) -> i128 {
    get_amount(env, &DataKey::Debt(user.clone(), asset.clone(), rate_mode))
}

pub fn set_debt(env: &Env, user: &Address, asset: &Address, rate_mode: u32, amount: i128) {
    set_amount(env, &DataKey::Debt(user.clone(), asset.clone(), rate_mode), amount);
}

pub fn get_collateral(env: &Env, user: &Address, asset: &Address) -> i128 {
    get_amount(env, &DataKey::Collateral(user.clone(), asset.clone()))
}

pub fn set_collateral(env: &Env, user: &Address, asset: &Address, amount: i128) {
    set_amount(env, &DataKey::Collateral(user.clone(), asset.clone()), amount);
}

pub fn get_allowance(
    env: &Env, delegator: &Address, delegatee: &Address,
    asset: &Address, rate_mode: u32,
) -> i128 {
    let key = DataKey::Allowance(delegator.clone(), delegatee.clone(), asset.clone(), rate_mode);
    get_amount(env, &key)
}

pub fn set_allowance(
    env: &Env, delegator: &Address, delegatee: &Address,
    asset: &Address, rate_mode: u32, amount: i128,
) {
    let key = DataKey::Allowance(delegator.clone(), delegatee.clone(), asset.clone(), rate_mode);
    set_amount(env, &key, amount);
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
