use soroban_sdk::{contracttype, Address, Env};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day in 5s ledgers
const INSTANCE_BUMP_AMOUNT: u32 = 518400; // ~30 days in 5s ledgers

/// Deployment-time wiring, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    /// Answers debt balance queries (`get_user_reserve_data`).
    pub data_provider: Address,
    pub lending_pool: Address,
    /// AMM factory; pools are looked up here and their addresses derived
    /// from it.
    pub factory: Address,
    /// Reserve asset two-hop paths route through.
    pub intermediary: Address,
    /// Flash-swap receiver. Borrowers delegate credit to this address.
    pub receiver: Address,
}

#[contracttype]
pub enum DataKey {
    Config,
}

pub fn set_config(env: &Env, config: &EngineConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Option<EngineConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
