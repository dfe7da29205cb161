use debtswap_interface::FlashContext;
use soroban_sdk::{contracttype, Address, Env};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day in 5s ledgers
const INSTANCE_BUMP_AMOUNT: u32 = 518400; // ~30 days in 5s ledgers

/// Where the callback currently is. `Idle` is the absence of an
/// `ActiveFlash`.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FlashStage {
    AwaitingCallback = 1,
    Repaying = 2,
    Borrowing = 3,
    Settling = 4,
}

/// The single in-flight refinance slot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActiveFlash {
    pub context: FlashContext,
    pub stage: FlashStage,
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Engine,
    Active,
}

pub fn get_engine(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Engine)
}

pub fn set_engine(env: &Env, engine: &Address) {
    env.storage().instance().set(&DataKey::Engine, engine);
}

pub fn get_active(env: &Env) -> Option<ActiveFlash> {
    env.storage().instance().get(&DataKey::Active)
}

pub fn set_active(env: &Env, active: &ActiveFlash) {
    env.storage().instance().set(&DataKey::Active, active);
}

pub fn clear_active(env: &Env) {
    env.storage().instance().remove(&DataKey::Active);
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
