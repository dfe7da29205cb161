use debtswap_interface::{DebtSwapError, FlashContext};
use soroban_sdk::Env;

use crate::storage::{clear_active, get_active, set_active, ActiveFlash, FlashStage};

/// Occupies the slot with `context`. Reverts with `ReentrancyDetected` if
/// another refinance is still in flight.
pub fn arm(env: &Env, context: &FlashContext) -> Result<(), DebtSwapError> {
    if get_active(env).is_some() {
        return Err(DebtSwapError::ReentrancyDetected);
    }
    set_active(
        env,
        &ActiveFlash { context: context.clone(), stage: FlashStage::AwaitingCallback },
    );
    Ok(())
}

/// Claims the armed slot for a callback. Nothing armed means nobody asked
/// for this flash swap; a slot past `AwaitingCallback` means the callback
/// is already running.
pub fn enter(env: &Env) -> Result<ActiveFlash, DebtSwapError> {
    let active = get_active(env).ok_or(DebtSwapError::UnauthorizedCallback)?;
    if active.stage != FlashStage::AwaitingCallback {
        return Err(DebtSwapError::ReentrancyDetected);
    }
    Ok(active)
}

pub fn advance(env: &Env, active: &mut ActiveFlash, stage: FlashStage) {
    active.stage = stage;
    set_active(env, active);
}

/// Back to idle. Failed invocations roll the slot back with everything else.
pub fn release(env: &Env) {
    clear_active(env);
}

pub fn is_idle(env: &Env) -> bool {
    get_active(env).is_none()
}
