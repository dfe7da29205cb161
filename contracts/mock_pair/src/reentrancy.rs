use soroban_sdk::Env;

use crate::{
    errors::PairError,
    storage::{get_reentrancy_guard, set_reentrancy_guard, ReentrancyGuard},
};

/// Acquires the swap lock. Reverts with `Locked` if already held.
///
/// A flash-swap recipient cannot re-enter the pool while its callback runs.
/// Any failed invocation rolls back the write, so error paths need no release.
pub fn acquire(env: &Env) -> Result<(), PairError> {
    let guard = get_reentrancy_guard(env);
    if guard.locked {
        return Err(PairError::Locked);
    }
    set_reentrancy_guard(env, &ReentrancyGuard { locked: true });
    Ok(())
}

/// Releases the swap lock once the k check has passed.
pub fn release(env: &Env) {
    set_reentrancy_guard(env, &ReentrancyGuard { locked: false });
}
