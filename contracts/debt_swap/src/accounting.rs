use debtswap_interface::{
    math::{bps_share, BPS_DENOMINATOR},
    DebtSwapError, RateMode,
};
use soroban_sdk::{Address, Env};

use crate::helpers::DataProviderClient;

/// How much of a debt position to migrate.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AmountSpec {
    Exact(i128),
    Full,
    /// Share of the current balance in basis points, `1..=10000`.
    Percentage(u32),
}

/// Outstanding `asset` debt of `borrower` at `rate_mode`.
pub fn current_debt(
    env: &Env,
    data_provider: &Address,
    borrower: &Address,
    asset: &Address,
    rate_mode: RateMode,
) -> i128 {
    let data = DataProviderClient::new(env, data_provider).get_user_reserve_data(asset, borrower);
    match rate_mode {
        RateMode::Stable => data.current_stable_debt,
        RateMode::Variable => data.current_variable_debt,
    }
}

/// Turns `spec` into a token amount. An exact amount is not checked against
/// the balance; the lending pool's repay rejects overshoots.
pub fn resolve_amount(
    env: &Env,
    data_provider: &Address,
    borrower: &Address,
    asset: &Address,
    rate_mode: RateMode,
    spec: AmountSpec,
) -> Result<i128, DebtSwapError> {
    let amount = match spec {
        AmountSpec::Exact(amount) => amount,
        AmountSpec::Full => current_debt(env, data_provider, borrower, asset, rate_mode),
        AmountSpec::Percentage(bps) => {
            if bps == 0 || bps as i128 > BPS_DENOMINATOR {
                return Err(DebtSwapError::InvalidAmount);
            }
            let balance = current_debt(env, data_provider, borrower, asset, rate_mode);
            bps_share(balance, bps).ok_or(DebtSwapError::InvalidAmount)?
        }
    };

    if amount <= 0 {
        return Err(DebtSwapError::InvalidAmount);
    }
    Ok(amount)
}
