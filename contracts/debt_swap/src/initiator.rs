use debtswap_interface::{
    amm::{self, AmmPairClient},
    DebtSwapError, FlashContext, Hop, RateMode,
};
use soroban_sdk::{xdr::ToXdr, Address, Env, Vec};

use crate::{helpers::ReceiverClient, storage::EngineConfig};

/// Arms the receiver and draws `amount` of `from_asset` from the first hop.
///
/// The receiver only accepts a callback from the address the factory would
/// have deployed the first pool at, derived here rather than read from the
/// pool or the registry.
#[allow(clippy::too_many_arguments)]
pub fn draw(
    env: &Env,
    config: &EngineConfig,
    borrower: &Address,
    from_asset: &Address,
    to_asset: &Address,
    amount: i128,
    rate_mode: RateMode,
    path: Vec<Hop>,
) -> Result<(), DebtSwapError> {
    let first = path.get(0).ok_or(DebtSwapError::LiquidityPathNotFound)?;
    let expected_caller =
        amm::pair_address(env, &config.factory, &first.token_in, &first.token_out);

    let context = FlashContext {
        borrower: borrower.clone(),
        from_asset: from_asset.clone(),
        to_asset: to_asset.clone(),
        amount,
        rate_mode,
        path,
        expected_caller,
        lending_pool: config.lending_pool.clone(),
    };

    let receiver = ReceiverClient::new(env, &config.receiver);
    receiver.open_flash(&context);

    let (amount_a_out, amount_b_out) = amm::swap_outputs(env, &first.pool, from_asset, amount);
    AmmPairClient::new(env, &first.pool).swap(
        &amount_a_out,
        &amount_b_out,
        &config.receiver,
        &context.to_xdr(env),
    );

    if !receiver.is_idle() {
        return Err(DebtSwapError::FlashNotSettled);
    }
    Ok(())
}
