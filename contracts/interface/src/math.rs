//! Integer arithmetic for constant-product quotes and basis-point shares.
//! Every helper returns `None` on overflow or on reserves that cannot serve
//! the request, and leaves the error choice to the caller.

/// Basis point denominator.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Input required to take `amount_out` out of a constant-product pool.
///
/// Formula: amount_in = (reserve_in * amount_out * 10000) /
///                      ((reserve_out - amount_out) * (10000 - fee_bps)) + 1
///
/// The trailing `+ 1` rounds up so the pool's fee-adjusted k check always
/// passes when exactly this much is paid in.
pub fn get_amount_in(
    amount_out: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee_bps: u32,
) -> Option<i128> {
    if amount_out <= 0 || reserve_in <= 0 || reserve_out <= amount_out {
        return None;
    }
    let fee_bps = fee_bps as i128;
    if fee_bps >= BPS_DENOMINATOR {
        return None;
    }

    let numerator = reserve_in
        .checked_mul(amount_out)?
        .checked_mul(BPS_DENOMINATOR)?;
    let denominator = (reserve_out - amount_out).checked_mul(BPS_DENOMINATOR - fee_bps)?;

    (numerator / denominator).checked_add(1)
}

/// Splits the repayment of a flash swap into `(amount_owed, fee_owed)`.
///
/// `amount_owed` is the fee-free constant-product input for `amount_out`;
/// `fee_owed` is what the pool fee adds on top. Their sum equals
/// `get_amount_in(amount_out, reserve_in, reserve_out, fee_bps)`.
pub fn quote_flash_repayment(
    amount_out: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee_bps: u32,
) -> Option<(i128, i128)> {
    let total = get_amount_in(amount_out, reserve_in, reserve_out, fee_bps)?;
    let principal = get_amount_in(amount_out, reserve_in, reserve_out, 0)?;
    Some((principal, total.checked_sub(principal)?))
}

/// `floor(balance * bps / 10000)`.
pub fn bps_share(balance: i128, bps: u32) -> Option<i128> {
    balance
        .checked_mul(bps as i128)
        .map(|v| v / BPS_DENOMINATOR)
}
