use soroban_sdk::{symbol_short, Address, Env, Symbol};

pub struct PairEvents;

impl PairEvents {
    /// Emits a `swap` event after a successful swap.
    ///
    /// Topics: `("swap", to)`
    /// Data:   `(amount_a_in, amount_b_in, amount_a_out, amount_b_out, fee_bps)`
    pub fn swap(
        env: &Env,
        to: &Address,
        amount_a_in: i128,
        amount_b_in: i128,
        amount_a_out: i128,
        amount_b_out: i128,
        fee_bps: u32,
    ) {
        env.events().publish(
            (symbol_short!("swap"), to.clone()),
            (amount_a_in, amount_b_in, amount_a_out, amount_b_out, fee_bps),
        );
    }

    pub fn sync(env: &Env, reserve_a: i128, reserve_b: i128) {
        env.events().publish((symbol_short!("sync"),), (reserve_a, reserve_b));
    }

    /// Emits a `flash_swap` event when the optimistic transfer was settled
    /// inside the recipient's callback.
    ///
    /// Topics: `("flash_swap", receiver)`
    /// Data:   `(token_out, amount_out, amount_owed, fee_owed)`
    ///
    /// "flash_swap" is 10 chars, over the 9-char symbol_short! limit.
    pub fn flash_swap(
        env: &Env,
        receiver: &Address,
        token_out: &Address,
        amount_out: i128,
        amount_owed: i128,
        fee_owed: i128,
    ) {
        env.events().publish(
            (Symbol::new(env, "flash_swap"), receiver.clone()),
            (token_out.clone(), amount_out, amount_owed, fee_owed),
        );
    }
}
