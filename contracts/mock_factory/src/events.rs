use soroban_sdk::{symbol_short, Address, Env};

pub struct FactoryEvents;

impl FactoryEvents {
    /// Topics: `("pair_reg", token_0, token_1)`
    /// Data:   `(pair, pair_index)`
    pub fn pair_registered(
        env: &Env, token_0: &Address, token_1: &Address,
        pair: &Address, pair_index: u32,
    ) {
        env.events().publish(
            (symbol_short!("pair_reg"), token_0.clone(), token_1.clone()),
            (pair.clone(), pair_index),
        );
    }
}
