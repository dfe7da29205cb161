use soroban_sdk::{symbol_short, Address, Env};

pub struct EngineEvents;

impl EngineEvents {
    /// Topics: `("swapped", borrower)`
    /// Data:   `(from_asset, to_asset, rate_mode, repaid, borrowed)`
    pub fn swapped(
        env: &Env,
        borrower: &Address,
        from_asset: &Address,
        to_asset: &Address,
        rate_mode: u32,
        repaid: i128,
        borrowed: i128,
    ) {
        env.events().publish(
            (symbol_short!("swapped"), borrower.clone()),
            (from_asset.clone(), to_asset.clone(), rate_mode, repaid, borrowed),
        );
    }
}
