use soroban_sdk::{symbol_short, Address, Env};

pub struct ReceiverEvents;

impl ReceiverEvents {
    /// Emitted once the old debt is repaid, the new debt opened and the
    /// pool paid.
    ///
    /// Topics: `("refinance", borrower)`
    /// Data:   `(from_asset, to_asset, repaid, borrowed, hops)`
    pub fn refinanced(
        env: &Env,
        borrower: &Address,
        from_asset: &Address,
        to_asset: &Address,
        repaid: i128,
        borrowed: i128,
        hops: u32,
    ) {
        env.events().publish(
            (symbol_short!("refinance"), borrower.clone()),
            (from_asset.clone(), to_asset.clone(), repaid, borrowed, hops),
        );
    }
}
