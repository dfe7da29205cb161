use soroban_sdk::{contracttype, Address, Vec};

/// Interest mode of a debt position. The discriminants are the lending
/// protocol's own numeric tags and are passed through unchanged.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RateMode {
    Stable = 1,
    Variable = 2,
}

impl RateMode {
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// One pool along a liquidity path. The pool receives `token_in` and
/// releases `token_out`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Hop {
    pub pool: Address,
    pub token_in: Address,
    pub token_out: Address,
}

/// Everything the receiver needs to finish one refinance.
///
/// Armed on the receiver before the flash swap and sent again, XDR-encoded,
/// as the pool's callback payload; the two copies must match.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlashContext {
    pub borrower: Address,
    pub from_asset: Address,
    pub to_asset: Address,
    /// `from_asset` drawn from the first hop and repaid on the old debt.
    pub amount: i128,
    pub rate_mode: RateMode,
    pub path: Vec<Hop>,
    /// Derived address of the first hop pool.
    pub expected_caller: Address,
    pub lending_pool: Address,
}
