use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LendingError {
    InvalidRateMode = 200,
    InvalidAmount = 201,
    InsufficientDelegation = 202,
    InsufficientLiquidity = 203,
    RepayExceedsDebt = 204,
}
