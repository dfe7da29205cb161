use soroban_sdk::contracterror;

/// Failure taxonomy shared by the engine and its flash-swap receiver.
/// Every variant aborts the whole refinance; nothing is retried.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum DebtSwapError {
    AlreadyInitialized = 400,
    NotInitialized = 401,
    InvalidAmount = 402,
    LiquidityPathNotFound = 403,
    UnauthorizedCallback = 404,
    ReentrancyDetected = 405,
    InsufficientDelegation = 406,
    InsufficientSettlement = 407,
    IdenticalAssets = 408,
    FlashNotSettled = 409,
}
