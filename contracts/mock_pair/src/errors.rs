use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PairError {
    AlreadyInitialized = 100,
    NotInitialized = 101,
    InsufficientLiquidity = 102,
    InsufficientInputAmount = 103,
    InsufficientOutputAmount = 104,
    InvalidK = 105,
    Locked = 106,
    FlashPayloadTooLarge = 108,
    Overflow = 110,
    IdenticalTokens = 114,
    InvalidFee = 115,
    InvalidFlashSwap = 116,
}
