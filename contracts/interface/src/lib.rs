#![no_std]

pub mod amm;
pub mod errors;
pub mod math;
pub mod types;

#[cfg(test)]
extern crate std;


pub use errors::DebtSwapError;
pub use types::{FlashContext, Hop, RateMode};

use soroban_sdk::{contractclient, Address, Bytes, Env};

/// Flash Swap Receiver Interface.
/// Contracts receiving flash swaps must implement this trait.
/// The pool invokes `on_flash_swap` after the optimistic transfer of
/// `amount_out` of `token_out`, and MUST be paid `amount_owed + fee_owed`
/// of its other token before the callback returns.
#[contractclient(name = "FlashSwapReceiverClient")]
pub trait FlashSwapReceiver {
    fn on_flash_swap(
        env: Env,
        initiator: Address,
        token_out: Address,
        amount_out: i128,
        amount_owed: i128,
        fee_owed: i128,
        data: Bytes,
    ) -> Result<(), DebtSwapError>;
}
