#![cfg_attr(not(test), no_std)]

//! Pair registry standing in for an AMM factory.
//!
//! A production factory deploys each pair itself, salted by the sorted token
//! pair, so the registered address always equals `pair_address`. This double
//! only records addresses, which lets tests register a pool that does not
//! sit at its derived address.

#[cfg(test)]
extern crate std;

mod errors;
mod events;
mod storage;


use debtswap_interface::amm::{pair_salt, sort_tokens};
use soroban_sdk::{contract, contractimpl, Address, Env};

pub use errors::FactoryError;
use storage::FactoryStorage;

#[contract]
pub struct MockFactory;

#[contractimpl]
impl MockFactory {
    pub fn initialize(env: Env, admin: Address) -> Result<(), FactoryError> {
        if storage::has_factory_storage(&env) {
            return Err(FactoryError::AlreadyInitialized);
        }

        storage::set_factory_storage(&env, &FactoryStorage { admin, pair_count: 0 });
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn register_pair(
        env: Env, token_a: Address, token_b: Address, pair: Address,
    ) -> Result<(), FactoryError> {
        if token_a == token_b {
            return Err(FactoryError::IdenticalTokens);
        }

        let mut factory_storage = storage::get_factory_storage(&env)
            .ok_or(FactoryError::NotInitialized)?;
        factory_storage.admin.require_auth();

        let (token_0, token_1) = sort_tokens(&token_a, &token_b);

        if storage::get_pair(&env, token_0.clone(), token_1.clone()).is_some() {
            return Err(FactoryError::PairExists);
        }

        storage::set_pair(&env, token_0.clone(), token_1.clone(), pair.clone());
        storage::set_pair(&env, token_1.clone(), token_0.clone(), pair.clone());

        let pair_index = factory_storage.pair_count;
        factory_storage.pair_count += 1;
        storage::set_factory_storage(&env, &factory_storage);
        storage::extend_instance_ttl(&env);

        events::FactoryEvents::pair_registered(&env, &token_0, &token_1, &pair, pair_index);

        Ok(())
    }

    pub fn get_pair(env: Env, token_a: Address, token_b: Address) -> Option<Address> {
        storage::get_pair(&env, token_a, token_b)
    }

    /// Address the pair for `(token_a, token_b)` is deployed at by this factory.
    pub fn pair_address(env: Env, token_a: Address, token_b: Address) -> Address {
        env.deployer()
            .with_current_contract(pair_salt(&env, &token_a, &token_b))
            .deployed_address()
    }

    pub fn pair_count(env: Env) -> u32 {
        storage::get_factory_storage(&env).map(|s| s.pair_count).unwrap_or(0)
    }
}
