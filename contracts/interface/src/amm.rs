use soroban_sdk::{contractclient, xdr::ToXdr, Address, Bytes, BytesN, Env};

#[contractclient(name = "AmmFactoryClient")]
pub trait AmmFactoryInterface {
    fn get_pair(env: Env, token_a: Address, token_b: Address) -> Option<Address>;
}

#[contractclient(name = "AmmPairClient")]
pub trait AmmPairInterface {
    fn swap(env: Env, amount_a_out: i128, amount_b_out: i128, to: Address, data: Bytes);
    fn get_reserves(env: Env) -> (i128, i128, u64);
    fn get_current_fee_bps(env: Env) -> u32;
    fn token_a(env: Env) -> Address;
}

/// Reserves of one pool oriented along a hop, plus its current fee.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSnapshot {
    pub reserve_in: i128,
    pub reserve_out: i128,
    pub fee_bps: u32,
}

/// Sorts token addresses into canonical order.
///
/// Returns tokens in the order (token_0, token_1) where token_0 < token_1.
/// This matches the ordering a factory uses when salting pair deployments.
pub fn sort_tokens(token_a: &Address, token_b: &Address) -> (Address, Address) {
    if token_a < token_b {
        (token_a.clone(), token_b.clone())
    } else {
        (token_b.clone(), token_a.clone())
    }
}

/// Deployment salt of the pair for `(token_a, token_b)`:
/// `sha256(xdr(token_0) || xdr(token_1))`.
pub fn pair_salt(env: &Env, token_a: &Address, token_b: &Address) -> BytesN<32> {
    let (token_0, token_1) = sort_tokens(token_a, token_b);
    let mut salt_data = Bytes::new(env);
    salt_data.append(&token_0.to_xdr(env));
    salt_data.append(&token_1.to_xdr(env));
    env.crypto().sha256(&salt_data).into()
}

/// Address a pair for `(token_a, token_b)` gets when `factory` deploys it.
/// Computed locally; neither the factory nor the pool is consulted.
pub fn pair_address(env: &Env, factory: &Address, token_a: &Address, token_b: &Address) -> Address {
    env.deployer()
        .with_address(factory.clone(), pair_salt(env, token_a, token_b))
        .deployed_address()
}

/// Reads `pool` and orients its reserves so that `token_in` flows in.
pub fn snapshot(env: &Env, pool: &Address, token_in: &Address) -> PoolSnapshot {
    let client = AmmPairClient::new(env, pool);
    let (reserve_a, reserve_b, _) = client.get_reserves();
    let fee_bps = client.get_current_fee_bps();

    if client.token_a() == *token_in {
        PoolSnapshot { reserve_in: reserve_a, reserve_out: reserve_b, fee_bps }
    } else {
        PoolSnapshot { reserve_in: reserve_b, reserve_out: reserve_a, fee_bps }
    }
}

/// `(amount_a_out, amount_b_out)` arguments that take `amount` of
/// `token_out` out of `pool`.
pub fn swap_outputs(env: &Env, pool: &Address, token_out: &Address, amount: i128) -> (i128, i128) {
    if AmmPairClient::new(env, pool).token_a() == *token_out {
        (amount, 0)
    } else {
        (0, amount)
    }
}
