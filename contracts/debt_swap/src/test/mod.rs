#![cfg(test)]

// ---------------------------------------------------------------------------
// End-to-end refinance tests
//
// Every collaborator is real contract code registered natively: the mock
// factory and pairs, the mock lending pool (which also serves as data
// provider) and the refinance receiver. Pools sit at the address the factory
// derives for their token pair, like factory-deployed pairs would.
//
// Pools:   DAI/USDC   USDC/WETH   WETH/WMATIC   LINK/WETH
// WETH is the configured intermediary.
// ---------------------------------------------------------------------------

use soroban_sdk::{
    testutils::{Address as _, Events as _},
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

use debtswap_interface::{DebtSwapError, RateMode};
use debtswap_mock_factory::{MockFactory, MockFactoryClient};
use debtswap_mock_lending_pool::{MockLendingPool, MockLendingPoolClient};
use debtswap_mock_pair::{MockPair, MockPairClient};
use debtswap_refinance_receiver::{RefinanceReceiver, RefinanceReceiverClient};

use crate::{DebtSwap, DebtSwapClient, EngineConfig};

const POOL_RESERVE: i128 = 1_000_000_000_000;
const LENDING_LIQUIDITY: i128 = 1_000_000_000_000;
const DEBT: i128 = 100_000_000;
const DELEGATION: i128 = 10 * DEBT;
const FEE_BPS: u32 = 30;

mod lazy_pair_mod {
    use soroban_sdk::{contract, contractimpl, symbol_short, Address, Bytes, Env};

    /// Reports healthy reserves but never calls its flash-swap recipient.
    #[contract]
    pub struct LazyPair;

    #[contractimpl]
    impl LazyPair {
        pub fn init(env: Env, token_a: Address) {
            env.storage().instance().set(&symbol_short!("token_a"), &token_a);
        }

        pub fn token_a(env: Env) -> Address {
            env.storage().instance().get(&symbol_short!("token_a")).unwrap()
        }

        pub fn get_reserves(_env: Env) -> (i128, i128, u64) {
            (1_000_000_000_000, 1_000_000_000_000, 0)
        }

        pub fn get_current_fee_bps(_env: Env) -> u32 {
            30
        }

        pub fn swap(_env: Env, _amount_a_out: i128, _amount_b_out: i128, _to: Address, _data: Bytes) {}
    }
}
use lazy_pair_mod::LazyPair;

struct Setup<'a> {
    env: Env,
    engine_id: Address,
    engine: DebtSwapClient<'a>,
    receiver_id: Address,
    receiver: RefinanceReceiverClient<'a>,
    factory_id: Address,
    factory: MockFactoryClient<'a>,
    lending: MockLendingPoolClient<'a>,
    borrower: Address,
    dai: Address,
    usdc: Address,
    wmatic: Address,
    weth: Address,
    link: Address,
}

impl<'a> Setup<'a> {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.budget().reset_unlimited();

        let admin = Address::generate(&env);
        let token = |env: &Env| env.register_stellar_asset_contract_v2(admin.clone()).address();
        let dai = token(&env);
        let usdc = token(&env);
        let wmatic = token(&env);
        let weth = token(&env);
        let link = token(&env);

        let factory_id = env.register_contract(None, MockFactory);
        let factory = MockFactoryClient::new(&env, &factory_id);
        factory.initialize(&admin);

        let lending_id = env.register_contract(None, MockLendingPool);
        let lending = MockLendingPoolClient::new(&env, &lending_id);
        for asset in [&dai, &usdc, &wmatic, &weth, &link] {
            StellarAssetClient::new(&env, asset).mint(&lending_id, &LENDING_LIQUIDITY);
        }

        let engine_id = env.register_contract(None, DebtSwap);
        let engine = DebtSwapClient::new(&env, &engine_id);
        let receiver_id = env.register_contract(None, RefinanceReceiver);
        let receiver = RefinanceReceiverClient::new(&env, &receiver_id);
        receiver.initialize(&engine_id);

        engine.initialize(&EngineConfig {
            data_provider: lending_id.clone(),
            lending_pool: lending_id.clone(),
            factory: factory_id.clone(),
            intermediary: weth.clone(),
            receiver: receiver_id.clone(),
        });

        // Collateral is not enforced by the lending double; deposited so the
        // position looks like a real one.
        let borrower = Address::generate(&env);
        StellarAssetClient::new(&env, &weth).mint(&borrower, &(50 * DEBT));
        lending.deposit(&borrower, &weth, &(50 * DEBT));

        let setup = Setup {
            env,
            engine_id,
            engine,
            receiver_id,
            receiver,
            factory_id,
            factory,
            lending,
            borrower,
            dai,
            usdc,
            wmatic,
            weth,
            link,
        };

        setup.create_pool(&setup.dai, &setup.usdc);
        setup.create_pool(&setup.usdc, &setup.weth);
        setup.create_pool(&setup.weth, &setup.wmatic);
        setup.create_pool(&setup.link, &setup.weth);
        setup
    }

    /// Registers a funded pair at its derived address.
    fn create_pool(&self, token_a: &Address, token_b: &Address) -> Address {
        let pool = self.factory.pair_address(token_a, token_b);
        self.register_funded_pair(&pool, token_a, token_b, POOL_RESERVE);
        self.factory.register_pair(token_a, token_b, &pool);
        pool
    }

    fn register_funded_pair(&self, pool: &Address, token_a: &Address, token_b: &Address, reserve: i128) {
        self.env.register_contract(Some(pool), MockPair);
        let pair = MockPairClient::new(&self.env, pool);
        pair.initialize(&self.factory_id, token_a, token_b, &FEE_BPS);
        if reserve > 0 {
            StellarAssetClient::new(&self.env, token_a).mint(pool, &reserve);
            StellarAssetClient::new(&self.env, token_b).mint(pool, &reserve);
            pair.sync();
        }
    }

    fn open_debt(&self, asset: &Address, amount: i128, mode: RateMode) {
        self.lending.borrow(&self.borrower, asset, &amount, &mode.code(), &self.borrower);
    }

    fn delegate(&self, asset: &Address, mode: RateMode) {
        self.lending.approve_delegation(
            &self.borrower,
            &self.receiver_id,
            asset,
            &mode.code(),
            &DELEGATION,
        );
    }

    fn debt(&self, asset: &Address, mode: RateMode) -> i128 {
        let data = self.lending.get_user_reserve_data(asset, &self.borrower);
        match mode {
            RateMode::Stable => data.current_stable_debt,
            RateMode::Variable => data.current_variable_debt,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================
mod config {
    use super::*;

    #[test]
    fn get_config_returns_wiring() {
        let s = Setup::new();
        let config = s.engine.get_config();

        assert_eq!(config.factory, s.factory_id);
        assert_eq!(config.intermediary, s.weth);
        assert_eq!(config.receiver, s.receiver_id);
    }

    #[test]
    fn double_initialize_fails() {
        let s = Setup::new();
        let config = s.engine.get_config();

        assert_eq!(s.engine.try_initialize(&config), Err(Ok(DebtSwapError::AlreadyInitialized)));
    }

    #[test]
    fn uninitialized_engine_rejects_swaps() {
        let s = Setup::new();
        let fresh = DebtSwapClient::new(&s.env, &s.env.register_contract(None, DebtSwap));

        let result = fresh.try_swap_full_debt(&s.borrower, &s.dai, &s.usdc, &RateMode::Variable);
        assert_eq!(result, Err(Ok(DebtSwapError::NotInitialized)));
        assert_eq!(fresh.try_get_config(), Err(Ok(DebtSwapError::NotInitialized)));
    }
}

// ============================================================================
// Successful migrations
// ============================================================================
mod migration {
    use super::*;

    #[test]
    fn exact_swap_moves_dai_debt_to_usdc() {
        let s = Setup::new();
        s.open_debt(&s.dai, DEBT, RateMode::Variable);
        s.delegate(&s.usdc, RateMode::Variable);

        let receipt = s.engine.swap_debt_token(
            &s.borrower,
            &s.dai,
            &s.usdc,
            &DEBT,
            &RateMode::Variable,
        );

        assert_eq!(s.debt(&s.dai, RateMode::Variable), 0);
        let usdc_debt = s.debt(&s.usdc, RateMode::Variable);
        assert!(usdc_debt > DEBT, "new debt carries the pool fee");

        assert_eq!(receipt.repaid, DEBT);
        assert_eq!(receipt.borrowed, usdc_debt);
        assert!(s.receiver.is_idle());
    }

    #[test]
    fn full_swap_clears_old_debt() {
        let s = Setup::new();
        s.open_debt(&s.dai, DEBT, RateMode::Variable);
        s.delegate(&s.usdc, RateMode::Variable);

        s.engine.swap_full_debt(&s.borrower, &s.dai, &s.usdc, &RateMode::Variable);

        assert_eq!(s.debt(&s.dai, RateMode::Variable), 0);
        assert!(s.debt(&s.usdc, RateMode::Variable) > 0);
    }

    #[test]
    fn exact_full_balance_matches_full_swap() {
        let exact = Setup::new();
        exact.open_debt(&exact.dai, DEBT, RateMode::Variable);
        exact.delegate(&exact.usdc, RateMode::Variable);
        exact.engine.swap_debt_token(
            &exact.borrower,
            &exact.dai,
            &exact.usdc,
            &DEBT,
            &RateMode::Variable,
        );

        let full = Setup::new();
        full.open_debt(&full.dai, DEBT, RateMode::Variable);
        full.delegate(&full.usdc, RateMode::Variable);
        full.engine.swap_full_debt(&full.borrower, &full.dai, &full.usdc, &RateMode::Variable);

        assert_eq!(exact.debt(&exact.dai, RateMode::Variable), 0);
        assert_eq!(full.debt(&full.dai, RateMode::Variable), 0);
        assert_eq!(
            exact.debt(&exact.usdc, RateMode::Variable),
            full.debt(&full.usdc, RateMode::Variable)
        );
    }

    #[test]
    fn full_percentage_matches_full_swap() {
        let s = Setup::new();
        s.open_debt(&s.dai, DEBT, RateMode::Variable);
        s.delegate(&s.usdc, RateMode::Variable);

        let receipt =
            s.engine.swap_partial_debt(&s.borrower, &s.dai, &s.usdc, &10_000, &RateMode::Variable);

        assert_eq!(receipt.repaid, DEBT);
        assert_eq!(s.debt(&s.dai, RateMode::Variable), 0);
    }

    #[test]
    fn half_usdc_debt_moves_to_wmatic_through_weth() {
        let s = Setup::new();
        s.open_debt(&s.usdc, DEBT, RateMode::Variable);
        s.delegate(&s.wmatic, RateMode::Variable);

        let receipt = s.engine.swap_partial_debt(
            &s.borrower,
            &s.usdc,
            &s.wmatic,
            &5_000,
            &RateMode::Variable,
        );

        let remaining = s.debt(&s.usdc, RateMode::Variable);
        assert!(remaining >= DEBT * 49 / 100 && remaining <= DEBT * 51 / 100);
        assert_eq!(remaining, DEBT - DEBT / 2);
        assert!(s.debt(&s.wmatic, RateMode::Variable) > 0);
        assert_eq!(receipt.borrowed, s.debt(&s.wmatic, RateMode::Variable));

        // Both hops were paid; the receiver keeps nothing.
        for asset in [&s.usdc, &s.weth, &s.wmatic] {
            assert_eq!(TokenClient::new(&s.env, asset).balance(&s.receiver_id), 0);
        }
    }

    #[test]
    fn ninety_percent_leaves_a_tenth() {
        let s = Setup::new();
        s.open_debt(&s.usdc, DEBT, RateMode::Variable);
        s.delegate(&s.wmatic, RateMode::Variable);

        s.engine.swap_partial_debt(&s.borrower, &s.usdc, &s.wmatic, &9_000, &RateMode::Variable);

        let remaining = s.debt(&s.usdc, RateMode::Variable);
        assert!(remaining >= DEBT * 9 / 100 && remaining <= DEBT * 11 / 100);
        assert!(s.debt(&s.wmatic, RateMode::Variable) > 0);
    }

    #[test]
    fn repeated_partial_swaps_compound() {
        let s = Setup::new();
        s.open_debt(&s.usdc, DEBT, RateMode::Variable);
        s.delegate(&s.wmatic, RateMode::Variable);

        s.engine.swap_partial_debt(&s.borrower, &s.usdc, &s.wmatic, &5_000, &RateMode::Variable);
        let after_first = s.debt(&s.usdc, RateMode::Variable);
        s.engine.swap_partial_debt(&s.borrower, &s.usdc, &s.wmatic, &5_000, &RateMode::Variable);

        assert_eq!(s.debt(&s.usdc, RateMode::Variable), after_first - after_first / 2);
    }

    #[test]
    fn stable_link_debt_moves_to_weth() {
        let s = Setup::new();
        s.open_debt(&s.link, DEBT, RateMode::Stable);
        s.delegate(&s.weth, RateMode::Stable);

        s.engine.swap_full_debt(&s.borrower, &s.link, &s.weth, &RateMode::Stable);

        assert_eq!(s.debt(&s.link, RateMode::Stable), 0);
        assert!(s.debt(&s.weth, RateMode::Stable) > 0);
        assert_eq!(s.debt(&s.weth, RateMode::Variable), 0);
    }

    #[test]
    fn quote_matches_opened_debt() {
        let s = Setup::new();
        s.open_debt(&s.usdc, DEBT, RateMode::Variable);
        s.delegate(&s.wmatic, RateMode::Variable);

        let quoted = s.engine.quote(&s.usdc, &s.wmatic, &DEBT);
        let receipt = s.engine.swap_full_debt(&s.borrower, &s.usdc, &s.wmatic, &RateMode::Variable);

        assert_eq!(receipt.borrowed, quoted);
    }

    #[test]
    fn swap_emits_one_engine_event_and_consumes_delegation() {
        let s = Setup::new();
        s.open_debt(&s.dai, DEBT, RateMode::Variable);
        s.delegate(&s.usdc, RateMode::Variable);

        let receipt = s.engine.swap_full_debt(&s.borrower, &s.dai, &s.usdc, &RateMode::Variable);

        let ours = s
            .env
            .events()
            .all()
            .iter()
            .filter(|(id, _, _)| *id == s.engine_id)
            .count();
        assert_eq!(ours, 1, "expected exactly one swapped event");

        let left = s.lending.borrow_allowance(
            &s.borrower,
            &s.receiver_id,
            &s.usdc,
            &RateMode::Variable.code(),
        );
        assert_eq!(left, DELEGATION - receipt.borrowed);
    }
}

// ============================================================================
// Rejected requests
// ============================================================================
mod rejection {
    use super::*;

    #[test]
    fn out_of_range_percentages_are_invalid() {
        let s = Setup::new();
        s.open_debt(&s.dai, DEBT, RateMode::Variable);
        s.delegate(&s.usdc, RateMode::Variable);

        for bps in [0_u32, 10_001] {
            let result = s.engine.try_swap_partial_debt(
                &s.borrower,
                &s.dai,
                &s.usdc,
                &bps,
                &RateMode::Variable,
            );
            assert_eq!(result, Err(Ok(DebtSwapError::InvalidAmount)));
        }
    }

    #[test]
    fn zero_amounts_are_invalid() {
        let s = Setup::new();

        let exact = s.engine.try_swap_debt_token(
            &s.borrower,
            &s.dai,
            &s.usdc,
            &0,
            &RateMode::Variable,
        );
        assert_eq!(exact, Err(Ok(DebtSwapError::InvalidAmount)));

        // No debt to migrate.
        let full = s.engine.try_swap_full_debt(&s.borrower, &s.dai, &s.usdc, &RateMode::Variable);
        assert_eq!(full, Err(Ok(DebtSwapError::InvalidAmount)));
    }

    #[test]
    fn dust_percentage_is_invalid() {
        let s = Setup::new();
        s.open_debt(&s.dai, 5, RateMode::Variable);

        let result =
            s.engine.try_swap_partial_debt(&s.borrower, &s.dai, &s.usdc, &1, &RateMode::Variable);
        assert_eq!(result, Err(Ok(DebtSwapError::InvalidAmount)));
    }

    #[test]
    fn identical_assets_are_rejected() {
        let s = Setup::new();
        s.open_debt(&s.dai, DEBT, RateMode::Variable);

        let result = s.engine.try_swap_full_debt(&s.borrower, &s.dai, &s.dai, &RateMode::Variable);
        assert_eq!(result, Err(Ok(DebtSwapError::IdenticalAssets)));
    }

    #[test]
    fn unroutable_pair_is_rejected() {
        let s = Setup::new();
        s.open_debt(&s.dai, DEBT, RateMode::Variable);
        s.delegate(&s.wmatic, RateMode::Variable);

        // No DAI/WMATIC pool and no DAI/WETH leg.
        let result = s.engine.try_swap_full_debt(&s.borrower, &s.dai, &s.wmatic, &RateMode::Variable);
        assert_eq!(result, Err(Ok(DebtSwapError::LiquidityPathNotFound)));
    }

    #[test]
    fn empty_pool_is_not_routable() {
        let s = Setup::new();
        let pool = s.factory.pair_address(&s.dai, &s.link);
        s.register_funded_pair(&pool, &s.dai, &s.link, 0);
        s.factory.register_pair(&s.dai, &s.link, &pool);

        s.open_debt(&s.dai, DEBT, RateMode::Variable);
        s.delegate(&s.link, RateMode::Variable);

        let result = s.engine.try_swap_full_debt(&s.borrower, &s.dai, &s.link, &RateMode::Variable);
        assert_eq!(result, Err(Ok(DebtSwapError::LiquidityPathNotFound)));
    }

    #[test]
    fn amount_beyond_pool_reserve_is_rejected_before_any_change() {
        let s = Setup::new();
        s.open_debt(&s.dai, DEBT, RateMode::Variable);
        s.delegate(&s.usdc, RateMode::Variable);

        let result = s.engine.try_swap_debt_token(
            &s.borrower,
            &s.dai,
            &s.usdc,
            &POOL_RESERVE,
            &RateMode::Variable,
        );
        assert_eq!(result, Err(Ok(DebtSwapError::LiquidityPathNotFound)));
        assert_eq!(s.debt(&s.dai, RateMode::Variable), DEBT);
        assert!(s.receiver.is_idle());
    }

    #[test]
    fn missing_delegation_leaves_both_debts_unchanged() {
        let s = Setup::new();
        s.open_debt(&s.dai, DEBT, RateMode::Variable);

        let result = s.engine.try_swap_full_debt(&s.borrower, &s.dai, &s.usdc, &RateMode::Variable);
        assert_eq!(result, Err(Ok(DebtSwapError::InsufficientDelegation)));

        assert_eq!(s.debt(&s.dai, RateMode::Variable), DEBT);
        assert_eq!(s.debt(&s.usdc, RateMode::Variable), 0);
        assert!(s.receiver.is_idle());
    }

    #[test]
    fn delegation_for_other_rate_mode_is_not_enough() {
        let s = Setup::new();
        s.open_debt(&s.dai, DEBT, RateMode::Variable);
        s.delegate(&s.usdc, RateMode::Stable);

        let result = s.engine.try_swap_full_debt(&s.borrower, &s.dai, &s.usdc, &RateMode::Variable);
        assert_eq!(result, Err(Ok(DebtSwapError::InsufficientDelegation)));
        assert_eq!(s.debt(&s.dai, RateMode::Variable), DEBT);
    }

    #[test]
    fn pool_off_its_derived_address_cannot_settle() {
        let s = Setup::new();
        let rogue = Address::generate(&s.env);
        s.register_funded_pair(&rogue, &s.dai, &s.wmatic, POOL_RESERVE);
        s.factory.register_pair(&s.dai, &s.wmatic, &rogue);

        s.open_debt(&s.dai, DEBT, RateMode::Variable);
        s.delegate(&s.wmatic, RateMode::Variable);

        let result = s.engine.try_swap_full_debt(&s.borrower, &s.dai, &s.wmatic, &RateMode::Variable);
        assert_eq!(result, Err(Ok(DebtSwapError::UnauthorizedCallback)));

        assert_eq!(s.debt(&s.dai, RateMode::Variable), DEBT);
        assert_eq!(s.debt(&s.wmatic, RateMode::Variable), 0);
        let (reserve_a, reserve_b, _) = MockPairClient::new(&s.env, &rogue).get_reserves();
        assert_eq!((reserve_a, reserve_b), (POOL_RESERVE, POOL_RESERVE));
        assert!(s.receiver.is_idle());
    }

    #[test]
    fn pool_that_skips_the_callback_is_not_settled() {
        let s = Setup::new();
        let lazy = s.factory.pair_address(&s.dai, &s.wmatic);
        s.env.register_contract(Some(&lazy), LazyPair);
        let (token_a, _) = if s.dai < s.wmatic { (&s.dai, &s.wmatic) } else { (&s.wmatic, &s.dai) };
        lazy_pair_mod::LazyPairClient::new(&s.env, &lazy).init(token_a);
        s.factory.register_pair(&s.dai, &s.wmatic, &lazy);

        s.open_debt(&s.dai, DEBT, RateMode::Variable);
        s.delegate(&s.wmatic, RateMode::Variable);

        let result = s.engine.try_swap_full_debt(&s.borrower, &s.dai, &s.wmatic, &RateMode::Variable);
        assert_eq!(result, Err(Ok(DebtSwapError::FlashNotSettled)));
        assert!(s.receiver.is_idle());
    }
}

// ============================================================================
// Route and quote views
// ============================================================================
mod views {
    use super::*;

    #[test]
    fn direct_pool_gives_single_hop() {
        let s = Setup::new();
        let path = s.engine.find_path(&s.dai, &s.usdc);

        assert_eq!(path.len(), 1);
        let hop = path.get(0).unwrap();
        assert_eq!(Some(hop.pool), s.factory.get_pair(&s.dai, &s.usdc));
        assert_eq!(hop.token_in, s.usdc);
        assert_eq!(hop.token_out, s.dai);
    }

    #[test]
    fn missing_direct_pool_routes_through_intermediary() {
        let s = Setup::new();
        let path = s.engine.find_path(&s.usdc, &s.wmatic);

        assert_eq!(path.len(), 2);
        let first = path.get(0).unwrap();
        let second = path.get(1).unwrap();
        assert_eq!(Some(first.pool), s.factory.get_pair(&s.usdc, &s.weth));
        assert_eq!((first.token_in, first.token_out), (s.weth.clone(), s.usdc.clone()));
        assert_eq!(Some(second.pool), s.factory.get_pair(&s.weth, &s.wmatic));
        assert_eq!((second.token_in, second.token_out), (s.wmatic.clone(), s.weth.clone()));
    }

    #[test]
    fn direct_pool_wins_over_two_hop() {
        let s = Setup::new();
        let direct = s.create_pool(&s.usdc, &s.wmatic);

        let path = s.engine.find_path(&s.usdc, &s.wmatic);
        assert_eq!(path.len(), 1);
        assert_eq!(path.get(0).unwrap().pool, direct);
    }

    #[test]
    fn intermediary_endpoint_has_no_two_hop_fallback() {
        let s = Setup::new();
        assert_eq!(
            s.engine.try_find_path(&s.dai, &s.weth),
            Err(Ok(DebtSwapError::LiquidityPathNotFound))
        );
    }

    #[test]
    fn quote_rejects_bad_input() {
        let s = Setup::new();
        assert_eq!(s.engine.try_quote(&s.dai, &s.usdc, &0), Err(Ok(DebtSwapError::InvalidAmount)));
        assert_eq!(s.engine.try_quote(&s.dai, &s.dai, &DEBT), Err(Ok(DebtSwapError::IdenticalAssets)));
        assert_eq!(
            s.engine.try_quote(&s.dai, &s.usdc, &POOL_RESERVE),
            Err(Ok(DebtSwapError::LiquidityPathNotFound))
        );
    }

    #[test]
    fn two_hop_quote_exceeds_direct_quote() {
        let s = Setup::new();
        let direct = s.engine.quote(&s.dai, &s.usdc, &DEBT);
        let two_hop = s.engine.quote(&s.usdc, &s.wmatic, &DEBT);

        assert!(direct > DEBT);
        assert!(two_hop > direct, "two fee layers cost more than one");
    }
}
