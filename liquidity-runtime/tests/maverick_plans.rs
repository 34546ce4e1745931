//! Golden plans for the Maverick adapter.
//!
//! Fixtures live in `tests/fixtures/` and hold the `{commands, state}` plan
//! of a single add or remove call. The target address in each command is
//! ignored when comparing.

use std::sync::Arc;

use alloy::primitives::{Address, U256, address};
use liquidity_runtime::adapters::maverick::Maverick;
use liquidity_runtime::{
    AddLiquidity, LiquidityAdapter, OfflineChain, ParamBundle, Plan, Planner, RemoveLiquidity,
    Value,
};

const ADAPTER: Address = address!("c3B7aF1d8c3ca78F375Eb125F0211164b9071Cc0");
const ONE_ETH: u64 = 1_000_000_000_000_000_000;
const FIVE_ETH: u64 = 5_000_000_000_000_000_000;

fn load_fixture(name: &str) -> Plan {
    let path = format!("{}/tests/fixtures/{name}.json", env!("CARGO_MANIFEST_DIR"));
    let json = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"));
    Plan::from_json(&json).unwrap()
}

fn common_extra_params() -> ParamBundle {
    ParamBundle::new()
        .with("poolAddress", "0x2eBE19AA2e29C8ACaDb14Be3E7De153b0141e2aa")
        .with("tokenId", 0u64)
        .with("deadline", 10_000_000_000_000u64)
}

fn adapter(address: Address) -> LiquidityAdapter<Maverick> {
    LiquidityAdapter::new(Maverick, address, Arc::new(OfflineChain::new())).unwrap()
}

// ── Add liquidity ────────────────────────────────────────────────────────────

fn add_request() -> AddLiquidity {
    let bin = ParamBundle::new()
        .with("kind", 3u8)
        .with("pos", 0i32)
        .with("isDelta", true)
        .with("deltaA", FIVE_ETH)
        .with("deltaB", FIVE_ETH);

    AddLiquidity {
        amounts: vec![U256::from(ONE_ETH), U256::from(ONE_ETH)],
        min_lp_mint_amount: U256::from(1u64),
        extra_params: common_extra_params().with("maverickParams", vec![Value::from(bin)]),
    }
}

#[tokio::test]
async fn test_add_liquidity_matches_fixture() {
    let call = adapter(ADAPTER).add_liquidity(&add_request()).await.unwrap();

    let mut planner = Planner::new();
    planner.add(call);
    let plan = planner.plan().unwrap();

    assert!(plan.matches_fixture(&load_fixture("maverick-add-liquidity")));
}

#[tokio::test]
async fn test_plan_independent_of_deployment_address() {
    let fixture = load_fixture("maverick-add-liquidity");

    for address in [ADAPTER, Address::repeat_byte(0x42)] {
        let call = adapter(address).add_liquidity(&add_request()).await.unwrap();
        let mut planner = Planner::new();
        planner.add(call);
        let plan = planner.plan().unwrap();

        assert!(plan.matches_fixture(&fixture));
        assert!(plan.commands[0].ends_with(&hex_address(address)));
    }
}

#[tokio::test]
async fn test_typed_builder_matches_fixture() {
    use liquidity_runtime::adapters::maverick::{BinDelta, add_extra_params};

    let extra_params = add_extra_params(
        address!("2eBE19AA2e29C8ACaDb14Be3E7De153b0141e2aa"),
        U256::ZERO,
        U256::from(10_000_000_000_000u64),
        &[BinDelta {
            kind: 3,
            pos: 0,
            is_delta: true,
            delta_a: FIVE_ETH.into(),
            delta_b: FIVE_ETH.into(),
        }],
    );
    let request = AddLiquidity {
        extra_params,
        ..add_request()
    };

    let mut planner = Planner::new();
    planner.add(adapter(ADAPTER).add_liquidity(&request).await.unwrap());
    assert!(planner.plan().unwrap().matches_fixture(&load_fixture("maverick-add-liquidity")));
}

// ── Remove liquidity ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_remove_liquidity_matches_fixture() {
    let max_lp_burn_amount = U256::from(FIVE_ETH);
    let extra_params = common_extra_params()
        .extend(&ParamBundle::new().with("tokenId", 400u64))
        .with(
            "maverickParams",
            vec![Value::from(
                ParamBundle::new()
                    .with("binId", 49u64)
                    .with("amount", max_lp_burn_amount),
            )],
        );

    let call = adapter(ADAPTER)
        .remove_liquidity(&RemoveLiquidity {
            amounts: vec![U256::from(ONE_ETH), U256::from(ONE_ETH)],
            max_lp_burn_amount,
            extra_params,
        })
        .await
        .unwrap();

    let mut planner = Planner::new();
    planner.add(call);
    let plan = planner.plan().unwrap();

    assert!(plan.matches_fixture(&load_fixture("maverick-remove-liquidity")));
}

#[tokio::test]
async fn test_fixture_rejects_different_params() {
    let mut request = add_request();
    request.min_lp_mint_amount = U256::from(2u64);

    let mut planner = Planner::new();
    planner.add(adapter(ADAPTER).add_liquidity(&request).await.unwrap());

    assert!(!planner.plan().unwrap().matches_fixture(&load_fixture("maverick-add-liquidity")));
}

fn hex_address(address: Address) -> String {
    alloy::primitives::hex::encode(address)
}
