//! Velodrome (Solidly-style) volatile and stable pairs.

use alloy::primitives::{Address, U256};

use super::PoolFamily;
use crate::interfaces;
use crate::types::ParamBundle;

pub const EXTRA_PARAMS_STRUCT: &[&str] = &[
    "tuple(address tokenA, address tokenB, bool stable, uint256 amountAMin, uint256 amountBMin, uint256 deadline)",
];

/// Velodrome volatile and stable pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Velodrome;

impl PoolFamily for Velodrome {
    fn name(&self) -> &'static str {
        "velodrome"
    }

    fn interface_id(&self) -> &'static str {
        interfaces::VELODROME_ADAPTER
    }

    fn add_liquidity_extra_params_struct(&self) -> &'static [&'static str] {
        EXTRA_PARAMS_STRUCT
    }

    fn remove_liquidity_extra_params_struct(&self) -> &'static [&'static str] {
        EXTRA_PARAMS_STRUCT
    }
}

/// Router parameters for a token pair.
#[derive(Debug, Clone)]
pub struct PairParams {
    pub token_a: Address,
    pub token_b: Address,
    pub stable: bool,
    pub amount_a_min: U256,
    pub amount_b_min: U256,
    pub deadline: U256,
}

impl From<PairParams> for ParamBundle {
    fn from(p: PairParams) -> Self {
        ParamBundle::new()
            .with("tokenA", p.token_a)
            .with("tokenB", p.token_b)
            .with("stable", p.stable)
            .with("amountAMin", p.amount_a_min)
            .with("amountBMin", p.amount_b_min)
            .with("deadline", p.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{AddLiquidity, LiquidityAdapter, encode_extra_params};
    use crate::chain::OfflineChain;
    use crate::schema::TupleSchema;
    use alloy::primitives::address;
    use alloy::sol;
    use alloy::sol_types::SolValue;
    use std::sync::Arc;

    sol! {
        struct VelodromeExtraParams {
            address tokenA;
            address tokenB;
            bool stable;
            uint256 amountAMin;
            uint256 amountBMin;
            uint256 deadline;
        }
    }

    const WETH: Address = address!("4200000000000000000000000000000000000006");
    const FRXETH: Address = address!("E405de8F52ba7559f9df3C368500B6E6ae6Cee49");

    fn pair() -> PairParams {
        PairParams {
            token_a: WETH,
            token_b: FRXETH,
            stable: true,
            amount_a_min: U256::from(1u64),
            amount_b_min: U256::from(1u64),
            deadline: U256::from(1_680_802_264u64),
        }
    }

    #[test]
    fn test_matches_solidity_struct_encoding() {
        let schema = TupleSchema::parse(EXTRA_PARAMS_STRUCT).unwrap();
        let encoded = encode_extra_params(&schema, &pair().into()).unwrap();

        let expected = (VelodromeExtraParams {
            tokenA: WETH,
            tokenB: FRXETH,
            stable: true,
            amountAMin: U256::from(1u64),
            amountBMin: U256::from(1u64),
            deadline: U256::from(1_680_802_264u64),
        },)
            .abi_encode_params();
        assert_eq!(encoded.as_ref(), expected.as_slice());
    }

    #[tokio::test]
    async fn test_add_liquidity_is_deterministic() {
        let chain = Arc::new(OfflineChain::new());
        let adapter = LiquidityAdapter::new(Velodrome, Address::repeat_byte(0x22), chain).unwrap();
        let params = AddLiquidity {
            amounts: vec![U256::from(10u64), U256::from(10u64)],
            min_lp_mint_amount: U256::from(1u64),
            extra_params: pair().into(),
        };

        let first = adapter.add_liquidity(&params).await.unwrap();
        let second = adapter.add_liquidity(&params).await.unwrap();
        assert_eq!(first.calldata(), second.calldata());
        assert_eq!(first.selector(), second.selector());
    }
}
