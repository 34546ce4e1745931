//! Beethoven pools, which share the Balancer V2 extra-params layout.

use super::PoolFamily;
use super::balancer_v2::EXTRA_PARAMS_STRUCT;
use crate::interfaces;

pub use super::balancer_v2::extra_params;

/// Beethoven X stable pools (Balancer V2 fork on Optimism).
#[derive(Debug, Clone, Copy, Default)]
pub struct Beethoven;

impl PoolFamily for Beethoven {
    fn name(&self) -> &'static str {
        "beethoven"
    }

    fn interface_id(&self) -> &'static str {
        interfaces::BEETHOVEN_ADAPTER
    }

    fn add_liquidity_extra_params_struct(&self) -> &'static [&'static str] {
        EXTRA_PARAMS_STRUCT
    }

    fn remove_liquidity_extra_params_struct(&self) -> &'static [&'static str] {
        EXTRA_PARAMS_STRUCT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{LiquidityAdapter, RemoveLiquidity};
    use crate::chain::OfflineChain;
    use alloy::primitives::{Address, U256, address};
    use std::sync::Arc;

    const POOL: Address = address!("7B50775383d3D6f0215A8F290f2C9e2eEBBEceb2");
    const WSTETH: Address = address!("1F32b1c2345538c0c6f582fCB022739c4A194Ebb");
    const WETH: Address = address!("4200000000000000000000000000000000000006");

    #[tokio::test]
    async fn test_remove_liquidity_binds_beethoven_interface() {
        let chain = Arc::new(OfflineChain::new());
        let adapter = LiquidityAdapter::new(Beethoven, Address::repeat_byte(0x11), chain).unwrap();
        let call = adapter
            .remove_liquidity(&RemoveLiquidity {
                amounts: vec![U256::from(1u64), U256::from(1u64)],
                max_lp_burn_amount: U256::from(10u64).pow(U256::from(18u64)),
                extra_params: extra_params(POOL, &[WSTETH, WETH]),
            })
            .await
            .unwrap();

        assert_eq!(call.signature(), "removeLiquidity(uint256[],uint256,bytes)");
        assert_eq!(call.target(), Address::repeat_byte(0x11));
    }
}
