//! Balancer V2 meta-stable pools.

use alloy::primitives::Address;

use super::PoolFamily;
use crate::interfaces;
use crate::types::ParamBundle;

/// `(poolAddress, tokens)` for both directions.
pub const EXTRA_PARAMS_STRUCT: &[&str] = &["tuple(address poolAddress, address[] tokens)"];

/// Balancer V2 meta-stable pools.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancerV2MetaStable;

impl PoolFamily for BalancerV2MetaStable {
    fn name(&self) -> &'static str {
        "balancer_v2_meta_stable"
    }

    fn interface_id(&self) -> &'static str {
        interfaces::BALANCER_V2_META_STABLE_POOL_ADAPTER
    }

    fn add_liquidity_extra_params_struct(&self) -> &'static [&'static str] {
        EXTRA_PARAMS_STRUCT
    }

    fn remove_liquidity_extra_params_struct(&self) -> &'static [&'static str] {
        EXTRA_PARAMS_STRUCT
    }
}

/// Build the extra params for a pool and its ordered token list.
pub fn extra_params(pool: Address, tokens: &[Address]) -> ParamBundle {
    ParamBundle::new()
        .with("poolAddress", pool)
        .with("tokens", tokens.to_vec())
}
