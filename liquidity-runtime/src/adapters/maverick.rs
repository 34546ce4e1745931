//! Maverick bin-based pools.
//!
//! The per-bin entries are nested records inside a sequence. They reach the
//! encoder as records and are laid out positionally in field order.

use alloy::primitives::{Address, U256};

use super::PoolFamily;
use crate::interfaces;
use crate::types::{ParamBundle, Value};

pub const ADD_EXTRA_PARAMS_STRUCT: &[&str] = &[
    "tuple(address, uint256, uint256, tuple(uint8 kind, int32 pos, bool isDelta, uint128 deltaA, uint128 deltaB)[] maverickParams)",
];

pub const REMOVE_EXTRA_PARAMS_STRUCT: &[&str] =
    &["tuple(address, uint256, uint256, tuple(uint128 binId, uint128 amount)[] maverickParams)"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Maverick;

impl PoolFamily for Maverick {
    fn name(&self) -> &'static str {
        "maverick"
    }

    fn interface_id(&self) -> &'static str {
        interfaces::I_POOL_ADAPTER
    }

    fn add_liquidity_extra_params_struct(&self) -> &'static [&'static str] {
        ADD_EXTRA_PARAMS_STRUCT
    }

    fn remove_liquidity_extra_params_struct(&self) -> &'static [&'static str] {
        REMOVE_EXTRA_PARAMS_STRUCT
    }
}

/// Liquidity delta for one bin. `kind` selects the bin shape, `pos` its tick.
#[derive(Debug, Clone, Copy)]
pub struct BinDelta {
    pub kind: u8,
    pub pos: i32,
    pub is_delta: bool,
    pub delta_a: u128,
    pub delta_b: u128,
}

impl From<BinDelta> for Value {
    fn from(d: BinDelta) -> Self {
        ParamBundle::new()
            .with("kind", d.kind)
            .with("pos", d.pos)
            .with("isDelta", d.is_delta)
            .with("deltaA", d.delta_a)
            .with("deltaB", d.delta_b)
            .into()
    }
}

/// Amount of LP balance to withdraw from one bin.
#[derive(Debug, Clone, Copy)]
pub struct BinWithdrawal {
    pub bin_id: u128,
    pub amount: u128,
}

impl From<BinWithdrawal> for Value {
    fn from(w: BinWithdrawal) -> Self {
        ParamBundle::new()
            .with("binId", w.bin_id)
            .with("amount", w.amount)
            .into()
    }
}

pub fn add_extra_params(
    pool: Address,
    token_id: U256,
    deadline: U256,
    bins: &[BinDelta],
) -> ParamBundle {
    position(pool, token_id, deadline).with("maverickParams", bins.to_vec())
}

pub fn remove_extra_params(
    pool: Address,
    token_id: U256,
    deadline: U256,
    bins: &[BinWithdrawal],
) -> ParamBundle {
    position(pool, token_id, deadline).with("maverickParams", bins.to_vec())
}

fn position(pool: Address, token_id: U256, deadline: U256) -> ParamBundle {
    ParamBundle::new()
        .with("poolAddress", pool)
        .with("tokenId", token_id)
        .with("deadline", deadline)
}
