//! Liquidity adapters for a weiroll-style call planner.
//!
//! Each pool family turns an add/remove liquidity intent into a pending
//! call on its adapter contract: the family's extra parameters are
//! normalized, encoded against its declared tuple schema, and passed as the
//! `extraParams` bytes of `addLiquidity` / `removeLiquidity`.

pub mod adapters;
pub mod call;
pub mod chain;
pub mod config;
pub mod encoder;
pub mod error;
pub mod interfaces;
pub mod normalize;
pub mod planner;
pub mod schema;
pub mod types;

pub use adapters::{
    AddLiquidity, DynLiquidityAdapter, LiquidityAdapter, PoolFamily, PoolKind, RemoveLiquidity,
    build_adapter,
};
pub use call::{CallKind, FunctionCall};
pub use chain::{ChainInteraction, ContractHandle, OfflineChain, ProviderChain};
pub use config::{AdapterDeployment, PlanRequest, PlannerConfig};
pub use error::LiquidityError;
pub use normalize::normalize;
pub use planner::{Plan, Planner};
pub use schema::TupleSchema;
pub use types::{ParamBundle, Value};
