pub mod balancer_v2;
pub mod beethoven;
pub mod curve_v2;
pub mod maverick;
pub mod velodrome;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::call::FunctionCall;
use crate::chain::{ChainInteraction, ContractHandle};
use crate::encoder;
use crate::error::LiquidityError;
use crate::interfaces;
use crate::normalize::normalize;
use crate::schema::TupleSchema;
use crate::types::{ParamBundle, Value};

pub use balancer_v2::BalancerV2MetaStable;
pub use beethoven::Beethoven;
pub use curve_v2::CurveV2FactoryCrypto;
pub use maverick::Maverick;
pub use velodrome::Velodrome;

pub const ADD_LIQUIDITY: &str = "addLiquidity";
pub const REMOVE_LIQUIDITY: &str = "removeLiquidity";

/// What distinguishes one pool family's adapter from another: the contract
/// interface it binds to and its two extra-params struct declarations.
pub trait PoolFamily: Send + Sync + 'static {
    /// Family identifier used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Interface descriptor name, see [`interfaces::lookup`].
    fn interface_id(&self) -> &'static str;

    fn add_liquidity_extra_params_struct(&self) -> &'static [&'static str];

    fn remove_liquidity_extra_params_struct(&self) -> &'static [&'static str];
}

/// Parameters for adding liquidity to a pool.
#[derive(Debug, Clone)]
pub struct AddLiquidity {
    pub amounts: Vec<U256>,
    pub min_lp_mint_amount: U256,
    pub extra_params: ParamBundle,
}

/// Parameters for removing liquidity from a pool.
#[derive(Debug, Clone)]
pub struct RemoveLiquidity {
    pub amounts: Vec<U256>,
    pub max_lp_burn_amount: U256,
    pub extra_params: ParamBundle,
}

/// An adapter contract deployment for one pool family.
///
/// The contract handle is resolved on first use and reused afterwards.
/// Concurrent first users wait on a single resolution; a failed resolution
/// is not cached.
pub struct LiquidityAdapter<F: PoolFamily> {
    family: F,
    address: Address,
    abi: &'static JsonAbi,
    add_schema: TupleSchema,
    remove_schema: TupleSchema,
    chain: Arc<dyn ChainInteraction>,
    handle: OnceCell<ContractHandle>,
}

impl<F: PoolFamily> LiquidityAdapter<F> {
    pub fn new(
        family: F,
        address: Address,
        chain: Arc<dyn ChainInteraction>,
    ) -> Result<Self, LiquidityError> {
        let abi = interfaces::lookup(family.interface_id())?;
        let add_schema = TupleSchema::parse(family.add_liquidity_extra_params_struct())?;
        let remove_schema = TupleSchema::parse(family.remove_liquidity_extra_params_struct())?;

        Ok(Self {
            family,
            address,
            abi,
            add_schema,
            remove_schema,
            chain,
            handle: OnceCell::new(),
        })
    }

    pub fn family(&self) -> &F {
        &self.family
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn add_liquidity_extra_params_struct(&self) -> &TupleSchema {
        &self.add_schema
    }

    pub fn remove_liquidity_extra_params_struct(&self) -> &TupleSchema {
        &self.remove_schema
    }

    /// The memoized contract handle.
    pub async fn handle(&self) -> Result<&ContractHandle, LiquidityError> {
        if let Some(handle) = self.handle.get() {
            tracing::debug!(family = self.family.name(), "contract handle cached");
            return Ok(handle);
        }

        self.handle
            .get_or_try_init(|| async {
                tracing::debug!(
                    family = self.family.name(),
                    address = %self.address,
                    "resolving contract handle"
                );
                self.chain.resolve_handle(self.address, self.abi).await
            })
            .await
    }

    pub async fn add_liquidity(
        &self,
        params: &AddLiquidity,
    ) -> Result<FunctionCall, LiquidityError> {
        let handle = self.handle().await?;
        let extra_params = encode_extra_params(&self.add_schema, &params.extra_params)?;
        let call = assemble_call(
            self.chain.as_ref(),
            handle,
            ADD_LIQUIDITY,
            &params.amounts,
            params.min_lp_mint_amount,
            extra_params,
        )
        .await?;

        tracing::info!(
            family = self.family.name(),
            target = %call.target(),
            "built addLiquidity call"
        );
        Ok(call)
    }

    pub async fn remove_liquidity(
        &self,
        params: &RemoveLiquidity,
    ) -> Result<FunctionCall, LiquidityError> {
        let handle = self.handle().await?;
        let extra_params = encode_extra_params(&self.remove_schema, &params.extra_params)?;
        let call = assemble_call(
            self.chain.as_ref(),
            handle,
            REMOVE_LIQUIDITY,
            &params.amounts,
            params.max_lp_burn_amount,
            extra_params,
        )
        .await?;

        tracing::info!(
            family = self.family.name(),
            target = %call.target(),
            "built removeLiquidity call"
        );
        Ok(call)
    }
}

/// Normalize `params` and encode them as the single struct value of `schema`.
pub fn encode_extra_params(
    schema: &TupleSchema,
    params: &ParamBundle,
) -> Result<Bytes, LiquidityError> {
    let values = [Value::Sequence(normalize(params))];
    let encoded = encoder::encode(schema, &values)?;
    tracing::debug!(
        schema = %schema.canonical(),
        len = encoded.len(),
        "encoded extra params"
    );
    Ok(encoded)
}

/// Request `method(amounts, limit, extraParams)` on `handle`.
pub async fn assemble_call(
    chain: &dyn ChainInteraction,
    handle: &ContractHandle,
    method: &str,
    amounts: &[U256],
    limit: U256,
    extra_params: Bytes,
) -> Result<FunctionCall, LiquidityError> {
    let args = vec![
        DynSolValue::Array(amounts.iter().map(|a| DynSolValue::Uint(*a, 256)).collect()),
        DynSolValue::Uint(limit, 256),
        DynSolValue::Bytes(extra_params.to_vec()),
    ];
    chain.build_call(handle, method, args).await
}

// ── Dynamic dispatch ─────────────────────────────────────────────────────────

/// Object-safe view of a [`LiquidityAdapter`] of any family.
#[async_trait]
pub trait DynLiquidityAdapter: Send + Sync {
    fn family_name(&self) -> &'static str;

    fn address(&self) -> Address;

    async fn add_liquidity(&self, params: &AddLiquidity) -> Result<FunctionCall, LiquidityError>;

    async fn remove_liquidity(
        &self,
        params: &RemoveLiquidity,
    ) -> Result<FunctionCall, LiquidityError>;
}

#[async_trait]
impl<F: PoolFamily> DynLiquidityAdapter for LiquidityAdapter<F> {
    fn family_name(&self) -> &'static str {
        self.family.name()
    }

    fn address(&self) -> Address {
        self.address
    }

    async fn add_liquidity(&self, params: &AddLiquidity) -> Result<FunctionCall, LiquidityError> {
        LiquidityAdapter::add_liquidity(self, params).await
    }

    async fn remove_liquidity(
        &self,
        params: &RemoveLiquidity,
    ) -> Result<FunctionCall, LiquidityError> {
        LiquidityAdapter::remove_liquidity(self, params).await
    }
}

/// Every supported pool family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    BalancerV2MetaStable,
    Beethoven,
    CurveV2FactoryCrypto,
    Maverick,
    Velodrome,
}

impl PoolKind {
    pub const ALL: [PoolKind; 5] = [
        PoolKind::BalancerV2MetaStable,
        PoolKind::Beethoven,
        PoolKind::CurveV2FactoryCrypto,
        PoolKind::Maverick,
        PoolKind::Velodrome,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PoolKind::BalancerV2MetaStable => BalancerV2MetaStable.name(),
            PoolKind::Beethoven => Beethoven.name(),
            PoolKind::CurveV2FactoryCrypto => CurveV2FactoryCrypto.name(),
            PoolKind::Maverick => Maverick.name(),
            PoolKind::Velodrome => Velodrome.name(),
        }
    }
}

impl FromStr for PoolKind {
    type Err = LiquidityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PoolKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LiquidityError::UnknownPoolFamily(s.to_string()))
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry: construct the adapter for `kind` deployed at `address`.
pub fn build_adapter(
    kind: PoolKind,
    address: Address,
    chain: Arc<dyn ChainInteraction>,
) -> Result<Box<dyn DynLiquidityAdapter>, LiquidityError> {
    Ok(match kind {
        PoolKind::BalancerV2MetaStable => {
            Box::new(LiquidityAdapter::new(BalancerV2MetaStable, address, chain)?)
        }
        PoolKind::Beethoven => Box::new(LiquidityAdapter::new(Beethoven, address, chain)?),
        PoolKind::CurveV2FactoryCrypto => {
            Box::new(LiquidityAdapter::new(CurveV2FactoryCrypto, address, chain)?)
        }
        PoolKind::Maverick => Box::new(LiquidityAdapter::new(Maverick, address, chain)?),
        PoolKind::Velodrome => Box::new(LiquidityAdapter::new(Velodrome, address, chain)?),
    })
}
