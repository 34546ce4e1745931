//! Chain-interaction layer.
//!
//! Resolves contract handles for an address/interface pair and turns handle
//! method invocations into [`FunctionCall`]s. [`OfflineChain`] binds handles
//! without any I/O; [`ProviderChain`] checks the address against a node first.

use std::sync::Arc;

use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;

use crate::call::{CallKind, FunctionCall};
use crate::error::LiquidityError;

/// A resolved reference to a contract instance bound to its interface.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    address: Address,
    abi: Arc<JsonAbi>,
    kind: CallKind,
}

impl ContractHandle {
    pub fn new(address: Address, abi: JsonAbi, kind: CallKind) -> Self {
        Self {
            address,
            abi: Arc::new(abi),
            kind,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    pub fn kind(&self) -> CallKind {
        self.kind
    }

    /// The single function named `method`. Overloads are rejected.
    pub fn function(&self, method: &str) -> Result<&Function, LiquidityError> {
        let overloads = self.abi.function(method).ok_or_else(|| {
            LiquidityError::InvocationConstruction {
                method: method.to_string(),
                message: format!("no such method on contract {}", self.address),
            }
        })?;
        match overloads.as_slice() {
            [function] => Ok(function),
            _ => Err(LiquidityError::InvocationConstruction {
                method: method.to_string(),
                message: format!("{} overloads, expected exactly one", overloads.len()),
            }),
        }
    }

    /// Build a call to `method` with positional arguments.
    pub fn call(
        &self,
        method: &str,
        args: Vec<DynSolValue>,
    ) -> Result<FunctionCall, LiquidityError> {
        let function = self.function(method)?;
        FunctionCall::new(self.address, function, args, self.kind)
    }
}

/// The two chain operations the adapters depend on.
#[async_trait]
pub trait ChainInteraction: Send + Sync {
    /// Resolve a handle for `address` bound to `abi`.
    async fn resolve_handle(
        &self,
        address: Address,
        abi: &JsonAbi,
    ) -> Result<ContractHandle, LiquidityError>;

    /// Construct an invocation request for `method` on `handle`.
    async fn build_call(
        &self,
        handle: &ContractHandle,
        method: &str,
        args: Vec<DynSolValue>,
    ) -> Result<FunctionCall, LiquidityError> {
        handle.call(method, args)
    }
}

/// Binds handles without contacting a node.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineChain {
    kind: CallKind,
}

impl OfflineChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_call_kind(kind: CallKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl ChainInteraction for OfflineChain {
    async fn resolve_handle(
        &self,
        address: Address,
        abi: &JsonAbi,
    ) -> Result<ContractHandle, LiquidityError> {
        Ok(ContractHandle::new(address, abi.clone(), self.kind))
    }
}

/// Resolves handles through an alloy provider, requiring deployed code at
/// the address.
pub struct ProviderChain<P> {
    provider: P,
    kind: CallKind,
}

impl<P: Provider> ProviderChain<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            kind: CallKind::default(),
        }
    }

    pub fn with_call_kind(mut self, kind: CallKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl ProviderChain<DynProvider> {
    /// Connect to a JSON-RPC endpoint over HTTP.
    pub fn http(rpc_url: &str) -> Result<Self, LiquidityError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| LiquidityError::ConfigError(format!("Invalid RPC URL: {e}")))?;

        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Self::new(provider))
    }
}

#[async_trait]
impl<P: Provider> ChainInteraction for ProviderChain<P> {
    async fn resolve_handle(
        &self,
        address: Address,
        abi: &JsonAbi,
    ) -> Result<ContractHandle, LiquidityError> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .map_err(|e| LiquidityError::HandleResolution {
                address,
                message: format!("eth_getCode failed: {e}"),
            })?;

        if code.is_empty() {
            tracing::warn!(%address, "no contract code at adapter address");
            return Err(LiquidityError::HandleResolution {
                address,
                message: "no contract code at address".into(),
            });
        }

        tracing::debug!(%address, code_len = code.len(), "resolved contract handle");
        Ok(ContractHandle::new(address, abi.clone(), self.kind))
    }
}
