//! Interface descriptor source.
//!
//! Adapter contract ABIs ship as Hardhat-style artifacts under `abi/` and are
//! parsed once, on first lookup, into alloy [`JsonAbi`]s keyed by contract name.

use std::collections::HashMap;

use alloy::json_abi::JsonAbi;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::LiquidityError;

pub const I_POOL_ADAPTER: &str = "IPoolAdapter";
pub const BALANCER_V2_META_STABLE_POOL_ADAPTER: &str = "BalancerV2MetaStablePoolAdapter";
pub const BEETHOVEN_ADAPTER: &str = "BeethovenAdapter";
pub const CURVE_V2_FACTORY_CRYPTO_ADAPTER: &str = "CurveV2FactoryCryptoAdapter";
pub const VELODROME_ADAPTER: &str = "VelodromeAdapter";

const ARTIFACTS: &[(&str, &str)] = &[
    (I_POOL_ADAPTER, include_str!("../abi/IPoolAdapter.json")),
    (
        BALANCER_V2_META_STABLE_POOL_ADAPTER,
        include_str!("../abi/BalancerV2MetaStablePoolAdapter.json"),
    ),
    (BEETHOVEN_ADAPTER, include_str!("../abi/BeethovenAdapter.json")),
    (
        CURVE_V2_FACTORY_CRYPTO_ADAPTER,
        include_str!("../abi/CurveV2FactoryCryptoAdapter.json"),
    ),
    (VELODROME_ADAPTER, include_str!("../abi/VelodromeAdapter.json")),
];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Artifact {
    contract_name: String,
    abi: JsonAbi,
}

static REGISTRY: Lazy<HashMap<&'static str, Result<JsonAbi, String>>> = Lazy::new(|| {
    ARTIFACTS
        .iter()
        .map(|(id, raw)| {
            let parsed = serde_json::from_str::<Artifact>(raw)
                .map_err(|e| format!("malformed artifact: {e}"))
                .and_then(|artifact| {
                    if artifact.contract_name == *id {
                        Ok(artifact.abi)
                    } else {
                        Err(format!(
                            "artifact declares contract {}",
                            artifact.contract_name
                        ))
                    }
                });
            (*id, parsed)
        })
        .collect()
});

/// Look up an interface descriptor by contract name.
pub fn lookup(id: &str) -> Result<&'static JsonAbi, LiquidityError> {
    match REGISTRY.get(id) {
        Some(Ok(abi)) => Ok(abi),
        Some(Err(message)) => Err(LiquidityError::UnknownInterface(format!("{id}: {message}"))),
        None => Err(LiquidityError::UnknownInterface(id.to_string())),
    }
}

/// Names of every bundled interface.
pub fn available() -> Vec<&'static str> {
    ARTIFACTS.iter().map(|(id, _)| *id).collect()
}
