//! Planner configuration and request files.
//!
//! Adapter deployments come from TOML:
//!
//! ```toml
//! rpc_url = "http://localhost:8545"
//!
//! [[adapters]]
//! name = "maverick-weth-wsteth"
//! family = "maverick"
//! address = "0xc3B7aF1d8c3ca78F375Eb125F0211164b9071Cc0"
//! ```
//!
//! Requests are a JSON array of [`PlanRequest`]s naming one of those
//! deployments.

use std::path::Path;
use std::str::FromStr;

use alloy::primitives::{Address, U256};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::adapters::{AddLiquidity, DynLiquidityAdapter, PoolKind, RemoveLiquidity};
use crate::error::LiquidityError;
use crate::planner::{Plan, Planner};
use crate::types::ParamBundle;

pub const RPC_URL_ENV: &str = "RPC_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterDeployment {
    pub name: String,
    pub family: PoolKind,
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub adapters: Vec<AdapterDeployment>,
}

impl PlannerConfig {
    pub fn from_toml(s: &str) -> Result<Self, LiquidityError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LiquidityError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LiquidityError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
    }

    /// Replace `rpc_url` with `RPC_URL` when that is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        match std::env::var(RPC_URL_ENV) {
            Ok(url) if !url.is_empty() => {
                self.rpc_url = Some(url);
                self
            }
            _ => self,
        }
    }

    pub fn deployment(&self, name: &str) -> Result<&AdapterDeployment, LiquidityError> {
        self.adapters
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| LiquidityError::ConfigError(format!("no adapter named `{name}`")))
    }

    fn validate(&self) -> Result<(), LiquidityError> {
        for (i, deployment) in self.adapters.iter().enumerate() {
            if self.adapters[..i].iter().any(|d| d.name == deployment.name) {
                return Err(LiquidityError::ConfigError(format!(
                    "duplicate adapter name `{}`",
                    deployment.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityAction {
    AddLiquidity,
    RemoveLiquidity,
}

/// A token amount written either as a JSON number or as a decimal / `0x`
/// string. Numbers past `u64` keep their literal digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let text = raw.get().trim();
        if text.starts_with('"') {
            return serde_json::from_str(text)
                .map(Amount::Text)
                .map_err(de::Error::custom);
        }
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(de::Error::custom(format!(
                "amount must be a non-negative integer, got {text}"
            )));
        }
        Ok(match text.parse::<u64>() {
            Ok(n) => Amount::Number(n),
            Err(_) => Amount::Text(text.to_string()),
        })
    }
}

impl Amount {
    pub fn to_u256(&self) -> Result<U256, LiquidityError> {
        match self {
            Amount::Number(n) => Ok(U256::from(*n)),
            Amount::Text(s) => U256::from_str(s)
                .map_err(|e| LiquidityError::ConfigError(format!("invalid amount `{s}`: {e}"))),
        }
    }
}

/// One add/remove request, planned into its own fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Output file stem.
    pub fixture: String,
    /// Name of an [`AdapterDeployment`].
    pub adapter: String,
    pub action: LiquidityAction,
    pub amounts: Vec<Amount>,
    /// `minLpMintAmount` when adding, `maxLpBurnAmount` when removing.
    pub limit: Amount,
    /// Kept as raw JSON so integers of any size reach the encoder exactly.
    pub extra_params: Box<RawValue>,
}

impl PlanRequest {
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>, LiquidityError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LiquidityError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Run the request through `adapter` and plan the resulting call alone.
    pub async fn plan(&self, adapter: &dyn DynLiquidityAdapter) -> Result<Plan, LiquidityError> {
        let amounts = self
            .amounts
            .iter()
            .map(Amount::to_u256)
            .collect::<Result<Vec<_>, _>>()?;
        let limit = self.limit.to_u256()?;
        let extra_params = ParamBundle::from_raw_json(&self.extra_params)?;

        let call = match self.action {
            LiquidityAction::AddLiquidity => {
                adapter
                    .add_liquidity(&AddLiquidity {
                        amounts,
                        min_lp_mint_amount: limit,
                        extra_params,
                    })
                    .await?
            }
            LiquidityAction::RemoveLiquidity => {
                adapter
                    .remove_liquidity(&RemoveLiquidity {
                        amounts,
                        max_lp_burn_amount: limit,
                        extra_params,
                    })
                    .await?
            }
        };

        let mut planner = Planner::new();
        planner.add(call);
        planner.plan()
    }
}
