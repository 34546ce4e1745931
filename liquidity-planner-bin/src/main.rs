//! Binary runner for the liquidity planner.
//!
//! Loads adapter deployments from `PLANNER_CONFIG` (TOML), runs every request
//! in `PLANNER_REQUESTS` (JSON) through its adapter, and writes one
//! `{commands, state}` plan per request to `PLANNER_OUT_DIR/<fixture>.json`.
//! With `RPC_URL` set, adapter addresses are checked against the node.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use liquidity_runtime::{
    ChainInteraction, DynLiquidityAdapter, LiquidityError, OfflineChain, PlanRequest,
    PlannerConfig, ProviderChain, build_adapter,
};

#[tokio::main]
async fn main() -> Result<(), LiquidityError> {
    dotenvy::dotenv().ok();
    setup_log();

    let config_path = env_path("PLANNER_CONFIG", "planner.toml");
    let requests_path = env_path("PLANNER_REQUESTS", "requests.json");
    let out_dir = env_path("PLANNER_OUT_DIR", "plans");

    let config = PlannerConfig::load(&config_path)?.with_env_overrides();
    let chain: Arc<dyn ChainInteraction> = match &config.rpc_url {
        Some(url) => {
            tracing::info!(rpc_url = %url, "Resolving adapters through RPC");
            Arc::new(ProviderChain::http(url)?)
        }
        None => {
            tracing::info!("No RPC URL configured, resolving adapters offline");
            Arc::new(OfflineChain::new())
        }
    };

    let requests = PlanRequest::load_all(&requests_path)?;
    let written = run(&config, chain, &requests, &out_dir).await?;

    tracing::info!(
        written,
        total = requests.len(),
        out_dir = %out_dir.display(),
        "Planning finished"
    );
    if written < requests.len() {
        return Err(LiquidityError::PlanError(format!(
            "{} of {} requests failed",
            requests.len() - written,
            requests.len()
        )));
    }
    Ok(())
}

/// Plan every request, writing successes to `out_dir`. Returns how many
/// plans were written; failed requests are logged and skipped.
async fn run(
    config: &PlannerConfig,
    chain: Arc<dyn ChainInteraction>,
    requests: &[PlanRequest],
    out_dir: &Path,
) -> Result<usize, LiquidityError> {
    let mut adapters: HashMap<&str, Box<dyn DynLiquidityAdapter>> = HashMap::new();
    for deployment in &config.adapters {
        let adapter = build_adapter(deployment.family, deployment.address, chain.clone())?;
        tracing::debug!(
            name = %deployment.name,
            family = adapter.family_name(),
            address = %deployment.address,
            "Registered adapter"
        );
        adapters.insert(deployment.name.as_str(), adapter);
    }

    std::fs::create_dir_all(out_dir)?;

    let mut written = 0;
    for request in requests {
        let Some(adapter) = adapters.get(request.adapter.as_str()) else {
            tracing::error!(
                fixture = %request.fixture,
                adapter = %request.adapter,
                "Unknown adapter"
            );
            continue;
        };

        match request.plan(adapter.as_ref()).await {
            Ok(plan) => {
                let path = out_dir.join(format!("{}.json", request.fixture));
                std::fs::write(&path, plan.to_json()?)?;
                tracing::info!(fixture = %request.fixture, path = %path.display(), "Wrote plan");
                written += 1;
            }
            Err(e) => {
                tracing::error!(fixture = %request.fixture, "Planning failed: {e}");
            }
        }
    }
    Ok(written)
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .into()
}

fn setup_log() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};
    if tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .is_err()
    {}
}
