//! Curve V2 factory crypto pools.

use alloy::primitives::Address;

use super::PoolFamily;
use crate::interfaces;
use crate::types::ParamBundle;

pub const EXTRA_PARAMS_STRUCT: &[&str] =
    &["tuple(address poolAddress, address lpToken, bool useEth)"];

/// Curve V2 factory crypto pools.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveV2FactoryCrypto;

impl PoolFamily for CurveV2FactoryCrypto {
    fn name(&self) -> &'static str {
        "curve_v2_factory_crypto"
    }

    fn interface_id(&self) -> &'static str {
        interfaces::CURVE_V2_FACTORY_CRYPTO_ADAPTER
    }

    fn add_liquidity_extra_params_struct(&self) -> &'static [&'static str] {
        EXTRA_PARAMS_STRUCT
    }

    fn remove_liquidity_extra_params_struct(&self) -> &'static [&'static str] {
        EXTRA_PARAMS_STRUCT
    }
}

/// `use_eth` selects the native asset over its wrapped token.
pub fn extra_params(pool: Address, lp_token: Address, use_eth: bool) -> ParamBundle {
    ParamBundle::new()
        .with("poolAddress", pool)
        .with("lpToken", lp_token)
        .with("useEth", use_eth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::encode_extra_params;
    use crate::error::LiquidityError;
    use crate::schema::TupleSchema;
    use alloy::primitives::address;
    use alloy::sol;
    use alloy::sol_types::SolValue;

    sol! {
        struct CurveExtraParams {
            address poolAddress;
            address lpToken;
            bool useEth;
        }
    }

    const POOL: Address = address!("5FAE7E604FC3e24fd43A72867ceBaC94c65b404A");
    const LP_TOKEN: Address = address!("5b6C539b224014A09B3388e51CaAA8e354c959C8");

    #[test]
    fn test_matches_solidity_struct_encoding() {
        let schema = TupleSchema::parse(
            CurveV2FactoryCrypto.remove_liquidity_extra_params_struct(),
        )
        .unwrap();
        let encoded = encode_extra_params(&schema, &extra_params(POOL, LP_TOKEN, false)).unwrap();

        let expected = (CurveExtraParams {
            poolAddress: POOL,
            lpToken: LP_TOKEN,
            useEth: false,
        },)
            .abi_encode_params();
        assert_eq!(encoded.as_ref(), expected.as_slice());
        // Static struct: three words, no offset.
        assert_eq!(encoded.len(), 96);
    }

    #[test]
    fn test_flag_must_be_boolean() {
        let schema = TupleSchema::parse(EXTRA_PARAMS_STRUCT).unwrap();
        let bundle = ParamBundle::new()
            .with("poolAddress", POOL)
            .with("lpToken", LP_TOKEN)
            .with("useEth", 1u64);
        let err = encode_extra_params(&schema, &bundle).unwrap_err();
        assert!(matches!(err, LiquidityError::SchemaMismatch { .. }));
    }
}
