//! Schema-driven ABI encoding of normalized values.
//!
//! Values are coerced into alloy [`DynSolValue`]s following the declared
//! [`TupleSchema`], then encoded with the standard head/tail parameter
//! layout (`abi.encode(...)`).

use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy::primitives::{Address, B256, Bytes, I256, U256};
use num::bigint::Sign;
use num::{BigInt, One};

use crate::error::LiquidityError;
use crate::schema::{Component, ParamType, TupleSchema};
use crate::types::Value;

const ROOT: &str = "$";

/// Encode `values` positionally against `schema`.
pub fn encode(schema: &TupleSchema, values: &[Value]) -> Result<Bytes, LiquidityError> {
    let tokens = coerce_all(schema.components(), values, ROOT)?;
    Ok(Bytes::from(DynSolValue::Tuple(tokens).abi_encode_params()))
}

/// Decode data produced by [`encode`] back into a tuple of all schema values.
pub fn decode(schema: &TupleSchema, data: &[u8]) -> Result<DynSolValue, LiquidityError> {
    schema
        .sol_type()
        .abi_decode_params(data)
        .map_err(|e| LiquidityError::mismatch(ROOT, format!("decode failed: {e}")))
}

/// Coerce a list of values against a list of components, checking arity.
fn coerce_all(
    components: &[Component],
    values: &[Value],
    path: &str,
) -> Result<Vec<DynSolValue>, LiquidityError> {
    if components.len() != values.len() {
        return Err(LiquidityError::mismatch(
            path,
            format!(
                "expected {} values, got {}",
                components.len(),
                values.len()
            ),
        ));
    }

    components
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (component, value))| {
            let child = field_path(path, component.name.as_deref(), i);
            coerce(&component.ty, value, &child)
        })
        .collect()
}

fn field_path(parent: &str, name: Option<&str>, index: usize) -> String {
    match name {
        Some(name) => format!("{parent}.{name}"),
        None => format!("{parent}[{index}]"),
    }
}

/// Coerce one value into the token for `ty`.
pub fn coerce(ty: &ParamType, value: &Value, path: &str) -> Result<DynSolValue, LiquidityError> {
    match ty {
        ParamType::Tuple(components) => match value {
            Value::Sequence(items) => Ok(DynSolValue::Tuple(coerce_all(components, items, path)?)),
            // Records reach the encoder when they sit inside a sequence, which
            // normalization passes through. Their fields are taken in order.
            Value::Record(bundle) => {
                let items: Vec<Value> = bundle.values().cloned().collect();
                Ok(DynSolValue::Tuple(coerce_all(components, &items, path)?))
            }
            other => Err(unexpected(path, "tuple", other)),
        },
        ParamType::Array(inner) => match value {
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| coerce(inner, item, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(DynSolValue::Array),
            other => Err(unexpected(path, "array", other)),
        },
        ParamType::FixedArray(inner, len) => match value {
            Value::Sequence(items) if items.len() == *len => items
                .iter()
                .enumerate()
                .map(|(i, item)| coerce(inner, item, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(DynSolValue::FixedArray),
            Value::Sequence(items) => Err(LiquidityError::mismatch(
                path,
                format!("expected {len} elements, got {}", items.len()),
            )),
            other => Err(unexpected(path, "fixed array", other)),
        },
        ParamType::Elementary(ty) => coerce_elementary(ty, value, path),
    }
}

fn coerce_elementary(
    ty: &DynSolType,
    value: &Value,
    path: &str,
) -> Result<DynSolValue, LiquidityError> {
    match ty {
        DynSolType::Address => match value {
            Value::Address(address) => Ok(DynSolValue::Address(*address)),
            Value::Text(s) => s
                .parse::<Address>()
                .map(DynSolValue::Address)
                .map_err(|e| LiquidityError::mismatch(path, format!("invalid address '{s}': {e}"))),
            other => Err(unexpected(path, "address", other)),
        },
        DynSolType::Bool => match value {
            Value::Boolean(b) => Ok(DynSolValue::Bool(*b)),
            other => Err(unexpected(path, "bool", other)),
        },
        DynSolType::Uint(bits) => {
            let v = integer(value, path)?;
            if v.sign() == Sign::Minus {
                return Err(LiquidityError::mismatch(
                    path,
                    format!("negative value {v} for uint{bits}"),
                ));
            }
            if v.bits() > *bits as u64 {
                return Err(LiquidityError::mismatch(
                    path,
                    format!("value {v} overflows uint{bits}"),
                ));
            }
            let (_, be) = v.to_bytes_be();
            let word = U256::try_from_be_slice(&be).ok_or_else(|| {
                LiquidityError::mismatch(path, format!("value {v} overflows uint256"))
            })?;
            Ok(DynSolValue::Uint(word, *bits))
        }
        DynSolType::Int(bits) => {
            let v = integer(value, path)?;
            let bound = BigInt::one() << (*bits - 1);
            if v < -bound.clone() || v >= bound {
                return Err(LiquidityError::mismatch(
                    path,
                    format!("value {v} out of range for int{bits}"),
                ));
            }
            let word = I256::from_dec_str(&v.to_string())
                .map_err(|e| LiquidityError::mismatch(path, format!("invalid int{bits}: {e}")))?;
            Ok(DynSolValue::Int(word, *bits))
        }
        DynSolType::FixedBytes(size) => {
            let data = hex_bytes(value, path)?;
            if data.len() != *size {
                return Err(LiquidityError::mismatch(
                    path,
                    format!("expected {size} bytes, got {}", data.len()),
                ));
            }
            Ok(DynSolValue::FixedBytes(B256::right_padding_from(&data), *size))
        }
        DynSolType::Bytes => Ok(DynSolValue::Bytes(hex_bytes(value, path)?)),
        DynSolType::String => match value {
            Value::Text(s) => Ok(DynSolValue::String(s.clone())),
            Value::Address(address) => Ok(DynSolValue::String(address.to_checksum(None))),
            other => Err(unexpected(path, "string", other)),
        },
        other => Err(LiquidityError::mismatch(
            path,
            format!("unsupported type {}", other.sol_type_name()),
        )),
    }
}

/// Read an integer from an `Integer` or from decimal / `0x` hex text.
fn integer(value: &Value, path: &str) -> Result<BigInt, LiquidityError> {
    match value {
        Value::Integer(i) => Ok(i.clone()),
        // 20 bytes read big-endian, as `uint160(address)` does.
        Value::Address(address) => Ok(BigInt::from_bytes_be(Sign::Plus, address.as_slice())),
        Value::Text(s) => parse_integer(s)
            .ok_or_else(|| LiquidityError::mismatch(path, format!("'{s}' is not an integer"))),
        other => Err(unexpected(path, "integer", other)),
    }
}

fn parse_integer(s: &str) -> Option<BigInt> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => BigInt::parse_bytes(hex.as_bytes(), 16)?,
        None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            BigInt::parse_bytes(digits.as_bytes(), 10)?
        }
        None => return None,
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn hex_bytes(value: &Value, path: &str) -> Result<Vec<u8>, LiquidityError> {
    match value {
        Value::Text(s) => hex::decode(s.strip_prefix("0x").unwrap_or(s))
            .map_err(|e| LiquidityError::mismatch(path, format!("invalid hex '{s}': {e}"))),
        Value::Address(address) => Ok(address.to_vec()),
        other => Err(unexpected(path, "hex bytes", other)),
    }
}

fn unexpected(path: &str, expected: &str, got: &Value) -> LiquidityError {
    LiquidityError::mismatch(path, format!("expected {expected}, got {}", describe(got)))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Integer(_) => "integer",
        Value::Text(_) => "text",
        Value::Boolean(_) => "bool",
        Value::Address(_) => "address",
        Value::Sequence(_) => "sequence",
        Value::Record(_) => "record",
    }
}
