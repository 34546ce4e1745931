//! Parameter bundle data model.
//!
//! A [`ParamBundle`] is the caller-facing, named form of a pool's extra
//! parameters. Field insertion order is significant: after normalization it
//! becomes the positional order the tuple schema is matched against.

use alloy::primitives::{Address, U256};
use indexmap::IndexMap;
use num::BigInt;
use num::bigint::Sign;
use serde_json::value::RawValue;

use crate::error::LiquidityError;

/// A tagged parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Arbitrary-precision integer. Normalizes to its base-10 string.
    Integer(BigInt),
    Text(String),
    Boolean(bool),
    Address(Address),
    /// Passed through normalization as-is, including any records it holds.
    Sequence(Vec<Value>),
    /// Nested bundle. Normalizes recursively into a positional sequence.
    Record(ParamBundle),
}

/// Ordered mapping of field name to [`Value`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamBundle {
    fields: IndexMap<String, Value>,
}

impl ParamBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, keeping insertion order. Re-inserting an existing
    /// name replaces the value in place.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Copy every field of `other` in after the existing ones, like an
    /// object spread. Fields already present keep their position and take
    /// the new value.
    pub fn extend(mut self, other: &ParamBundle) -> Self {
        for (name, value) in other.iter() {
            self.fields.insert(name.to_string(), value.clone());
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    /// Build a bundle from a parsed JSON object, preserving key order.
    ///
    /// Numbers in a parsed [`serde_json::Value`] are limited to 64 bits; use
    /// [`ParamBundle::from_json_str`] for larger integers.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, LiquidityError> {
        Value::from_json(json)?.into_bundle()
    }

    /// Build a bundle from JSON text. Integers of any size stay exact.
    pub fn from_json_str(json: &str) -> Result<Self, LiquidityError> {
        let raw: &RawValue = serde_json::from_str(json)?;
        Self::from_raw_json(raw)
    }

    pub fn from_raw_json(raw: &RawValue) -> Result<Self, LiquidityError> {
        Value::from_raw_json(raw)?.into_bundle()
    }
}

impl Value {
    /// Convert parsed JSON into a tagged value.
    ///
    /// Strings stay [`Value::Text`]; address, numeric and bytes slots parse
    /// them against the schema when encoding.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, LiquidityError> {
        match json {
            serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Ok(Value::Integer(BigInt::from(u)))
                } else if let Some(i) = n.as_i64() {
                    Ok(Value::Integer(BigInt::from(i)))
                } else if n.as_f64().is_some_and(|f| f.fract() == 0.0) {
                    Err(LiquidityError::SerializationError(format!(
                        "integer {n} exceeds 64 bits; pass it as a string or parse the JSON text"
                    )))
                } else {
                    Err(non_integer(n))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            serde_json::Value::Object(map) => {
                let mut bundle = ParamBundle::new();
                for (key, item) in map {
                    bundle.insert(key.clone(), Value::from_json(item)?);
                }
                Ok(Value::Record(bundle))
            }
            serde_json::Value::Null => Err(null()),
        }
    }

    /// Convert unparsed JSON into a tagged value, reading integer literals
    /// at full precision.
    pub fn from_raw_json(raw: &RawValue) -> Result<Self, LiquidityError> {
        let text = raw.get().trim();
        match text.as_bytes().first() {
            Some(b'{') => {
                let fields: IndexMap<String, &RawValue> = serde_json::from_str(text)?;
                let mut bundle = ParamBundle::new();
                for (key, item) in fields {
                    bundle.insert(key, Value::from_raw_json(item)?);
                }
                Ok(Value::Record(bundle))
            }
            Some(b'[') => {
                let items: Vec<&RawValue> = serde_json::from_str(text)?;
                items
                    .into_iter()
                    .map(Value::from_raw_json)
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Sequence)
            }
            Some(b'"') => Ok(Value::Text(serde_json::from_str(text)?)),
            Some(b't' | b'f') => Ok(Value::Boolean(serde_json::from_str(text)?)),
            Some(b'n') => Err(null()),
            _ if text.contains(['.', 'e', 'E']) => Err(non_integer(text)),
            _ => text.parse::<BigInt>().map(Value::Integer).map_err(|e| {
                LiquidityError::SerializationError(format!("invalid number {text}: {e}"))
            }),
        }
    }

    fn into_bundle(self) -> Result<ParamBundle, LiquidityError> {
        match self {
            Value::Record(bundle) => Ok(bundle),
            _ => Err(LiquidityError::SerializationError(
                "extra params must be a JSON object".into(),
            )),
        }
    }
}

fn non_integer(n: impl std::fmt::Display) -> LiquidityError {
    LiquidityError::SerializationError(format!("Non-integer number {n} is not a valid parameter"))
}

fn null() -> LiquidityError {
    LiquidityError::SerializationError("null is not a valid parameter".into())
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::Integer(v)
    }
}

impl From<U256> for Value {
    fn from(v: U256) -> Self {
        Value::Integer(BigInt::from_bytes_be(Sign::Plus, &v.to_be_bytes::<32>()))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(BigInt::from(v))
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<Address> for Value {
    fn from(v: Address) -> Self {
        Value::Address(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<ParamBundle> for Value {
    fn from(v: ParamBundle) -> Self {
        Value::Record(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Sequence(v.into_iter().map(Into::into).collect())
    }
}
