//! Flattening of named parameter bundles into positional values.

use crate::types::{ParamBundle, Value};

/// Convert a bundle into a positional sequence, one element per field in
/// insertion order.
///
/// Integers become their base-10 string and nested records are flattened
/// recursively. Every other value, sequences included, is passed through
/// unchanged: records held inside a sequence stay records and are laid out
/// positionally by the encoder.
pub fn normalize(bundle: &ParamBundle) -> Vec<Value> {
    bundle.values().map(normalize_value).collect()
}

fn normalize_value(value: &Value) -> Value {
    match value {
        Value::Integer(i) => Value::Text(i.to_string()),
        Value::Record(nested) => Value::Sequence(normalize(nested)),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{U256, address};
    use num::BigInt;

    #[test]
    fn test_length_and_order_preserved() {
        let bundle = ParamBundle::new()
            .with("b", true)
            .with("a", "text")
            .with("c", address!("2eBE19AA2e29C8ACaDb14Be3E7De153b0141e2aa"));
        let out = normalize(&bundle);
        assert_eq!(out.len(), bundle.len());
        assert_eq!(out[0], Value::Boolean(true));
        assert_eq!(out[1], Value::Text("text".into()));
        assert_eq!(
            out[2],
            Value::Address(address!("2eBE19AA2e29C8ACaDb14Be3E7De153b0141e2aa"))
        );
    }

    #[test]
    fn test_large_integer_becomes_exact_decimal() {
        let big = U256::from(5u64) * U256::from(10u64).pow(U256::from(21u64));
        let bundle = ParamBundle::new().with("amount", big);
        assert_eq!(
            normalize(&bundle),
            vec![Value::Text("5000000000000000000000".into())]
        );
    }

    #[test]
    fn test_negative_integer() {
        let bundle = ParamBundle::new().with("pos", BigInt::from(-7));
        assert_eq!(normalize(&bundle), vec![Value::Text("-7".into())]);
    }

    #[test]
    fn test_nested_record_normalized_recursively() {
        let inner = ParamBundle::new().with("x", 1u64).with("y", false);
        let bundle = ParamBundle::new()
            .with("first", 9u64)
            .with("inner", inner.clone());
        let out = normalize(&bundle);
        assert_eq!(out[1], Value::Sequence(normalize(&inner)));
        assert_eq!(
            out[1],
            Value::Sequence(vec![Value::Text("1".into()), Value::Boolean(false)])
        );
    }

    #[test]
    fn test_sequences_pass_through_untouched() {
        let record = ParamBundle::new().with("binId", 49u64);
        let seq = Value::Sequence(vec![Value::Record(record), Value::from(5u64)]);
        let bundle = ParamBundle::new().with("params", seq.clone());
        assert_eq!(normalize(&bundle), vec![seq]);
    }

    #[test]
    fn test_empty_bundle() {
        assert!(normalize(&ParamBundle::new()).is_empty());
    }
}
