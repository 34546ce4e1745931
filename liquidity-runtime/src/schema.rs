//! Tuple schema declarations.
//!
//! Adapters declare their extra-params structs as human-readable ABI type
//! signatures such as `tuple(address poolAddress, address[] tokens)`. This
//! module parses them into a component tree that keeps field names for error
//! reporting and converts to alloy's [`DynSolType`] for encoding.

use alloy::dyn_abi::DynSolType;

use crate::error::LiquidityError;

/// A parsed ABI type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Elementary(DynSolType),
    Array(Box<ParamType>),
    FixedArray(Box<ParamType>, usize),
    Tuple(Vec<Component>),
}

/// A type with its optional declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: Option<String>,
    pub ty: ParamType,
}

impl ParamType {
    pub fn sol_type(&self) -> DynSolType {
        match self {
            ParamType::Elementary(ty) => ty.clone(),
            ParamType::Array(inner) => DynSolType::Array(Box::new(inner.sol_type())),
            ParamType::FixedArray(inner, len) => {
                DynSolType::FixedArray(Box::new(inner.sol_type()), *len)
            }
            ParamType::Tuple(components) => {
                DynSolType::Tuple(components.iter().map(|c| c.ty.sol_type()).collect())
            }
        }
    }

    /// Canonical signature form, e.g. `(address,address[])`.
    pub fn canonical(&self) -> String {
        match self {
            ParamType::Elementary(ty) => ty.sol_type_name().into_owned(),
            ParamType::Array(inner) => format!("{}[]", inner.canonical()),
            ParamType::FixedArray(inner, len) => format!("{}[{len}]", inner.canonical()),
            ParamType::Tuple(components) => {
                let inner: Vec<String> = components.iter().map(|c| c.ty.canonical()).collect();
                format!("({})", inner.join(","))
            }
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.sol_type().is_dynamic()
    }
}

/// An immutable, ordered list of parsed type signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleSchema {
    signatures: Vec<String>,
    components: Vec<Component>,
}

impl TupleSchema {
    pub fn parse<S: AsRef<str>>(signatures: &[S]) -> Result<Self, LiquidityError> {
        if signatures.is_empty() {
            return Err(LiquidityError::InvalidSchema {
                signature: String::new(),
                message: "schema must declare at least one type".into(),
            });
        }

        let components = signatures
            .iter()
            .map(|s| parse_signature(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            signatures: signatures.iter().map(|s| s.as_ref().to_string()).collect(),
            components,
        })
    }

    /// The signatures exactly as declared.
    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The whole schema as one parameter tuple.
    pub fn sol_type(&self) -> DynSolType {
        DynSolType::Tuple(self.components.iter().map(|c| c.ty.sol_type()).collect())
    }

    pub fn canonical(&self) -> String {
        let parts: Vec<String> = self.components.iter().map(|c| c.ty.canonical()).collect();
        parts.join(",")
    }
}

/// Parse a single signature such as `tuple(uint128 binId, uint128 amount)[] params`.
pub fn parse_signature(signature: &str) -> Result<Component, LiquidityError> {
    let mut parser = Parser {
        bytes: signature.as_bytes(),
        pos: 0,
    };
    let result = parser.component().and_then(|component| {
        parser.skip_ws();
        if parser.pos != parser.bytes.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(component)
    });

    result.map_err(|message| LiquidityError::InvalidSchema {
        signature: signature.to_string(),
        message,
    })
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn error(&self, message: &str) -> String {
        format!("{message} at offset {}", self.pos)
    }

    fn expect(&mut self, c: u8) -> Result<(), String> {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected `{}`", c as char)))
        }
    }

    fn word(&mut self) -> String {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(c) if c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
        ) {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned()
    }

    fn component(&mut self) -> Result<Component, String> {
        let ty = self.param_type()?;
        self.skip_ws();
        let name = match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == b'_' || c == b'$' => Some(self.word()),
            _ => None,
        };
        Ok(Component { name, ty })
    }

    fn param_type(&mut self) -> Result<ParamType, String> {
        self.skip_ws();
        let mut ty = if self.peek() == Some(b'(') {
            self.pos += 1;
            self.tuple_body()?
        } else {
            let word = self.word();
            match word.as_str() {
                "" => return Err(self.error("expected a type")),
                "tuple" => {
                    self.expect(b'(')?;
                    self.tuple_body()?
                }
                "uint" => ParamType::Elementary(DynSolType::Uint(256)),
                "int" => ParamType::Elementary(DynSolType::Int(256)),
                other => {
                    let parsed = DynSolType::parse(other)
                        .map_err(|e| self.error(&format!("invalid type `{other}`: {e}")))?;
                    ParamType::Elementary(parsed)
                }
            }
        };

        while self.peek() == Some(b'[') {
            self.pos += 1;
            let digits = self.word();
            self.expect(b']')?;
            ty = if digits.is_empty() {
                ParamType::Array(Box::new(ty))
            } else {
                let len = digits
                    .parse::<usize>()
                    .map_err(|_| self.error(&format!("invalid array length `{digits}`")))?;
                ParamType::FixedArray(Box::new(ty), len)
            };
        }

        Ok(ty)
    }

    /// Components after an opening parenthesis, through the closing one.
    fn tuple_body(&mut self) -> Result<ParamType, String> {
        let mut components = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(ParamType::Tuple(components));
        }
        loop {
            components.push(self.component()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    return Ok(ParamType::Tuple(components));
                }
                _ => return Err(self.error("expected `,` or `)`")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_tuple() {
        let schema = TupleSchema::parse(&["tuple(address poolAddress, address[] tokens)"]).unwrap();
        assert_eq!(schema.canonical(), "(address,address[])");
        let ParamType::Tuple(fields) = &schema.components()[0].ty else {
            panic!("expected tuple");
        };
        assert_eq!(fields[0].name.as_deref(), Some("poolAddress"));
        assert_eq!(fields[1].name.as_deref(), Some("tokens"));
        assert_eq!(
            fields[1].ty,
            ParamType::Array(Box::new(ParamType::Elementary(DynSolType::Address)))
        );
    }

    #[test]
    fn test_parse_mixed_named_and_unnamed_nested() {
        let schema = TupleSchema::parse(&[
            "tuple(address, uint256, uint256, tuple(uint8 kind, int32 pos, bool isDelta, uint128 deltaA, uint128 deltaB)[] maverickParams)",
        ])
        .unwrap();
        assert_eq!(
            schema.canonical(),
            "(address,uint256,uint256,(uint8,int32,bool,uint128,uint128)[])"
        );
        let ParamType::Tuple(fields) = &schema.components()[0].ty else {
            panic!("expected tuple");
        };
        assert_eq!(fields[0].name, None);
        assert_eq!(fields[3].name.as_deref(), Some("maverickParams"));
        assert!(schema.components()[0].ty.is_dynamic());
    }

    #[test]
    fn test_parse_bare_parens_and_aliases() {
        let component = parse_signature("(uint a, int b, bytes32 c)").unwrap();
        assert_eq!(component.ty.canonical(), "(uint256,int256,bytes32)");
        assert!(!component.ty.is_dynamic());
    }

    #[test]
    fn test_parse_fixed_and_nested_arrays() {
        let component = parse_signature("uint256[2][] grid").unwrap();
        assert_eq!(component.ty.canonical(), "uint256[2][]");
        assert_eq!(component.name.as_deref(), Some("grid"));
        assert_eq!(
            component.ty.sol_type(),
            DynSolType::Array(Box::new(DynSolType::FixedArray(
                Box::new(DynSolType::Uint(256)),
                2
            )))
        );
    }

    #[test]
    fn test_parse_empty_tuple() {
        let component = parse_signature("tuple()").unwrap();
        assert_eq!(component.ty, ParamType::Tuple(vec![]));
    }

    #[test]
    fn test_schema_sol_type_wraps_all_signatures() {
        let schema = TupleSchema::parse(&["address", "bool flag"]).unwrap();
        assert_eq!(
            schema.sol_type(),
            DynSolType::Tuple(vec![DynSolType::Address, DynSolType::Bool])
        );
        assert_eq!(schema.signatures(), &["address".to_string(), "bool flag".to_string()]);
    }

    #[test]
    fn test_invalid_signatures() {
        for bad in ["tuple(address", "(address,,bool)", "address[x]", "address a b", ""] {
            let err = parse_signature(bad).unwrap_err();
            assert!(
                matches!(err, LiquidityError::InvalidSchema { .. }),
                "{bad} should fail"
            );
        }
    }

    #[test]
    fn test_empty_schema_rejected() {
        let empty: [&str; 0] = [];
        assert!(TupleSchema::parse(&empty).is_err());
    }
}
