//! Pending call descriptors handed to the planner.

use alloy::dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier};
use alloy::json_abi::Function;
use alloy::primitives::{Address, Bytes, Selector};
use serde::{Deserialize, Serialize};

use crate::error::LiquidityError;

/// How the planner's executor invokes the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    /// Library-style call executed in the executor's own context.
    #[default]
    DelegateCall,
    Call,
    StaticCall,
}

impl CallKind {
    /// Call-type bits of a command's flags byte.
    pub fn flags(self) -> u8 {
        match self {
            CallKind::DelegateCall => 0x00,
            CallKind::Call => 0x01,
            CallKind::StaticCall => 0x02,
        }
    }
}

/// An unexecuted, type-checked contract method invocation.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    target: Address,
    function: Function,
    arg_types: Vec<DynSolType>,
    args: Vec<DynSolValue>,
    calldata: Bytes,
    kind: CallKind,
}

impl FunctionCall {
    /// Build a call, checking `args` against the function's declared inputs.
    pub fn new(
        target: Address,
        function: &Function,
        args: Vec<DynSolValue>,
        kind: CallKind,
    ) -> Result<Self, LiquidityError> {
        let method = function.name.clone();
        let invalid = |message: String| LiquidityError::InvocationConstruction {
            method: method.clone(),
            message,
        };

        if function.inputs.len() != args.len() {
            return Err(invalid(format!(
                "expected {} arguments, got {}",
                function.inputs.len(),
                args.len()
            )));
        }

        let mut arg_types = Vec::with_capacity(args.len());
        for (param, arg) in function.inputs.iter().zip(&args) {
            let ty: DynSolType = param
                .resolve()
                .map_err(|e| invalid(format!("unresolvable input `{}`: {e}", param.name)))?;
            if !ty.matches(arg) {
                return Err(invalid(format!(
                    "argument `{}` does not match {}",
                    param.name,
                    ty.sol_type_name()
                )));
            }
            arg_types.push(ty);
        }

        let calldata = function
            .abi_encode_input(&args)
            .map_err(|e| invalid(format!("encoding failed: {e}")))?;

        Ok(Self {
            target,
            function: function.clone(),
            arg_types,
            args,
            calldata: Bytes::from(calldata),
            kind,
        })
    }

    pub fn target(&self) -> Address {
        self.target
    }

    pub fn method(&self) -> &str {
        &self.function.name
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    pub fn selector(&self) -> Selector {
        self.function.selector()
    }

    pub fn signature(&self) -> String {
        self.function.signature()
    }

    pub fn args(&self) -> &[DynSolValue] {
        &self.args
    }

    pub fn arg_types(&self) -> &[DynSolType] {
        &self.arg_types
    }

    /// Selector followed by the ABI-encoded arguments.
    pub fn calldata(&self) -> &Bytes {
        &self.calldata
    }

    pub fn kind(&self) -> CallKind {
        self.kind
    }
}
