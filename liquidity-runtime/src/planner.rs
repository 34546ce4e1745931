//! Flattens pending calls into a weiroll-style program.
//!
//! Each call becomes one 32-byte command word:
//!
//! ```text
//! selector(4) | flags(1) | inputs(6) | output(1) | target(20)
//! ```
//!
//! Every input byte names a state slot holding that argument's ABI encoding.
//! Slots for dynamic values carry the `0x80` bit and omit the leading offset
//! word. Unused input bytes and the discarded return value are `0xff`.

use std::collections::HashMap;

use alloy::primitives::hex;
use serde::{Deserialize, Serialize};

use crate::call::FunctionCall;
use crate::error::LiquidityError;

/// Arguments that fit in a single command word.
pub const MAX_INPUTS: usize = 6;

/// Highest usable slot index; `0x7f | 0x80` would collide with the end marker.
const MAX_STATE_SLOTS: usize = 0x7f;

const DYNAMIC_SLOT: u8 = 0x80;
const UNUSED: u8 = 0xff;

/// A serialized program: command words and the initial state, `0x` hex.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Plan {
    pub commands: Vec<String>,
    pub state: Vec<String>,
}

impl Plan {
    pub fn from_json(json: &str) -> Result<Self, LiquidityError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LiquidityError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Compare against a recorded plan. Targets depend on where the adapter
    /// happened to be deployed, so the trailing address of every command is
    /// ignored.
    pub fn matches_fixture(&self, fixture: &Plan) -> bool {
        self.commands.len() == fixture.commands.len()
            && self
                .commands
                .iter()
                .zip(&fixture.commands)
                .all(|(a, b)| strip_target(a).eq_ignore_ascii_case(strip_target(b)))
            && self.state.len() == fixture.state.len()
            && self
                .state
                .iter()
                .zip(&fixture.state)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

fn strip_target(command: &str) -> &str {
    command.get(..command.len().saturating_sub(40)).unwrap_or("")
}

/// Collects calls in execution order.
#[derive(Debug, Default)]
pub struct Planner {
    calls: Vec<FunctionCall>,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, call: FunctionCall) -> &mut Self {
        self.calls.push(call);
        self
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn plan(&self) -> Result<Plan, LiquidityError> {
        let mut state: Vec<Vec<u8>> = Vec::new();
        let mut slots: HashMap<Vec<u8>, usize> = HashMap::new();
        let mut commands = Vec::with_capacity(self.calls.len());

        for call in &self.calls {
            if call.args().len() > MAX_INPUTS {
                return Err(LiquidityError::PlanError(format!(
                    "{} takes {} arguments, at most {MAX_INPUTS} fit in a command",
                    call.signature(),
                    call.args().len()
                )));
            }

            let mut inputs = [UNUSED; MAX_INPUTS];
            for (i, (arg, ty)) in call.args().iter().zip(call.arg_types()).enumerate() {
                let dynamic = ty.is_dynamic();
                let mut literal = arg.abi_encode();
                if dynamic {
                    literal.drain(..32);
                }

                let slot = match slots.get(&literal) {
                    Some(slot) => *slot,
                    None => {
                        let slot = state.len();
                        if slot >= MAX_STATE_SLOTS {
                            return Err(LiquidityError::PlanError("out of state slots".into()));
                        }
                        slots.insert(literal.clone(), slot);
                        state.push(literal);
                        slot
                    }
                };
                // `slot` < 0x7f, checked above.
                inputs[i] = slot as u8 | if dynamic { DYNAMIC_SLOT } else { 0 };
            }

            let mut word = Vec::with_capacity(32);
            word.extend_from_slice(call.selector().as_slice());
            word.push(call.kind().flags());
            word.extend_from_slice(&inputs);
            word.push(UNUSED);
            word.extend_from_slice(call.target().as_slice());
            commands.push(hex::encode_prefixed(&word));

            tracing::debug!(
                method = call.method(),
                target = %call.target(),
                slots = state.len(),
                "planned command"
            );
        }

        Ok(Plan {
            commands,
            state: state.iter().map(hex::encode_prefixed).collect(),
        })
    }
}
