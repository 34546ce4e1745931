use alloy::primitives::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiquidityError {
    #[error("Schema mismatch at {path}: {message}")]
    SchemaMismatch { path: String, message: String },

    #[error("Invalid schema `{signature}`: {message}")]
    InvalidSchema { signature: String, message: String },

    #[error("Handle resolution failed for {address}: {message}")]
    HandleResolution { address: Address, message: String },

    #[error("Invocation construction failed for `{method}`: {message}")]
    InvocationConstruction { method: String, message: String },

    #[error("Unknown interface: {0}")]
    UnknownInterface(String),

    #[error("Unknown pool family: {0}")]
    UnknownPoolFamily(String),

    #[error("Plan error: {0}")]
    PlanError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl LiquidityError {
    pub(crate) fn mismatch(path: &str, message: impl Into<String>) -> Self {
        LiquidityError::SchemaMismatch {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for LiquidityError {
    fn from(e: serde_json::Error) -> Self {
        LiquidityError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for LiquidityError {
    fn from(e: toml::de::Error) -> Self {
        LiquidityError::ConfigError(e.to_string())
    }
}

impl From<std::io::Error> for LiquidityError {
    fn from(e: std::io::Error) -> Self {
        LiquidityError::IoError(e.to_string())
    }
}
