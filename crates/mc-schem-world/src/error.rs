//! Registry loading errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid legacy key '{0}', expected '<id 0-4095>:<data 0-15>'")]
    InvalidLegacyKey(String),

    #[error("invalid block state '{0}'")]
    InvalidBlockState(String),
}
