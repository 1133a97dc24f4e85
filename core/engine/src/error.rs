//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Column field must not be empty")]
    EmptyField,

    #[error("Filter not registered: {0}")]
    UnknownFilter(String),

    #[error("Invalid format settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}
