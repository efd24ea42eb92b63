//! # STS Error Handling
//!
//! This module defines the StsError enum, which represents the different error
//! types that can occur in the sts-rs crate.

use std::io;
use thiserror::Error;

/// Represents the different error types that can occur in the STS crate.
#[derive(Debug, Error)]
pub enum StsError {
    /// Indicates an I/O failure while reading or writing the vending key.
    #[error("Key storage error: {0}")]
    StorageError(String),

    /// Indicates that no vending key has been persisted yet.
    #[error("Vending key not found")]
    NotFound,

    /// Indicates a persisted vending key that is not base64 or not 8 bytes long.
    #[error("Malformed vending key: {0}")]
    MalformedKey(String),

    /// Indicates a meter parameter that cannot form a 16-digit hex block.
    #[error("Invalid parameter length: {0}")]
    InvalidParameterLength(String),

    /// Indicates a token that is not numeric or does not fit in 66 bits.
    #[error("Token out of range: {0}")]
    TokenOutOfRange(String),

    /// Indicates a demo token amount below the minimum.
    #[error("Invalid amount: {0} (minimum is 5)")]
    InvalidAmount(f64),
}

impl From<io::Error> for StsError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => StsError::NotFound,
            _ => StsError::StorageError(err.to_string()),
        }
    }
}
