//! Error types
//!
//! Every validation failure surfaces as an [`InvalidFieldsError`]. The message
//! always names the offending field and the value that was rejected.

use thiserror::Error;

/// Raised when a transfer, message or fulfillment violates the plugin contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidFieldsError {
    message: String,
}

impl InvalidFieldsError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human-readable description of the violation
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why a value could not be read as a transfer amount
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("must be a number")]
    NotANumber,
    #[error("must be positive")]
    NotPositive,
}

/// Why a string is not a valid condition or fulfillment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Not a valid 32-byte base64url encoded string")]
pub struct EncodingError;
