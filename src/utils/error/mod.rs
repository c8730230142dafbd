//! Error handling for the portal
//!
//! This module defines all error types used throughout the portal core.

use thiserror::Error;

/// Result type alias for the portal
pub type Result<T> = std::result::Result<T, PortalError>;

/// Main error type for the portal
#[derive(Error, Debug)]
pub enum PortalError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Document store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Notification sink errors
    #[error("Notification error: {0}")]
    Notification(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal invariant violations
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortalError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a store failure.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}
