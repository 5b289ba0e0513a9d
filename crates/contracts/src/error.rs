//! Layered error definitions
//!
//! Categorized by source: config / args / streamer / io

use thiserror::Error;

/// Error raised by a component contract operation
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Argument Errors =====
    /// Command line arguments rejected
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    // ===== Streamer Errors =====
    /// Streamer setup error
    #[error("streamer setup error: {message}")]
    StreamerSetup { message: String },

    /// Operation called out of contract order
    #[error("'{operation}' called out of order: {message}")]
    OutOfOrder { operation: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create invalid arguments error
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create streamer setup error
    pub fn streamer_setup(message: impl Into<String>) -> Self {
        Self::StreamerSetup {
            message: message.into(),
        }
    }

    /// Create out-of-order error
    pub fn out_of_order(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OutOfOrder {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
