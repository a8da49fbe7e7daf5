//! Error handling for roll_period
//!
//! This module provides the error type and result alias shared by the
//! checkpoint calculator, the file namer and the configuration layer.

use std::convert::Infallible;
use std::io;
use thiserror::Error;

/// Errors that can occur in roll_period operations
#[derive(Error, Debug)]
pub enum Error {
    /// A granularity value outside the supported enumeration
    #[error("Invalid rolling granularity: {0}")]
    InvalidGranularity(String),

    /// Errors related to configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A filename pattern that failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Errors related to I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for roll_period operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new invalid granularity error
    pub fn invalid_granularity(value: impl std::fmt::Display) -> Self {
        Self::InvalidGranularity(value.to_string())
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an invalid granularity error
    pub fn is_invalid_granularity(&self) -> bool {
        matches!(self, Self::InvalidGranularity(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is an I/O error
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Get a developer-friendly description of the error
    pub fn dev_description(&self) -> String {
        match self {
            Self::InvalidGranularity(value) => format!("Invalid rolling granularity: {}", value),
            Self::Config(msg) => format!("Configuration error: {}", msg),
            Self::Pattern(err) => format!("Pattern error: {}", err),
            Self::Io(err) => format!("I/O error: {}", err),
            Self::Serialization(err) => format!("Serialization error: {}", err),
        }
    }

    /// Get a user-friendly suggestion for resolving the error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::InvalidGranularity(_) => Some(
                "Use one of: unbounded, year, month, day, hour, minute".to_string(),
            ),
            Self::Config(_) => Some("Check the rolling file configuration values".to_string()),
            Self::Io(err) if err.kind() == io::ErrorKind::NotFound => {
                Some("The specified file or directory does not exist".to_string())
            }
            Self::Io(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                Some("You don't have permission to access this file or directory".to_string())
            }
            _ => None,
        }
    }
}

// A typed `Granularity` converts into itself without failing
impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
