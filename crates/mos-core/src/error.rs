//! Error handling for the MOS estimation library
//!
//! Scoring itself never fails: every numeric input is absorbed by
//! normalization and clamping. The errors here cover the two places where
//! something can actually go wrong, classifying a record and loading a
//! coefficient table.

use std::fmt;
use thiserror::Error;

/// Result type alias for MOS operations
pub type Result<T> = std::result::Result<T, MosError>;

/// Error type for MOS operations
#[derive(Error, Debug)]
pub enum MosError {
    /// The record carries neither audio nor video parameters
    #[error("Invalid request: no audio or video parameters")]
    MissingMediaParams,

    /// The record carries both audio and video parameters
    #[error("Invalid request: both audio and video parameters present")]
    ConflictingMediaParams,

    /// A coefficient table failed validation
    #[error("Invalid MOS configuration: {details}")]
    InvalidConfig { details: String },

    /// A coefficient table could not be parsed
    #[error("Failed to parse MOS configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A coefficient table could not be rendered
    #[error("Failed to serialize MOS configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// I/O operation failed
    #[error("I/O operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl MosError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingMediaParams | Self::ConflictingMediaParams => {
                ErrorCategory::Classification
            }
            Self::InvalidConfig { .. } | Self::ConfigParse(_) | Self::ConfigSerialize(_) => {
                ErrorCategory::Configuration
            }
            Self::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A stat record could not be routed to a scorer
    Classification,
    /// Coefficient table errors
    Configuration,
    /// I/O related errors
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classification => write!(f, "Classification"),
            Self::Configuration => write!(f, "Configuration"),
            Self::Io => write!(f, "I/O"),
        }
    }
}
