//! Unified error type definition

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub use domo_byos_client::ClientError;

use crate::workflow::StateKind;

/// Why the private key file could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAccessReason {
    NotFound,
    PermissionDenied,
    Other(String),
}

impl fmt::Display for FileAccessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("Private key file not found"),
            Self::PermissionDenied => f.write_str("Permission denied when reading private key file"),
            Self::Other(detail) => write!(f, "Error reading private key file ({detail})"),
        }
    }
}

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// A required setting is missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The private key file is missing or unreadable
    #[error("{reason} at '{}'", .path.display())]
    FileAccess {
        path: PathBuf,
        reason: FileAccessReason,
    },

    /// The named warehouse is not in the integration's listing
    #[error(
        "Warehouse '{warehouse}' not found in available warehouses: [{}]",
        .available.join(", ")
    )]
    WarehouseNotFound {
        warehouse: String,
        available: Vec<String>,
    },

    /// A workflow step was attempted out of order
    #[error("Illegal workflow transition: {from} -> {to}")]
    IllegalTransition { from: StateKind, to: StateKind },

    /// Domo API error (converted from the client library)
    #[error("{0}")]
    Client(#[from] ClientError),
}

/// Failure categories reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    FileAccess,
    /// Non-success status from the service
    Http,
    /// Success status but the body lacks what the step needs
    ResponseShape,
    NotFound,
    /// Connection failure, timeout or client setup failure
    Transport,
    IllegalTransition,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::FileAccess { .. } => ErrorKind::FileAccess,
            Self::WarehouseNotFound { .. } => ErrorKind::NotFound,
            Self::IllegalTransition { .. } => ErrorKind::IllegalTransition,
            Self::Client(e) => match e {
                ClientError::HttpStatus { .. } => ErrorKind::Http,
                ClientError::ResponseShape { .. } | ClientError::ParseError { .. } => {
                    ErrorKind::ResponseShape
                }
                ClientError::NetworkError { .. }
                | ClientError::Timeout { .. }
                | ClientError::SerializationError { .. } => ErrorKind::Transport,
            },
        }
    }

    /// Whether it is expected behavior (bad input, remote rejection, missing
    /// warehouse); used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Configuration(_) | Self::FileAccess { .. } | Self::WarehouseNotFound { .. } => {
                true
            }
            Self::Client(e) => e.is_expected(),
            Self::IllegalTransition { .. } => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
