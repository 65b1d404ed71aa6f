//! Top-level error enum and classification shared by every filter.

use core::fmt;

use crate::{ConfigurationError, OperationError};

/// Top-level error type returned by filter constructors, mutators and
/// `update` calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// A parameter violated its constraint; nothing was changed.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A runtime precondition of `update` was not met.
    #[error("operation error: {0}")]
    Operation(#[from] OperationError),

    /// A value could not be converted at the call boundary.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl FilterError {
    /// Create an invalid-argument error with a message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        FilterError::InvalidArgument(msg.into())
    }

    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            FilterError::Configuration(_) => ErrorCategory::Configuration,
            FilterError::Operation(_) => ErrorCategory::Operation,
            FilterError::InvalidArgument(_) => ErrorCategory::InvalidArgument,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FilterError::Configuration(e) => e.severity(),
            FilterError::Operation(e) => e.severity(),
            FilterError::InvalidArgument(_) => ErrorSeverity::Error,
        }
    }

    /// True for [`FilterError::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, FilterError::Configuration(_))
    }

    /// True for [`FilterError::Operation`].
    pub fn is_operation(&self) -> bool {
        matches!(self, FilterError::Operation(_))
    }

    /// The configuration error, if this is one.
    pub fn as_configuration(&self) -> Option<&ConfigurationError> {
        match self {
            FilterError::Configuration(e) => Some(e),
            _ => None,
        }
    }

    /// The operation error, if this is one.
    pub fn as_operation(&self) -> Option<&OperationError> {
        match self {
            FilterError::Operation(e) => Some(e),
            _ => None,
        }
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Parameter validation failures
    Configuration = 0,
    /// Runtime precondition failures
    Operation = 1,
    /// Boundary conversion failures
    InvalidArgument = 2,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Configuration => write!(f, "Configuration"),
            ErrorCategory::Operation => write!(f, "Operation"),
            ErrorCategory::InvalidArgument => write!(f, "InvalidArgument"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Warning, the sample was skipped but the filter is intact
    Warning = 0,
    /// Error, the call was rejected
    Error = 1,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
        }
    }
}
