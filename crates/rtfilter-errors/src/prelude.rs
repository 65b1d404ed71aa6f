//! Prelude module for convenient error handling imports.
//!
//! ```
//! use rtfilter_errors::prelude::*;
//!
//! fn reject() -> FilterResult<()> {
//!     Err(OperationError::NonPositiveDt { dt: 0.0 }.into())
//! }
//!
//! assert!(reject().is_err());
//! ```

pub use crate::{
    FilterResult,
    common::{ErrorCategory, ErrorSeverity, FilterError},
    config::ConfigurationError,
    operation::OperationError,
};
