//! Error types for the rtfilter signal-processing and control library.
//!
//! Filters fail in exactly two ways at runtime, plus one boundary case:
//!
//! - [`ConfigurationError`]: a construction parameter or mutator argument
//!   violates its documented constraint. Raised before any state is touched,
//!   so a filter is never left partially configured.
//! - [`OperationError`]: an `update` call whose runtime precondition is not met
//!   (fixed-rate update without a sampling frequency, non-positive `dt`).
//! - [`FilterError::InvalidArgument`]: a conversion at the call boundary
//!   failed (unknown anti-windup code, unknown filter mode name).
//!
//! # RT Safety
//!
//! [`ConfigurationError`] and [`OperationError`] are `Copy` and carry only
//! `&'static str` and numeric payloads, so they can be returned from the
//! sample path without allocating.
//!
//! # Example
//!
//! ```
//! use rtfilter_errors::prelude::*;
//!
//! fn check_alpha(alpha: f32) -> FilterResult<f32> {
//!     Ok(ConfigurationError::ensure("alpha", "in (0, 1]", alpha, alpha > 0.0 && alpha <= 1.0)?)
//! }
//!
//! assert!(check_alpha(0.5).is_ok());
//! assert!(check_alpha(0.0).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod config;
pub mod operation;
pub mod prelude;

pub use common::{ErrorCategory, ErrorSeverity, FilterError};
pub use config::ConfigurationError;
pub use operation::OperationError;

/// A specialized `Result` type for filter construction and processing.
pub type FilterResult<T> = std::result::Result<T, FilterError>;
