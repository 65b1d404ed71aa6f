//! Shared test utilities for rtfilter.
//!
//! This crate provides common test helpers, assertions, and signal fixtures
//! to reduce code duplication across the filter test suites.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`assertions`] - Float-aware assertion macros
//! - [`signals`] - Deterministic test signals and plant models
//! - [`tracking`] - Allocation tracking for sample-path tests
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! rtfilter-test-helpers = { path = "../rtfilter-test-helpers" }
//! ```
//!
//! ```rust,ignore
//! use rtfilter_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod assertions;
pub mod must;
pub mod prelude;
pub mod signals;

#[cfg(feature = "tracking")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracking")))]
pub mod tracking;

#[cfg(all(test, feature = "tracking"))]
#[global_allocator]
static GLOBAL_TEST: tracking::TrackingAllocator = tracking::TrackingAllocator;

pub use must::*;

#[cfg(feature = "tracking")]
pub use tracking::track;
