//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use rtfilter_test_helpers::prelude::*;
//! ```

pub use crate::{
    assert_all_finite, assert_approx_eq, assert_in_range, assert_samples_approx_eq,
};
pub use crate::must::{must, must_some, must_with};
pub use crate::signals::{FirstOrderPlant, noise, ramp, sine, step};

#[cfg(feature = "tracking")]
pub use crate::assert_no_alloc;
#[cfg(feature = "tracking")]
pub use crate::tracking::{AllocationGuard, TrackingAllocator, track};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
