//! Unwrap helpers with good error messages.
//!
//! These helpers replace `unwrap()` and `expect()` in test code. Filter
//! constructors return `FilterResult`, so most test setup reads
//! `must(Alpha::new(0.5, 0.0))`.

use std::fmt::Debug;

/// Unwrap a `Result`, panicking with the error value on `Err`.
///
/// # Example
///
/// ```rust
/// use rtfilter_test_helpers::must;
///
/// let result: Result<f32, &str> = Ok(0.5);
/// assert!((must(result) - 0.5).abs() < f32::EPSILON);
/// ```
///
/// # Panics
///
/// Panics if the result is `Err`, with a message including the error value.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap a `Result`, naming what was being built when it fails.
///
/// # Example
///
/// ```rust
/// use rtfilter_test_helpers::must_with;
///
/// let result: Result<usize, &str> = Ok(4);
/// assert_eq!(must_with(result, "moving average window"), 4);
/// ```
///
/// # Panics
///
/// Panics if the result is `Err`, including `context` and the error value.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with({context}): unexpected Err: {e:?}"),
    }
}

/// Unwrap an `Option`, panicking with a custom message if `None`.
///
/// # Example
///
/// ```rust
/// use rtfilter_test_helpers::must_some;
///
/// let angle = Some(1.0_f32);
/// assert!((must_some(angle, "angle filter initialized") - 1.0).abs() < f32::EPSILON);
/// ```
///
/// # Panics
///
/// Panics if the option is `None`, with the provided message.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}
