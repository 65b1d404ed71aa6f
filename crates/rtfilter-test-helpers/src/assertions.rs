//! Float-aware assertion macros for filter tests.

/// Assert that two floating-point values are approximately equal.
///
/// # Example
///
/// ```rust
/// use rtfilter_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(1.0_f32, 1.0001, 0.001);
/// assert_approx_eq!(0.5_f32, 0.5);
/// ```
///
/// The two-argument form uses a tolerance of `1e-6`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, 1e-6)
    };
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`: {}",
                left, right, diff, tolerance, format_args!($($arg)+)
            );
        }
    };
}

/// Assert that two sample sequences have equal length and agree element-wise
/// within a tolerance.
///
/// # Example
///
/// ```rust
/// use rtfilter_test_helpers::assert_samples_approx_eq;
///
/// assert_samples_approx_eq!(&[1.0_f32, 1.5], &[1.0_f32, 1.5001], 1e-3);
/// ```
#[macro_export]
macro_rules! assert_samples_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        if left.len() != right.len() {
            panic!(
                "assertion failed: sample sequences differ in length: {} vs {}",
                left.len(),
                right.len()
            );
        }
        for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            let diff = (*l - *r).abs();
            if !(diff <= tolerance) {
                panic!(
                    "assertion failed: samples differ at index {}\n  left: `{:?}`,\n right: `{:?}`,\n  tolerance: `{:?}`",
                    i, l, r, tolerance
                );
            }
        }
    };
}

/// Assert that every sample in a sequence is finite.
///
/// # Example
///
/// ```rust
/// use rtfilter_test_helpers::assert_all_finite;
///
/// assert_all_finite!(&[0.0_f32, -1.0, 2.5]);
/// ```
#[macro_export]
macro_rules! assert_all_finite {
    ($samples:expr $(,)?) => {
        for (i, s) in $samples.iter().enumerate() {
            if !s.is_finite() {
                panic!("assertion failed: sample {} is not finite: {:?}", i, s);
            }
        }
    };
}

/// Assert that a value is within a range (inclusive).
///
/// # Example
///
/// ```rust
/// use rtfilter_test_helpers::assert_in_range;
///
/// assert_in_range!(0.5_f32, -1.0, 1.0);
/// ```
#[macro_export]
macro_rules! assert_in_range {
    ($value:expr, $min:expr, $max:expr $(,)?) => {
        let value = $value;
        let min = $min;
        let max = $max;
        if !(value >= min && value <= max) {
            panic!(
                "assertion failed: value `{:?}` not in range [{:?}, {:?}]",
                value, min, max
            );
        }
    };
    ($value:expr, $min:expr, $max:expr, $($arg:tt)+) => {
        let value = $value;
        let min = $min;
        let max = $max;
        if !(value >= min && value <= max) {
            panic!(
                "assertion failed: value `{:?}` not in range [{:?}, {:?}]: {}",
                value, min, max, format_args!($($arg)+)
            );
        }
    };
}
