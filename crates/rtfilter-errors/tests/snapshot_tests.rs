//! Snapshot tests for error message formatting.
//!
//! These tests verify that error messages are formatted consistently
//! and remain stable across changes.

use insta::assert_snapshot;
use rtfilter_errors::{ConfigurationError, FilterError, OperationError};

#[test]
fn test_configuration_error_message() {
    assert_snapshot!(
        ConfigurationError::new("alpha", "in (0, 1]", 1.5).to_string(),
        @"alpha must be in (0, 1], got 1.5"
    );
}

#[test]
fn test_window_size_message() {
    assert_snapshot!(
        ConfigurationError::new("window_size", "at least 1", 0.0).to_string(),
        @"window_size must be at least 1, got 0"
    );
}

#[test]
fn test_non_positive_dt_message() {
    assert_snapshot!(
        OperationError::NonPositiveDt { dt: -0.25 }.to_string(),
        @"dt must be finite and > 0, got -0.25"
    );
}

#[test]
fn test_wrapped_configuration_message() {
    let err: FilterError = ConfigurationError::new("out_max", "greater than out_min", -1.0).into();
    assert_snapshot!(
        err.to_string(),
        @"configuration error: out_max must be greater than out_min, got -1"
    );
}

#[test]
fn test_invalid_argument_message() {
    assert_snapshot!(
        FilterError::invalid_argument("unknown anti-windup code 9").to_string(),
        @"invalid argument: unknown anti-windup code 9"
    );
}
