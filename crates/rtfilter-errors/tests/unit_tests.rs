//! Unit tests for all error variants.
//!
//! Tests Display implementations, std::error::Error implementations,
//! and From conversions.

use rtfilter_errors::{
    ConfigurationError, ErrorCategory, ErrorSeverity, FilterError, FilterResult, OperationError,
};

mod operation_error_tests {
    use super::*;

    #[test]
    fn test_all_variants_display() -> FilterResult<()> {
        let variants = [
            OperationError::FixedRateUnavailable { filter: "SlewRateLimiter" },
            OperationError::NonPositiveDt { dt: -0.5 },
            OperationError::IndexOutOfRange { index: 4, len: 1 },
        ];

        for variant in variants {
            let msg = variant.to_string();
            assert!(
                !msg.is_empty(),
                "OperationError variant should have display message"
            );
        }
        Ok(())
    }

    #[test]
    fn test_fixed_rate_message_names_filter() -> FilterResult<()> {
        let msg = OperationError::FixedRateUnavailable { filter: "TauLowPass" }.to_string();
        assert!(msg.starts_with("TauLowPass"));
        Ok(())
    }
}

mod filter_error_tests {
    use super::*;

    fn reject_dt(dt: f32) -> FilterResult<f32> {
        Ok(OperationError::check_dt(dt)?)
    }

    fn reject_alpha(alpha: f32) -> FilterResult<f32> {
        Ok(ConfigurationError::coefficient("alpha", alpha)?)
    }

    #[test]
    fn test_question_mark_converts_operation_errors() {
        let err = reject_dt(0.0);
        assert!(matches!(
            err,
            Err(FilterError::Operation(OperationError::NonPositiveDt { .. }))
        ));
    }

    #[test]
    fn test_question_mark_converts_configuration_errors() {
        match reject_alpha(2.0) {
            Err(FilterError::Configuration(e)) => {
                assert_eq!(e.parameter, "alpha");
                assert_eq!(e.constraint, "in (0, 1]");
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_severity_and_category_follow_inner_error() {
        let err: FilterError = OperationError::IndexOutOfRange { index: 1, len: 1 }.into();
        assert_eq!(err.category(), ErrorCategory::Operation);
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_errors_are_cloneable_and_comparable() {
        let a: FilterError = ConfigurationError::new("r", "finite and > 0", 0.0).into();
        let b = a.clone();
        assert_eq!(a, b);
    }
}
