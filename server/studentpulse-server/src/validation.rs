//! Request validation utilities for consistent validation across handlers
//!
//! This module provides a `RequestValidation` trait and helper macros to
//! centralize validation logic and ensure consistent error messages.

use crate::error::ApiError;

/// Trait for validating request payloads
///
/// Implement this trait for all request body types so handlers can run
/// `payload.validate()?` before touching the database.
pub trait RequestValidation {
    /// Validates the request and returns an error if validation fails
    fn validate(&self) -> Result<(), ApiError>;
}

/// Macro for validating fields with custom predicates
///
/// # Usage
///
/// ```rust,ignore
/// validate_field!(self.username, !self.username.trim().is_empty(), "Username is required");
/// ```
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Macro for validating required fields (non-empty strings)
///
/// # Usage
///
/// ```rust,ignore
/// validate_required!(self.username, "Username is required");
/// ```
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        validate_field!($field, !$field.trim().is_empty(), $message);
    };
}

/// Macro for validating string length
///
/// # Usage
///
/// ```rust,ignore
/// validate_length!(self.password, 8, 128, "Password must be between 8 and 128 characters");
/// ```
#[macro_export]
macro_rules! validate_length {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        let len = $field.len();
        validate_field!($field, len >= $min && len <= $max, $message);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRequest {
        username: String,
        password: String,
    }

    impl RequestValidation for TestRequest {
        fn validate(&self) -> Result<(), ApiError> {
            validate_required!(self.username, "Username is required");
            validate_length!(
                self.password,
                8,
                128,
                "Password must be between 8 and 128 characters"
            );
            Ok(())
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let req = TestRequest {
            username: "admin".to_string(),
            password: "long-enough".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_required_field_fails() {
        let req = TestRequest {
            username: "   ".to_string(),
            password: "long-enough".to_string(),
        };
        let err = req.validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(m) if m == "Username is required"));
    }

    #[test]
    fn test_length_bounds_enforced() {
        let req = TestRequest {
            username: "admin".to_string(),
            password: "short".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
