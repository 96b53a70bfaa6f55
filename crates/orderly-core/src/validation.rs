//! Validation utilities.

use crate::OrderlyError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `OrderlyError` on failure.
    fn validate_request(&self) -> Result<(), OrderlyError> {
        self.validate().map_err(validation_errors_to_orderly_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to [`OrderlyError::InvalidArgument`].
///
/// Fields are reported in name order so the message is stable.
#[must_use]
pub fn validation_errors_to_orderly_error(errors: ValidationErrors) -> OrderlyError {
    let mut field_errors: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                ((*field).to_string(), message)
            })
        })
        .collect();
    field_errors.sort();

    let message = field_errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ");

    OrderlyError::InvalidArgument(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}
