//! Conversion error types.
//!
//! The translation layer is expected to succeed for any structurally valid
//! input:
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | Absent optional sub-record (resource usage, priority) | Documented defaults, no error |
//! | Absent required identity (application id, job id) | [`ConvertError::MissingField`] |
//! | Source enum value with no target assignment | Impossible — mappings are exhaustive `match`es |
//!
//! A `MissingField` error indicates a defect in the upstream record producer,
//! not a transient condition; callers should surface it rather than retry.

use thiserror::Error;

/// Errors that can occur while translating cluster-manager records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// A required identity field is absent from the source record.
    ///
    /// An identity-less status is meaningless, so conversion fails fast
    /// rather than producing a partially constructed record.
    #[error("required field is absent: {0}")]
    MissingField(&'static str),
}

impl ConvertError {
    /// Returns the name of the missing field, if this is a `MissingField`.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(name) => Some(name),
        }
    }
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = ConvertError::MissingField("application_id");
        assert_eq!(err.to_string(), "required field is absent: application_id");
        assert_eq!(err.missing_field(), Some("application_id"));
    }
}
