//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant maps to exactly one HTTP status at the API boundary; the
/// mapping lives in `catalog-api`, not here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The caller passed a structurally invalid id or payload.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// One or more field constraints were violated.
    ///
    /// Each entry reads `"field: reason"`.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Anything else. The detail is for logs only.
    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn validation<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation(errors.into_iter().map(Into::into).collect())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Field-level violations, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&[String]> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_joins_fields() {
        let err = DomainError::validation(["name: too short", "price: too low"]);
        assert_eq!(
            err.to_string(),
            "validation failed: name: too short; price: too low"
        );
        assert_eq!(err.field_errors().map(<[String]>::len), Some(2));
    }

    #[test]
    fn not_found_displays_message_verbatim() {
        let err = DomainError::not_found("Item with ID 7 not found in the catalog");
        assert_eq!(err.to_string(), "Item with ID 7 not found in the catalog");
        assert!(err.field_errors().is_none());
    }
}
