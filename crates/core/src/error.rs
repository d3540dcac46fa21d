//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// corrupt records, bad identifiers). Transport concerns belong to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a blank form field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Data received from the backend breaks an invariant the domain relies on
    /// (e.g. a stock lot with a negative quantity). Results derived from such
    /// data must be treated as unreliable.
    #[error("data integrity violation: {0}")]
    DataIntegrity(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn data_integrity(msg: impl Into<String>) -> Self {
        Self::DataIntegrity(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Whether this error means the underlying record cannot be trusted.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Self::DataIntegrity(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = DomainError::data_integrity("lot 7 has negative quantity -3");
        assert_eq!(
            err.to_string(),
            "data integrity violation: lot 7 has negative quantity -3"
        );
        assert!(err.is_data_integrity());
        assert!(!DomainError::validation("x").is_data_integrity());
    }
}
