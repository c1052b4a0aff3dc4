//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// All variants are local and recoverable: the caller turns them into a
/// user-facing message and re-prompts. Nothing here is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing or a value was out of range.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation referenced a key that does not exist.
    #[error("not found")]
    NotFound,

    /// An operation was attempted outside the state it is valid in.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// An identifier was malformed (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Stable machine-readable code, suitable for presentation layers.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::NotFound => "not_found",
            DomainError::InvalidState(_) => "invalid_state",
            DomainError::InvalidId(_) => "invalid_id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_detail() {
        assert_eq!(
            DomainError::validation("item name is required").to_string(),
            "validation failed: item name is required"
        );
        assert_eq!(DomainError::not_found().to_string(), "not found");
        assert_eq!(
            DomainError::invalid_state("status is missing").to_string(),
            "invalid state: status is missing"
        );
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            DomainError::validation("x").code(),
            DomainError::not_found().code(),
            DomainError::invalid_state("x").code(),
            DomainError::invalid_id("x").code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
