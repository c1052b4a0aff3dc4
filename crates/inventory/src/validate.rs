use std::fmt::Display;

use gearledger_core::{DomainError, DomainResult};

/// Trimmed value of a required text field.
pub(crate) fn required(field: &str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

pub(crate) fn optional(value: &str) -> String {
    value.trim().to_string()
}

pub(crate) fn positive_quantity(field: &str, value: u32) -> DomainResult<u32> {
    if value == 0 {
        return Err(DomainError::validation(format!("{field} must be at least 1")));
    }
    Ok(value)
}

pub(crate) fn at_most(field: &str, value: u32, limit: u32) -> DomainResult<u32> {
    if value > limit {
        return Err(DomainError::validation(format!("{field} must be at most {limit}")));
    }
    Ok(value)
}

/// Prefix a validation message with the row it came from.
pub(crate) fn in_row(id: impl Display, err: DomainError) -> DomainError {
    match err {
        DomainError::Validation(msg) => DomainError::validation(format!("{id}: {msg}")),
        other => other,
    }
}
