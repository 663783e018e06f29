//! Field-level validation errors.
//!
//! Mirrors the shape web clients already understand:
//! `{"errors": [{"msg": "...", "path": "title", "location": "body"}]}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    pub path: String,
    pub location: String,
}

impl FieldError {
    /// A failed check on a request body field.
    pub fn body(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            path: path.into(),
            location: "body".to_string(),
        }
    }
}

/// One or more failed field checks.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("validation failed: {}", summary(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Wraps the collected errors, returning `Ok(())` when there are none.
    pub fn check(errors: Vec<FieldError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.msg.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns true for strings that are empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
