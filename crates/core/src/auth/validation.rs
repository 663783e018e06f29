use super::{LoginRequest, SignupRequest};
use crate::validation::{is_blank, FieldError, ValidationErrors};

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Loose syntactic email check: one `@`, a non-empty local part, and a
/// domain containing a dot that neither starts nor ends the domain.
///
/// # Examples
///
/// ```
/// use blogstack_core::auth::is_valid_email;
///
/// assert!(is_valid_email("ada@example.com"));
/// assert!(!is_valid_email("ada@localhost"));
/// assert!(!is_valid_email("not-an-email"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Validates a signup request.
pub fn validate_signup(req: &SignupRequest) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    if is_blank(&req.name) {
        errors.push(FieldError::body("name", "Name is required"));
    }
    if !is_valid_email(&req.email) {
        errors.push(FieldError::body("email", "Please include a valid email"));
    }
    if req.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::body(
            "password",
            format!("Please enter a password with {MIN_PASSWORD_LENGTH} or more characters"),
        ));
    }
    ValidationErrors::check(errors)
}

/// Validates a login request.
pub fn validate_login(req: &LoginRequest) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    if !is_valid_email(&req.email) {
        errors.push(FieldError::body("email", "Please include a valid email"));
    }
    if req.password.is_empty() {
        errors.push(FieldError::body("password", "Password is required"));
    }
    ValidationErrors::check(errors)
}
