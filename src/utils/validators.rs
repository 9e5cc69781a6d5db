//! Field validation rules for user registration.
//!
//! Rules are plain functions returning tagged `(field, code)` errors so the
//! registration flow can accumulate every violation instead of stopping at
//! the first one.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::db::store::UserStore;
use crate::db::users::UserForm;
use crate::utils::errors::ServiceError;

/// Logins are lowercase alphanumeric/underscore only.
const LOGIN_PATTERN: &str = r"^[a-z0-9_]+$";

/// Error code for a login that is already taken.
pub const LOGIN_ALREADY_EXISTS: &str = "login_already_exists";
/// Error code for a login that fails the format rule.
pub const INVALID_LOGIN: &str = "invalid_login";
/// Error code for a missing required field.
pub const REQUIRED: &str = "required";

lazy_static! {
    /// Compiled regex for login validation.
    static ref LOGIN_REGEX: Regex = Regex::new(LOGIN_PATTERN).expect("Invalid regex for login");
}

/// A validation failure tied to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub code: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, code: &'static str) -> Self {
        FieldError { field, code }
    }
}

/// Structural rules: required fields must be present and non-empty.
///
/// Missing form fields bind as empty strings, so emptiness covers both the
/// absent and the blank case.
pub fn structural_rules(form: &UserForm) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if form.name.trim().is_empty() {
        errors.push(FieldError::new("name", REQUIRED));
    }
    if form.login.trim().is_empty() {
        errors.push(FieldError::new("login", REQUIRED));
    }
    errors
}

/// Domain rules for registration: login uniqueness and login format.
///
/// Both rules are evaluated unconditionally so that a login violating both at
/// once surfaces both errors. Store failures propagate as `ServiceError`;
/// they are infrastructure problems, not validation results.
pub fn registration_rules(
    form: &UserForm,
    store: &dyn UserStore,
) -> Result<Vec<FieldError>, ServiceError> {
    let mut errors = Vec::new();
    if store.contains_login(&form.login)? {
        errors.push(FieldError::new("login", LOGIN_ALREADY_EXISTS));
    }
    if !LOGIN_REGEX.is_match(&form.login) {
        errors.push(FieldError::new("login", INVALID_LOGIN));
    }
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::MemoryStore;

    fn form(name: &str, login: &str) -> UserForm {
        UserForm {
            name: name.to_string(),
            login: login.to_string(),
        }
    }

    #[test]
    fn login_regex_accepts_lowercase_digits_and_underscore() {
        let store = MemoryStore::new();
        for login in ["john", "555555", "john_doe", "a1_b2"] {
            let errors = registration_rules(&form("x", login), &store).unwrap();
            assert!(errors.is_empty(), "expected '{}' to be valid: {:?}", login, errors);
        }
    }

    #[test]
    fn login_regex_rejects_uppercase_spaces_and_symbols() {
        let store = MemoryStore::new();
        for login in ["Ana!", "John Doe", "UPPER", "héllo", ""] {
            let errors = registration_rules(&form("x", login), &store).unwrap();
            assert!(
                errors.contains(&FieldError::new("login", INVALID_LOGIN)),
                "expected '{}' to be invalid",
                login
            );
        }
    }

    #[test]
    fn existing_login_is_reported() {
        let store = MemoryStore::new();
        store.seed("Bob", "bob");
        let errors = registration_rules(&form("Other", "bob"), &store).unwrap();
        assert_eq!(errors, vec![FieldError::new("login", LOGIN_ALREADY_EXISTS)]);
    }

    #[test]
    fn both_rules_fire_for_a_taken_malformed_login() {
        let store = MemoryStore::new();
        store.seed("John Doe", "John Doe");
        let errors = registration_rules(&form("John Doe", "John Doe"), &store).unwrap();
        assert_eq!(
            errors,
            vec![
                FieldError::new("login", LOGIN_ALREADY_EXISTS),
                FieldError::new("login", INVALID_LOGIN),
            ]
        );
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let errors = structural_rules(&form("   ", "  \t"));
        assert_eq!(
            errors,
            vec![
                FieldError::new("name", REQUIRED),
                FieldError::new("login", REQUIRED),
            ]
        );
    }

    #[test]
    fn structural_rules_flag_empty_fields() {
        let errors = structural_rules(&form("", ""));
        assert_eq!(
            errors,
            vec![
                FieldError::new("name", REQUIRED),
                FieldError::new("login", REQUIRED),
            ]
        );
    }
}
