//! Checkout form field validation.
//!
//! Validation failures are data, not errors: [`validate`] always returns a
//! [`FieldValidation`] and never fails. Field names are matched
//! case-sensitively; anything that is not `email`, `phone`, or `zipCode` is
//! treated as a required free-text field.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::Email;

/// Message for an invalid `email` field.
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
/// Message for an invalid `phone` field.
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";
/// Message for an invalid `zipCode` field.
pub const ZIP_CODE_MESSAGE: &str = "Please enter a valid ZIP code";
/// Message for an empty required field.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Minimum number of digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Regex for a US ZIP or ZIP+4 code.
static ZIP_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("Invalid regex"));

/// Regex for a phone number once separators are stripped.
static PHONE_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]+$").expect("Invalid regex"));

/// Outcome of validating a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldValidation {
    /// Whether the value is acceptable.
    pub valid: bool,
    /// User-facing message; empty when valid.
    pub message: &'static str,
}

impl FieldValidation {
    const fn ok() -> Self {
        Self {
            valid: true,
            message: "",
        }
    }

    const fn invalid(message: &'static str) -> Self {
        Self {
            valid: false,
            message,
        }
    }

    const fn check(valid: bool, message: &'static str) -> Self {
        if valid { Self::ok() } else { Self::invalid(message) }
    }
}

/// Validate a raw field value.
///
/// ```
/// use bazaar_core::validation::validate;
///
/// assert!(validate("email", "a@b.co").valid);
/// assert!(!validate("zipCode", "abc").valid);
/// assert!(validate("city", "New York").valid);
/// ```
#[must_use]
pub fn validate(field: &str, value: &str) -> FieldValidation {
    match field {
        "email" => FieldValidation::check(Email::parse(value).is_ok(), EMAIL_MESSAGE),
        "phone" => FieldValidation::check(is_valid_phone(value), PHONE_MESSAGE),
        "zipCode" => FieldValidation::check(ZIP_CODE_RE.is_match(value), ZIP_CODE_MESSAGE),
        _ => FieldValidation::check(!value.trim().is_empty(), REQUIRED_MESSAGE),
    }
}

fn is_valid_phone(value: &str) -> bool {
    let stripped: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '(' | ')' | '-'))
        .collect();

    PHONE_DIGITS_RE.is_match(&stripped)
        && stripped.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// Per-field validation results as the user edits a form.
///
/// Every edit re-validates the field; a field that later becomes invalid
/// loses its valid mark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationState {
    valid: BTreeSet<String>,
    errors: BTreeMap<String, &'static str>,
}

impl ValidationState {
    /// Create an empty state with no field marked valid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `value` for `field` and record the outcome.
    pub fn record(&mut self, field: &str, value: &str) -> FieldValidation {
        let outcome = validate(field, value);
        if outcome.valid {
            self.valid.insert(field.to_owned());
            self.errors.remove(field);
        } else {
            self.valid.remove(field);
            self.errors.insert(field.to_owned(), outcome.message);
        }
        outcome
    }

    /// Whether `field` is currently marked valid.
    #[must_use]
    pub fn is_valid(&self, field: &str) -> bool {
        self.valid.contains(field)
    }

    /// The latest error message for `field`, if it is invalid.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field).copied()
    }

    /// Whether every field in `fields` is marked valid.
    #[must_use]
    pub fn all_valid(&self, fields: &[&str]) -> bool {
        fields.iter().all(|field| self.is_valid(field))
    }

    /// Forget all results.
    pub fn clear(&mut self) {
        self.valid.clear();
        self.errors.clear();
    }
}
