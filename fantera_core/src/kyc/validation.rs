//! Strict validation of KYC submissions.
//!
//! Validation enumerates every failing field rather than stopping at the
//! first, so callers can surface a complete error list in one round trip.

use serde::{Deserialize, Serialize};

const MAX_NAME_LEN: usize = 100;

/// Personal details submitted to start identity verification.
///
/// All fields default to empty on deserialization so that missing keys
/// surface as field-level validation errors instead of parse failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KycSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl KycSubmission {
    /// Validate every field, collecting all error messages.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        validate_name(&self.first_name, "First name", &mut errors);
        validate_name(&self.last_name, "Last name", &mut errors);

        if !is_valid_email(&self.email) {
            errors.push("Valid email required".to_string());
        }
        if !is_iso_date(&self.date_of_birth) {
            errors.push("Date must be YYYY-MM-DD format".to_string());
        }
        if self.street_address.is_empty() {
            errors.push("Street address is required".to_string());
        }
        if self.city.is_empty() {
            errors.push("City is required".to_string());
        }
        if self.state.is_empty() {
            errors.push("State/province is required".to_string());
        }
        if self.postal_code.is_empty() {
            errors.push("Postal code is required".to_string());
        }
        if self.country.len() != 3 || !self.country.chars().all(|c| c.is_ascii_alphabetic()) {
            errors.push("Country must be 3-letter ISO code (e.g., USA, GBR, BRA)".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn validate_name(value: &str, label: &str, errors: &mut Vec<String>) {
    if value.is_empty() {
        errors.push(format!("{label} is required"));
    } else if value.chars().count() > MAX_NAME_LEN {
        errors.push(format!("{label} must be at most {MAX_NAME_LEN} characters"));
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| {
            if i == 4 || i == 7 {
                *b == b'-'
            } else {
                b.is_ascii_digit()
            }
        })
}
