use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::models::AddressDraft;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("literal pattern")
    })
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^01[0-9]{8,9}$").expect("literal pattern"))
}

fn zip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{5}$").expect("literal pattern"))
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::MissingField { field: "email" });
    }
    if !email_pattern().is_match(email) {
        return Err(ValidationError::InvalidField {
            field: "email",
            reason: "not a valid email address",
        });
    }
    Ok(())
}

/// Eight or more characters with at least one letter and one digit,
/// matching the signup form rule of the web client.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingField { field: "password" });
    }
    let long_enough = password.chars().count() >= 8;
    let has_letter = password.chars().any(|ch| ch.is_ascii_alphabetic());
    let has_digit = password.chars().any(|ch| ch.is_ascii_digit());
    if !(long_enough && has_letter && has_digit) {
        return Err(ValidationError::InvalidField {
            field: "password",
            reason: "must be at least 8 characters with a letter and a digit",
        });
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field: "username" });
    }
    let length = trimmed.chars().count();
    if !(2..=10).contains(&length) || trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidField {
            field: "username",
            reason: "must be 2-10 characters without spaces",
        });
    }
    Ok(())
}

/// Required-field check run before dispatching any address mutation.
/// A failure here blocks the request entirely; no network round trip.
pub fn validate_draft(draft: &AddressDraft) -> Result<(), ValidationError> {
    let required: [(&'static str, &str); 5] = [
        ("receiver_name", &draft.receiver_name),
        ("receiver_phone", &draft.receiver_phone),
        ("main_address", &draft.main_address),
        ("detail_address", &draft.detail_address),
        ("zip_code", &draft.zip_code),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField { field });
        }
    }
    if !phone_pattern().is_match(draft.receiver_phone.trim()) {
        return Err(ValidationError::InvalidField {
            field: "receiver_phone",
            reason: "expected a mobile number like 01012345678",
        });
    }
    if !zip_pattern().is_match(draft.zip_code.trim()) {
        return Err(ValidationError::InvalidField {
            field: "zip_code",
            reason: "expected a 5-digit postal code",
        });
    }
    Ok(())
}

/// 01012345678 -> 010-1234-5678. Unrecognized shapes pass through
/// untouched so the raw value still renders.
pub fn format_phone_number(phone: &str) -> String {
    let digits = phone.trim();
    if !phone_pattern().is_match(digits) {
        return digits.to_string();
    }
    let tail = &digits[3..];
    let split = tail.len() - 4;
    format!("{}-{}-{}", &digits[..3], &tail[..split], &tail[split..])
}
