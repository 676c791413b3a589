//! Sign-up rules for user accounts

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::domain::DomainError;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("password less than {0} characters")]
    PasswordTooShort(usize),

    #[error("dob must be a date formatted as YYYY-MM-DD")]
    MalformedDob,

    #[error("age less than {0} years")]
    TooYoung(u32),
}

impl From<UserValidationError> for DomainError {
    fn from(err: UserValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_AGE_YEARS: u32 = 8;
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Validate a plaintext password before hashing
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Parse a `YYYY-MM-DD` date of birth
pub fn parse_dob(raw: &str) -> Result<NaiveDate, UserValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DOB_FORMAT).map_err(|_| UserValidationError::MalformedDob)
}

/// Parse a date of birth and check the minimum age against `today`
///
/// A date of birth in the future counts as too young.
pub fn validate_dob(raw: &str, today: NaiveDate) -> Result<NaiveDate, UserValidationError> {
    let dob = parse_dob(raw)?;

    match today.years_since(dob) {
        Some(age) if age >= MIN_AGE_YEARS => Ok(dob),
        _ => Err(UserValidationError::TooYoung(MIN_AGE_YEARS)),
    }
}

/// `validate_dob` against the current UTC date
pub fn validate_dob_today(raw: &str) -> Result<NaiveDate, UserValidationError> {
    validate_dob(raw, Utc::now().date_naive())
}
