use super::format::digits_only;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_CARD_DIGITS: usize = 13;
pub const MAX_CARD_DIGITS: usize = 19;
pub const EXPIRY_SEPARATOR: &str = " / ";

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// A field-level validation failure.
///
/// The `Display` output is the message shown under the field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("This email is invalid. Make sure it's written like name@domain.com")]
    InvalidEmail,
    #[error("You must enter a password.")]
    PasswordEmpty,
    #[error("Your password must be at least 8 characters.")]
    PasswordTooShort,
    #[error("Enter the name on card.")]
    CardholderNameEmpty,
    #[error("Enter a card number.")]
    CardNumberEmpty,
    #[error("Enter a valid card number.")]
    CardNumberInvalid,
    #[error("Enter an expiry date.")]
    ExpiryEmpty,
    #[error("Use MM / YY format.")]
    ExpiryMalformed,
    #[error("Enter a valid month.")]
    ExpiryMonthOutOfRange,
    #[error("Your card has expired.")]
    CardExpired,
    #[error("Enter a CVV.")]
    CvvEmpty,
    #[error("Enter a 3-digit CVV.")]
    CvvMalformed,
}

/// Outcome of a single validator. Failures are plain values, never propagated.
pub type ValidationResult = Result<(), FieldError>;

pub fn validate_email(value: &str) -> ValidationResult {
    if EMAIL_SHAPE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

/// Length is counted in unicode scalar values.
pub fn validate_password(value: &str) -> ValidationResult {
    if value.is_empty() {
        Err(FieldError::PasswordEmpty)
    } else if value.chars().count() < MIN_PASSWORD_LEN {
        Err(FieldError::PasswordTooShort)
    } else {
        Ok(())
    }
}

pub fn validate_cardholder_name(value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        Err(FieldError::CardholderNameEmpty)
    } else {
        Ok(())
    }
}

pub fn validate_card_number(value: &str) -> ValidationResult {
    if value.is_empty() {
        return Err(FieldError::CardNumberEmpty);
    }
    let digits = digits_only(value);
    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&digits.len()) || !luhn_checksum_valid(&digits)
    {
        return Err(FieldError::CardNumberInvalid);
    }
    Ok(())
}

/// Luhn mod-10 check over an ASCII digit string.
///
/// Walking from the rightmost digit, every second digit is doubled (minus 9 when
/// the product exceeds 9); the number is valid when the sum is a multiple of 10.
/// Returns `false` for empty input or any non-digit character.
pub fn luhn_checksum_valid(digits: &str) -> bool {
    if digits.is_empty() {
        return false;
    }
    let mut sum = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    sum % 10 == 0
}

/// Validates a formatted `MM / YY` expiry against `today`.
///
/// Years are two-digit and compared to `today`'s year modulo 100. A card expiring
/// in the current month is still valid.
pub fn validate_expiry(value: &str, today: NaiveDate) -> ValidationResult {
    if value.is_empty() {
        return Err(FieldError::ExpiryEmpty);
    }
    let (month, year) = parse_expiry(value)?;
    if !(1..=12).contains(&month) {
        return Err(FieldError::ExpiryMonthOutOfRange);
    }

    let current_year = today.year().rem_euclid(100) as u32;
    let current_month = today.month();
    if year < current_year || (year == current_year && month < current_month) {
        return Err(FieldError::CardExpired);
    }
    Ok(())
}

fn parse_expiry(value: &str) -> Result<(u32, u32), FieldError> {
    let segments: Vec<&str> = value.split(EXPIRY_SEPARATOR).collect();
    let [month, year] = segments.as_slice() else {
        return Err(FieldError::ExpiryMalformed);
    };
    Ok((parse_segment(month)?, parse_segment(year)?))
}

fn parse_segment(segment: &str) -> Result<u32, FieldError> {
    if segment.len() != 2 || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::ExpiryMalformed);
    }
    segment.parse().map_err(|_| FieldError::ExpiryMalformed)
}

pub fn validate_cvv(value: &str) -> ValidationResult {
    if value.is_empty() {
        Err(FieldError::CvvEmpty)
    } else if value.len() == 3 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(FieldError::CvvMalformed)
    }
}
