use super::format::{digits_only, format_card_number, format_cvv, format_expiry};
use super::validation::{
    ValidationResult, validate_card_number, validate_cardholder_name, validate_cvv,
    validate_email, validate_expiry, validate_password,
};
use crate::error::WizardError;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Wizard steps in the only order they can be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Credentials,
    Payment,
    Complete,
}

impl Step {
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Credentials => Some(Step::Payment),
            Step::Payment => Some(Step::Complete),
            Step::Complete => None,
        }
    }

    /// Ordered fields collected on this step. `Complete` has none.
    pub fn fields(self) -> &'static [Field] {
        STEP_SCHEMA
            .iter()
            .find(|entry| entry.step == self)
            .map(|entry| entry.fields)
            .unwrap_or(&[])
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Credentials => "credentials",
            Step::Payment => "payment",
            Step::Complete => "complete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Email,
    Password,
    CardholderName,
    CardNumber,
    ExpiryDate,
    Cvv,
}

pub const ALL_FIELDS: [Field; 6] = [
    Field::Email,
    Field::Password,
    Field::CardholderName,
    Field::CardNumber,
    Field::ExpiryDate,
    Field::Cvv,
];

/// Formatted input: `value` feeds the validator and the payload, `display` is what
/// the field shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub value: String,
    pub display: String,
}

/// How one field turns keystrokes into a value and checks it.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub key: &'static str,
    pub format: fn(&str) -> Formatted,
    pub validate: fn(&str, NaiveDate) -> ValidationResult,
}

pub struct StepSchema {
    pub step: Step,
    pub fields: &'static [Field],
}

pub static STEP_SCHEMA: [StepSchema; 3] = [
    StepSchema {
        step: Step::Credentials,
        fields: &[Field::Email, Field::Password],
    },
    StepSchema {
        step: Step::Payment,
        fields: &[
            Field::CardholderName,
            Field::CardNumber,
            Field::ExpiryDate,
            Field::Cvv,
        ],
    },
    StepSchema {
        step: Step::Complete,
        fields: &[],
    },
];

fn verbatim(raw: &str) -> Formatted {
    Formatted {
        value: raw.to_string(),
        display: raw.to_string(),
    }
}

static FIELD_RULES: [FieldRule; 6] = [
    FieldRule {
        field: Field::Email,
        key: "email",
        format: verbatim,
        validate: |value, _| validate_email(value),
    },
    FieldRule {
        field: Field::Password,
        key: "password",
        format: verbatim,
        validate: |value, _| validate_password(value),
    },
    FieldRule {
        field: Field::CardholderName,
        key: "cardholderName",
        format: verbatim,
        validate: |value, _| validate_cardholder_name(value),
    },
    FieldRule {
        field: Field::CardNumber,
        key: "cardNumber",
        format: |raw| {
            let display = format_card_number(raw);
            Formatted {
                value: digits_only(&display),
                display,
            }
        },
        validate: |value, _| validate_card_number(value),
    },
    FieldRule {
        field: Field::ExpiryDate,
        key: "expiryDate",
        format: |raw| verbatim(&format_expiry(raw)),
        validate: validate_expiry,
    },
    FieldRule {
        field: Field::Cvv,
        key: "cvv",
        format: |raw| verbatim(&format_cvv(raw)),
        validate: |value, _| validate_cvv(value),
    },
];

impl Field {
    pub fn rule(self) -> &'static FieldRule {
        // FIELD_RULES is declared in enum order.
        &FIELD_RULES[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.rule().key
    }

    /// The step this field is collected on.
    pub fn step(self) -> Step {
        STEP_SCHEMA
            .iter()
            .find(|entry| entry.fields.contains(&self))
            .map(|entry| entry.step)
            .unwrap_or(Step::Complete)
    }

    pub fn format(self, raw: &str) -> Formatted {
        (self.rule().format)(raw)
    }

    pub fn validate(self, value: &str, today: NaiveDate) -> ValidationResult {
        (self.rule().validate)(value, today)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_FIELDS
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| WizardError::UnknownField(s.to_string()))
    }
}
