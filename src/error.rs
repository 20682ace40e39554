use crate::domain::schema::Step;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Event is missing a field name")]
    MissingField,
    #[error("Exit is only available once the wizard is complete (current step: {step})")]
    NotComplete { step: Step },
    #[error("Wizard state channel closed")]
    StateClosed,
}

/// Failure reported by a submission sink. Never surfaces into wizard state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Sink delivery failed: {0}")]
pub struct SinkError(pub String);

pub type Result<T> = std::result::Result<T, WizardError>;
