use crate::domain::schema::Field;
use crate::error::{Result, WizardError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Input,
    Submit,
    /// Block until the pending settle delay has elapsed.
    Wait,
    Exit,
}

/// One row of a scripted session: `action, field, value`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct WizardEvent {
    pub action: EventAction,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl WizardEvent {
    /// Resolves the `field` column of an `input` row.
    pub fn target(&self) -> Result<Field> {
        self.field
            .as_deref()
            .ok_or(WizardError::MissingField)?
            .parse()
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

/// Reads wizard events from a CSV source.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    /// Creates a new `EventReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes events; a malformed row yields an `Err` without ending
    /// the stream.
    pub fn events(self) -> impl Iterator<Item = Result<WizardEvent>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(WizardError::from))
    }
}
