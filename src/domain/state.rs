use super::schema::{ALL_FIELDS, Field, Step};
use super::validation::{FieldError, ValidationResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    /// Sanitized value, as validated and submitted.
    pub value: String,
    pub display: String,
    pub error: Option<FieldError>,
}

/// Field values of one accepted step, keyed by field key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub step: Step,
    pub fields: BTreeMap<&'static str, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A submission for the active step is still settling.
    InFlight,
    /// The wizard is finished; only exit is available.
    Complete,
    /// The field is not collected on the active step.
    FieldNotInStep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Validated(ValidationResult),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed; the payload goes to the sink and the step settles.
    Accepted(Payload),
    /// At least one field failed. The step is unchanged.
    Rejected(Vec<(Field, FieldError)>),
    Ignored(IgnoreReason),
}

/// The whole wizard session as one value.
///
/// Every event produces a new `WizardState`; the step only ever moves forward and
/// fields of earlier steps are kept as they were when their step was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    step: Step,
    fields: BTreeMap<Field, FieldState>,
    in_flight: BTreeSet<Step>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: Step::Credentials,
            fields: ALL_FIELDS
                .into_iter()
                .map(|field| (field, FieldState::default()))
                .collect(),
            in_flight: BTreeSet::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn field(&self, field: Field) -> &FieldState {
        // Every field is inserted in `new` and never removed.
        &self.fields[&field]
    }

    pub fn is_in_flight(&self, step: Step) -> bool {
        self.in_flight.contains(&step)
    }

    pub fn has_submission_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Current error messages by field key, for fields that have one.
    pub fn errors(&self) -> BTreeMap<&'static str, String> {
        self.fields
            .iter()
            .filter_map(|(field, state)| state.error.map(|e| (field.key(), e.to_string())))
            .collect()
    }

    /// Applies one keystroke: formats `raw`, validates it and stores the result.
    pub fn with_input(&self, field: Field, raw: &str, today: NaiveDate) -> (Self, InputOutcome) {
        if self.step.is_terminal() {
            return (self.clone(), InputOutcome::Ignored(IgnoreReason::Complete));
        }
        if field.step() != self.step {
            return (
                self.clone(),
                InputOutcome::Ignored(IgnoreReason::FieldNotInStep),
            );
        }

        let formatted = field.format(raw);
        let result = field.validate(&formatted.value, today);
        let mut next = self.clone();
        next.fields.insert(
            field,
            FieldState {
                value: formatted.value,
                display: formatted.display,
                error: result.err(),
            },
        );
        (next, InputOutcome::Validated(result))
    }

    /// Re-validates every field of the active step, touched or not.
    ///
    /// On success the step is marked in flight and the payload returned; the step
    /// itself only advances through [`WizardState::settle`].
    pub fn begin_submit(&self, today: NaiveDate) -> (Self, SubmitOutcome) {
        if self.step.is_terminal() {
            return (self.clone(), SubmitOutcome::Ignored(IgnoreReason::Complete));
        }
        if self.is_in_flight(self.step) {
            return (self.clone(), SubmitOutcome::Ignored(IgnoreReason::InFlight));
        }

        let mut next = self.clone();
        let mut failures = Vec::new();
        for &field in self.step.fields() {
            let state = next.fields.entry(field).or_default();
            state.error = field.validate(&state.value, today).err();
            if let Some(error) = state.error {
                failures.push((field, error));
            }
        }

        if !failures.is_empty() {
            return (next, SubmitOutcome::Rejected(failures));
        }

        let payload = Payload {
            step: self.step,
            fields: self
                .step
                .fields()
                .iter()
                .map(|&field| (field.key(), self.field(field).value.clone()))
                .collect(),
        };
        next.in_flight.insert(self.step);
        (next, SubmitOutcome::Accepted(payload))
    }

    /// Ends the settle delay of `step`, advancing if it is still the active step.
    pub fn settle(&self, step: Step) -> Self {
        let mut next = self.clone();
        next.in_flight.remove(&step);
        if next.step == step
            && let Some(following) = step.next()
        {
            next.step = following;
        }
        next
    }
}
