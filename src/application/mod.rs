//! Application layer: the wizard controller.
//!
//! `WizardController` turns input and submit events into new `WizardState`
//! values and runs the side effects of accepted steps on Tokio tasks.

pub mod wizard;
