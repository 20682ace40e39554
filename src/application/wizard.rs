use crate::config::{SettleDelays, WizardConfig};
use crate::domain::ports::{ClockRef, SubmissionSinkRef};
use crate::domain::schema::{Field, Step};
use crate::domain::state::{InputOutcome, Payload, SubmitOutcome, WizardState};
use crate::error::{Result, WizardError};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Drives one wizard session.
///
/// `WizardController` owns the current [`WizardState`] and replaces it on every
/// event. Accepted submissions hand their payload to the sink on a detached task
/// and schedule a one-shot settle timer that advances the step. Neither can be
/// cancelled; dropping the controller does not stop a pending settle.
pub struct WizardController {
    state: Arc<watch::Sender<WizardState>>,
    sink: SubmissionSinkRef,
    clock: ClockRef,
    settle_delays: SettleDelays,
}

impl WizardController {
    /// Creates a controller positioned on the credentials step with empty fields.
    ///
    /// # Arguments
    ///
    /// * `config` - Settle delays per step.
    /// * `sink` - Receives the payload of each accepted step.
    /// * `clock` - Supplies "today" for expiry checks.
    pub fn new(config: &WizardConfig, sink: SubmissionSinkRef, clock: ClockRef) -> Self {
        let (state, _) = watch::channel(WizardState::new());
        Self {
            state: Arc::new(state),
            sink,
            clock,
            settle_delays: config.settle_delays,
        }
    }

    pub fn snapshot(&self) -> WizardState {
        self.state.borrow().clone()
    }

    pub fn step(&self) -> Step {
        self.state.borrow().step()
    }

    /// Formats and validates one keystroke for `field`.
    pub fn input(&self, field: Field, raw: &str) -> InputOutcome {
        let today = self.clock.today();
        let outcome = self.transition(|state| state.with_input(field, raw, today));
        if let InputOutcome::Ignored(reason) = outcome {
            debug!(%field, ?reason, "Input ignored");
        }
        outcome
    }

    /// Attempts to complete the active step.
    ///
    /// Must be called from within a Tokio runtime: an accepted submission spawns
    /// the sink delivery and the settle timer.
    pub fn submit(&self) -> SubmitOutcome {
        let today = self.clock.today();
        let outcome = self.transition(|state| state.begin_submit(today));
        match &outcome {
            SubmitOutcome::Accepted(payload) => {
                let step = payload.step;
                info!(%step, "Step accepted");
                self.deliver(payload.clone());
                self.schedule_settle(step);
            }
            SubmitOutcome::Rejected(failures) => {
                let fields: Vec<&str> = failures.iter().map(|(field, _)| field.key()).collect();
                debug!(?fields, "Submit rejected");
            }
            SubmitOutcome::Ignored(reason) => {
                debug!(?reason, "Submit ignored");
            }
        }
        outcome
    }

    /// Leaves the finished wizard. No validation takes place.
    pub fn exit(&self) -> Result<()> {
        let step = self.step();
        if step != Step::Complete {
            return Err(WizardError::NotComplete { step });
        }
        info!("Wizard exited");
        Ok(())
    }

    /// Resolves once the wizard has reached `step`.
    pub async fn wait_for_step(&self, step: Step) -> Result<()> {
        let mut receiver = self.state.subscribe();
        let reached = receiver.wait_for(|state| state.step() >= step).await.is_ok();
        if reached {
            Ok(())
        } else {
            Err(WizardError::StateClosed)
        }
    }

    /// Resolves once no submission is waiting on its settle delay.
    pub async fn settled(&self) -> Result<()> {
        let mut receiver = self.state.subscribe();
        let idle = receiver
            .wait_for(|state| !state.has_submission_in_flight())
            .await
            .is_ok();
        if idle {
            Ok(())
        } else {
            Err(WizardError::StateClosed)
        }
    }

    fn transition<O>(&self, event: impl FnOnce(&WizardState) -> (WizardState, O)) -> O {
        let mut outcome = None;
        self.state.send_modify(|state| {
            let (next, result) = event(&*state);
            *state = next;
            outcome = Some(result);
        });
        outcome.expect("send_modify runs its closure exactly once")
    }

    fn deliver(&self, payload: Payload) {
        let sink = Arc::clone(&self.sink);
        let step = payload.step;
        let delivery = tokio::spawn(async move { sink.submit(payload).await });
        tokio::spawn(async move {
            match delivery.await {
                Ok(Ok(())) => debug!(%step, "Payload delivered"),
                Ok(Err(e)) => warn!(%step, error = %e, "Payload delivery failed"),
                Err(e) => warn!(%step, error = %e, "Payload delivery aborted"),
            }
        });
    }

    fn schedule_settle(&self, step: Step) {
        let state = Arc::clone(&self.state);
        let delay = self.settle_delays.for_step(step);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_modify(|current| *current = current.settle(step));
            info!(from = %step, to = %state.borrow().step(), "Step settled");
        });
    }
}
