use super::state::Payload;
use crate::error::SinkError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// Receives the payload of every accepted step.
///
/// Delivery is fire-and-forget from the wizard's point of view: an `Err` is logged
/// and otherwise ignored, and the step settles on its own schedule either way.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, payload: Payload) -> Result<(), SinkError>;
}

/// Source of "today" for expiry checks.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub type SubmissionSinkRef = Arc<dyn SubmissionSink>;
pub type ClockRef = Arc<dyn Clock>;
