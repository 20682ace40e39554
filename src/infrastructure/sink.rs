use crate::domain::ports::SubmissionSink;
use crate::domain::state::Payload;
use crate::error::SinkError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Keeps every payload in memory, in delivery order.
#[derive(Default, Clone)]
pub struct RecordingSink {
    payloads: Arc<RwLock<Vec<Payload>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn payloads(&self) -> Vec<Payload> {
        self.payloads.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.payloads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payloads.read().await.is_empty()
    }
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    async fn submit(&self, payload: Payload) -> Result<(), SinkError> {
        self.payloads.write().await.push(payload);
        Ok(())
    }
}

/// Reports accepted steps through `tracing`.
///
/// Only the step and the field keys are emitted, never the values.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl SubmissionSink for TracingSink {
    async fn submit(&self, payload: Payload) -> Result<(), SinkError> {
        let fields: Vec<&str> = payload.fields.keys().copied().collect();
        info!(step = %payload.step, ?fields, "Step payload received");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::Step;
    use std::collections::BTreeMap;

    fn payload(step: Step) -> Payload {
        Payload {
            step,
            fields: BTreeMap::from([("email", "a@b.com".to_string())]),
        }
    }

    #[tokio::test]
    async fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty().await);

        sink.submit(payload(Step::Credentials)).await.unwrap();
        sink.submit(payload(Step::Payment)).await.unwrap();

        let steps: Vec<Step> = sink.payloads().await.iter().map(|p| p.step).collect();
        assert_eq!(steps, vec![Step::Credentials, Step::Payment]);
        assert_eq!(sink.len().await, 2);
    }

    #[tokio::test]
    async fn test_recording_sink_clones_share_storage() {
        let sink = RecordingSink::new();
        let handle = sink.clone();
        handle.submit(payload(Step::Credentials)).await.unwrap();
        assert_eq!(sink.len().await, 1);
    }

    #[tokio::test]
    async fn test_tracing_sink_accepts_payload() {
        assert_eq!(TracingSink.submit(payload(Step::Payment)).await, Ok(()));
    }
}
