use crate::domain::schema::Step;
use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CREDENTIALS_SETTLE_MS: u64 = 2_000;
pub const DEFAULT_PAYMENT_SETTLE_MS: u64 = 3_000;

/// Pause between an accepted submission and the step advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SettleDelays {
    pub credentials_ms: u64,
    pub payment_ms: u64,
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            credentials_ms: DEFAULT_CREDENTIALS_SETTLE_MS,
            payment_ms: DEFAULT_PAYMENT_SETTLE_MS,
        }
    }
}

impl SettleDelays {
    pub fn for_step(&self, step: Step) -> Duration {
        match step {
            Step::Credentials => Duration::from_millis(self.credentials_ms),
            Step::Payment => Duration::from_millis(self.payment_ms),
            Step::Complete => Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub settle_delays: SettleDelays,
}

impl WizardConfig {
    /// Loads a JSON config file. Missing keys fall back to the defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
