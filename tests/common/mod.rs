#![allow(dead_code)]

use async_trait::async_trait;
use checkout_wizard::application::wizard::WizardController;
use checkout_wizard::config::WizardConfig;
use checkout_wizard::domain::ports::{SubmissionSink, SubmissionSinkRef};
use checkout_wizard::domain::state::Payload;
use checkout_wizard::error::SinkError;
use checkout_wizard::infrastructure::clock::FixedClock;
use chrono::NaiveDate;
use rand::Rng;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn jan_2024() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn controller_with(sink: SubmissionSinkRef) -> WizardController {
    WizardController::new(
        &WizardConfig::default(),
        sink,
        Arc::new(FixedClock(jan_2024())),
    )
}

/// Counts calls, then fails every delivery.
#[derive(Default)]
pub struct FailingSink {
    pub calls: AtomicUsize,
}

#[async_trait]
impl SubmissionSink for FailingSink {
    async fn submit(&self, _payload: Payload) -> Result<(), SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SinkError("endpoint unreachable".to_string()))
    }
}

pub struct PanickingSink;

#[async_trait]
impl SubmissionSink for PanickingSink {
    async fn submit(&self, _payload: Payload) -> Result<(), SinkError> {
        panic!("sink blew up");
    }
}

/// Random digit string of `len` digits whose Luhn checksum holds.
pub fn luhn_valid_number(rng: &mut impl Rng, len: usize) -> String {
    let mut digits: Vec<u32> = (0..len - 1).map(|_| rng.gen_range(0..10)).collect();
    // The check digit sits at index 0 from the right, so the body starts doubling
    // at its own rightmost digit.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    digits.push((10 - sum % 10) % 10);
    digits.iter().map(|d| char::from_digit(*d, 10).unwrap()).collect()
}

pub fn write_file(path: &Path, contents: &str) {
    let mut file = std::fs::File::create(path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
}
