use chrono::NaiveDate;
use checkout_wizard::application::wizard::WizardController;
use checkout_wizard::config::WizardConfig;
use checkout_wizard::domain::ports::{ClockRef, SubmissionSinkRef};
use checkout_wizard::domain::schema::Step;
use checkout_wizard::infrastructure::clock::{FixedClock, SystemClock};
use checkout_wizard::infrastructure::sink::TracingSink;
use checkout_wizard::interfaces::csv::event_reader::{EventAction, EventReader, WizardEvent};
use checkout_wizard::logging::init_tracing;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV script of wizard events (`action, field, value`)
    input: PathBuf,

    /// JSON config file with settle delays
    #[arg(long)]
    config: Option<PathBuf>,

    /// Date used for expiry checks instead of today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Log debug events
    #[arg(short, long)]
    verbose: bool,
}

/// Final session report. Field values are never printed.
#[derive(Serialize)]
struct Summary {
    step: Step,
    errors: BTreeMap<&'static str, String>,
}

async fn apply(
    controller: &WizardController,
    event: &WizardEvent,
) -> checkout_wizard::error::Result<()> {
    match event.action {
        EventAction::Input => {
            controller.input(event.target()?, event.value());
        }
        EventAction::Submit => {
            controller.submit();
        }
        EventAction::Wait => controller.settled().await?,
        EventAction::Exit => controller.exit()?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "info" });

    let config = match cli.config {
        Some(path) => WizardConfig::from_path(path).into_diagnostic()?,
        None => WizardConfig::default(),
    };
    let clock: ClockRef = match cli.today {
        Some(date) => Arc::new(FixedClock(date)),
        None => Arc::new(SystemClock),
    };
    let sink: SubmissionSinkRef = Arc::new(TracingSink);
    let controller = WizardController::new(&config, sink, clock);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);
    for event_result in reader.events() {
        match event_result {
            Ok(event) => {
                if let Err(e) = apply(&controller, &event).await {
                    warn!(error = %e, "Error applying event");
                }
            }
            Err(e) => {
                warn!(error = %e, "Error reading event");
            }
        }
    }

    controller.settled().await.into_diagnostic()?;
    let state = controller.snapshot();
    let summary = Summary {
        step: state.step(),
        errors: state.errors(),
    };
    println!("{}", serde_json::to_string(&summary).into_diagnostic()?);

    Ok(())
}
