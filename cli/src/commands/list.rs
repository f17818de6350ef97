//! List command - run one scan and print the result.

use std::process::ExitCode;

use anyhow::Result;
use portpeek_core::{RecordFilter, ScanConfig, ScanController, ScanOutcome};

use crate::view::MenuView;

pub async fn run(config: ScanConfig, filter: RecordFilter, json: bool) -> Result<ExitCode> {
    let controller = ScanController::new(&config)?;
    let outcome = controller.scan().await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&filtered_outcome(&outcome, &filter))?
        );
        return Ok(exit_code(&outcome));
    }

    let view = MenuView::from_outcome(&outcome, &filter);
    print!("{}", view.render());
    if view.total > 0 {
        println!("\n{}", view.summary());
    }

    Ok(exit_code(&outcome))
}

/// Apply the filter to the records of a successful outcome.
pub fn filtered_outcome(outcome: &ScanOutcome, filter: &RecordFilter) -> ScanOutcome {
    match outcome {
        ScanOutcome::Success(records) if filter.is_active() => {
            ScanOutcome::Success(filter.apply(records))
        }
        other => other.clone(),
    }
}

pub fn exit_code(outcome: &ScanOutcome) -> ExitCode {
    ExitCode::from(exit_status(outcome))
}

/// Process exit status for an outcome: 0 success, 2 degraded, 1 failed.
fn exit_status(outcome: &ScanOutcome) -> u8 {
    match outcome {
        ScanOutcome::Success(_) => 0,
        ScanOutcome::Degraded(_) => 2,
        ScanOutcome::Failed(_) => 1,
    }
}
