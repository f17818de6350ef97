//! Watch command - rescan on a timer and redraw the list.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use portpeek_core::{EnumerationInvoker, RecordFilter, ScanConfig, ScanController, ScanOutcome};
use tokio::time::MissedTickBehavior;
use tracing::info;

use super::list::filtered_outcome;
use crate::view::MenuView;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

pub async fn run(config: ScanConfig, filter: RecordFilter, interval_secs: u64, json: bool) -> Result<()> {
    let controller = ScanController::new(&config)?;
    let interval = Duration::from_secs(interval_secs.max(1));

    info!(interval_secs = interval.as_secs(), "Watching ports");

    let cycles = watch(&controller, tokio::signal::ctrl_c(), interval, |outcome| {
        if json {
            print_json(outcome, &filter)
        } else {
            print_view(outcome, &filter, interval);
            Ok(())
        }
    })
    .await?;

    info!(cycles, "Stopped watching");
    Ok(())
}

/// Scan every `interval` and hand each outcome to `render` until `shutdown`
/// resolves. An in-flight scan is abandoned on shutdown.
///
/// Returns the number of rendered cycles.
async fn watch<I, S>(
    controller: &ScanController<I>,
    shutdown: S,
    interval: Duration,
    mut render: impl FnMut(&ScanOutcome) -> Result<()>,
) -> Result<usize>
where
    I: EnumerationInvoker,
    S: Future<Output = std::io::Result<()>>,
{
    let mut ticker = tokio::time::interval(interval);
    // A slow scan pushes the next one back instead of firing a burst
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(shutdown);
    let mut cycles = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tokio::select! {
                    outcome = controller.scan() => {
                        render(&outcome)?;
                        cycles += 1;
                    }
                    result = &mut shutdown => {
                        result.context("Failed to listen for Ctrl-C")?;
                        break;
                    }
                }
            }
            result = &mut shutdown => {
                result.context("Failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    Ok(cycles)
}

/// One JSON object per cycle, one per line.
fn print_json(outcome: &ScanOutcome, filter: &RecordFilter) -> Result<()> {
    let line = serde_json::json!({
        "scannedAt": Local::now().to_rfc3339(),
        "result": filtered_outcome(outcome, filter),
    });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}

fn print_view(outcome: &ScanOutcome, filter: &RecordFilter, interval: Duration) {
    let view = MenuView::from_outcome(outcome, filter);

    print!("{}", CLEAR_SCREEN);
    println!(
        "PortPeek | {} | every {}s (Ctrl-C to stop)\n",
        Local::now().format("%H:%M:%S"),
        interval.as_secs()
    );
    print!("{}", view.render());
    if view.total > 0 {
        println!("\n{}", view.summary());
    }
}
