//! Example: Run one blocking scan and print the result.

use portpeek_core::{PortPeekEngine, PortStatus, ScanConfig};

fn main() {
    println!("Scanning ports...\n");

    let engine = match PortPeekEngine::new(&ScanConfig::default()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error creating scanner: {}", e);
            return;
        }
    };

    let outcome = engine.scan();

    if let Some(guidance) = outcome.guidance() {
        println!("{}", guidance.headline);
        if let Some(hint) = guidance.hint {
            println!("{}", hint);
        }
        return;
    }

    println!("{:<6} {:<8} {:<12} COMMAND", "PORT", "PID", "STATUS");
    println!("{}", "-".repeat(50));

    for record in outcome.records() {
        let pid = record
            .pid
            .map(|pid| pid.to_string())
            .unwrap_or_else(|| "-".to_string());
        let status = match record.status {
            PortStatus::Listening => "LISTEN",
            PortStatus::Established => "ESTABLISHED",
        };

        println!("{:<6} {:<8} {:<12} {}", record.port, pid, status, record.command);
    }

    println!("\nTotal: {} ports", outcome.records().len());
}
