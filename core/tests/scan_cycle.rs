//! End-to-end scan cycles through the public API.

use std::time::Duration;

use portpeek_core::scanner::records_from_output;
use portpeek_core::{
    CapturedOutput, DegradedReason, EnumerationInvoker, Error, PermissionClassifier, PortPeekEngine,
    PortRecord, PortStatus, ScanConfig, ScanController, ScanFailure, ScanOutcome,
};

/// Invoker returning canned lsof results.
struct CannedInvoker {
    result: fn() -> portpeek_core::Result<CapturedOutput>,
}

impl EnumerationInvoker for CannedInvoker {
    fn program(&self) -> &str {
        "lsof"
    }

    async fn invoke(&self) -> portpeek_core::Result<CapturedOutput> {
        (self.result)()
    }
}

fn controller(result: fn() -> portpeek_core::Result<CapturedOutput>) -> ScanController<CannedInvoker> {
    let classifier = PermissionClassifier::from_config(&ScanConfig::default()).unwrap();
    ScanController::with_invoker(CannedInvoker { result }, classifier)
}

const BUSY_HOST: &str = "\
COMMAND     PID   USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
launchd       1   root   11u  IPv6 0x5a1b2c3d4e5f6071      0t0  TCP *:22 (LISTEN)
postgres    812   dev    7u   IPv6 0x5a1b2c3d4e5f6072      0t0  TCP [::1]:5432 (LISTEN)
postgres    812   dev    8u   IPv4 0x5a1b2c3d4e5f6073      0t0  TCP 127.0.0.1:5432 (LISTEN)
mDNSRespo   301   _mdns  9u   IPv4 0x5a1b2c3d4e5f6074      0t0  UDP *:5353
node       4410   dev   23u   IPv4 0x5a1b2c3d4e5f6075      0t0  TCP 127.0.0.1:3000 (LISTEN)
Google     5120   dev   41u   IPv4 0x5a1b2c3d4e5f6076      0t0  TCP 192.168.1.20:50412->142.250.74.14:443 (ESTABLISHED)
Google     5120   dev   42u   IPv4 0x5a1b2c3d4e5f6077      0t0  TCP 192.168.1.20:50413->142.250.74.14:443 (CLOSE_WAIT)
rapportd    402   dev    4u   IPv4 0x5a1b2c3d4e5f6078      0t0  TCP *:* (LISTEN)
broken line
";

#[tokio::test]
async fn busy_host_produces_sorted_unique_records() {
    let outcome = controller(|| Ok(CapturedOutput::success(BUSY_HOST)))
        .scan()
        .await;

    assert_eq!(
        outcome,
        ScanOutcome::Success(vec![
            PortRecord::new(22, "launchd", Some(1), PortStatus::Listening),
            PortRecord::new(3000, "node", Some(4410), PortStatus::Listening),
            PortRecord::new(5432, "postgres", Some(812), PortStatus::Listening),
            PortRecord::new(50412, "Google", Some(5120), PortStatus::Established),
        ])
    );
}

#[tokio::test]
async fn timeout_reports_no_records() {
    let outcome = controller(|| {
        Err(Error::Timeout {
            program: "lsof".to_string(),
            after: Duration::from_secs(10),
        })
    })
    .scan()
    .await;

    assert!(matches!(
        outcome,
        ScanOutcome::Failed(ScanFailure::Timeout { .. })
    ));
    assert!(outcome.records().is_empty());
    assert_eq!(outcome.guidance().unwrap().headline, "Network scan timed out");
}

#[tokio::test]
async fn permission_denial_is_degraded_with_guidance() {
    let outcome = controller(|| {
        Ok(CapturedOutput::failure(
            Some(1),
            "",
            "lsof: can't open /dev/kmem: Operation not permitted\n",
        ))
    })
    .scan()
    .await;

    assert!(matches!(
        outcome,
        ScanOutcome::Degraded(DegradedReason::PermissionDenied { .. })
    ));
    let guidance = outcome.guidance().unwrap();
    assert_eq!(guidance.hint, Some("Try running with admin privileges"));
}

#[tokio::test]
async fn permission_denial_hides_partial_listing() {
    let outcome = controller(|| {
        Ok(CapturedOutput::failure(
            Some(1),
            BUSY_HOST,
            "lsof: WARNING: can't stat() fuse file system: Permission denied\n",
        ))
    })
    .scan()
    .await;

    assert!(outcome.is_degraded());
    assert!(outcome.records().is_empty());
}

#[test]
fn blocking_engine_runs_a_cycle() {
    let engine = PortPeekEngine::with_controller(controller(|| {
        Ok(CapturedOutput::success(BUSY_HOST))
    }))
    .unwrap();

    let first = engine.scan();
    let second = engine.scan();
    assert_eq!(first, second);
    assert_eq!(first.records().len(), 4);
}

#[test]
fn pipeline_is_deterministic_and_ordered() {
    let first = records_from_output(BUSY_HOST);
    let second = records_from_output(BUSY_HOST);

    assert_eq!(first, second);
    assert!(first.windows(2).all(|pair| pair[0].port < pair[1].port));
}
