//! Integration tests for the scan cycle against a mock pad.
//!
//! Covers the four figurine scenarios (vehicle, character, unknown id,
//! rejected password), debouncing, recovery from reader faults and the
//! timed scan loop.

mod common;

use std::time::Duration;

use common::{Harness, test_data::*, uid};
use tokio_util::sync::CancellationToken;
use toypad_core::constants::PAYLOAD_PAGE;
use toypad_core::{AuthKey, CatalogId, TagKind};
use toypad_hardware::HardwareError;
use toypad_hardware::mock::{MockOperation, MockTag};
use toypad_scanner::{CycleOutcome, ErrorKind, Figurines, ScanEvent, ScanState, ScannerConfig};

fn expect_report(outcome: CycleOutcome) -> toypad_scanner::TagReport {
    match outcome {
        CycleOutcome::Reported(report) => report,
        other => panic!("expected a report, got {other:?}"),
    }
}

fn expect_failure(outcome: CycleOutcome) -> toypad_scanner::ScanFailure {
    match outcome {
        CycleOutcome::Failed(failure) => failure,
        other => panic!("expected a failure, got {other:?}"),
    }
}

// ============================================================================
// Figurine Scenarios
// ============================================================================

#[tokio::test]
async fn test_vehicle_is_reported() {
    let mut h = Harness::new();
    h.pad
        .place_tag(Figurines::default().vehicle(uid(UID_A), VEHICLE_ID))
        .await;

    let report = expect_report(h.scanner.run_cycle().await.unwrap());
    assert_eq!(report.uid, uid(UID_A));
    assert_eq!(report.kind, TagKind::Vehicle);
    assert_eq!(report.id, CatalogId::new(300));
    let entry = report.entry.unwrap();
    assert_eq!(entry.name, "Fixture Buggy");
    assert_eq!(entry.world, "Test World");

    let events = h.drain_events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], ScanEvent::Detected { uid: uid(UID_A) });
    assert_eq!(
        events[1],
        ScanEvent::Classified {
            uid: uid(UID_A),
            kind: TagKind::Vehicle,
            id: CatalogId::new(300),
        }
    );
    assert!(matches!(events[2], ScanEvent::Resolved { .. }));
}

#[tokio::test]
async fn test_character_from_genuine_block() {
    // Block and password as written by the vendor, not by our encoder.
    let tag = MockTag::new(uid(UID_B))
        .with_password(AuthKey::new(UID_B_PASSWORD))
        .with_pages(PAYLOAD_PAGE, &UID_B_CHARACTER_42);

    let mut h = Harness::new();
    h.pad.place_tag(tag).await;

    let report = expect_report(h.scanner.run_cycle().await.unwrap());
    assert_eq!(report.kind, TagKind::Character);
    assert_eq!(report.id, CatalogId::new(CHARACTER_ID));
    assert_eq!(report.entry.unwrap().name, "Fixture Hero");
}

#[tokio::test]
async fn test_character_with_known_password() {
    let tag = MockTag::new(uid(UID_A))
        .with_password(AuthKey::new(UID_A_PASSWORD))
        .with_pages(PAYLOAD_PAGE, &UID_A_CHARACTER_1);

    let mut h = Harness::new();
    h.pad.place_tag(tag).await;

    let report = expect_report(h.scanner.run_cycle().await.unwrap());
    assert_eq!(report.id, CatalogId::new(1));
    assert_eq!(report.entry.unwrap().name, "Batman");
}

#[tokio::test]
async fn test_unknown_id_is_unresolved() {
    let mut h = Harness::new();
    h.pad
        .place_tag(Figurines::default().vehicle(uid(UID_A), UNKNOWN_VEHICLE_ID))
        .await;

    let report = expect_report(h.scanner.run_cycle().await.unwrap());
    assert_eq!(report.id, CatalogId::new(9_999));
    assert!(report.entry.is_none());
    assert!(!report.is_resolved());

    let events = h.drain_events();
    assert_eq!(
        events.last(),
        Some(&ScanEvent::Unresolved {
            uid: uid(UID_A),
            kind: TagKind::Vehicle,
            id: CatalogId::new(9_999),
        })
    );
    assert_eq!(h.scanner.state(), ScanState::CoolDown);
}

#[tokio::test]
async fn test_wrong_password_fails_then_recovers() {
    let mut h = Harness::new();
    let wrong = Figurines::default()
        .vehicle(uid(UID_A), VEHICLE_ID)
        .with_password(AuthKey::new([0, 0, 0, 0]));
    h.pad.place_tag(wrong).await;

    let failure = expect_failure(h.scanner.run_cycle().await.unwrap());
    assert_eq!(failure.kind, ErrorKind::Authentication);
    assert_eq!(failure.uid, Some(uid(UID_A)));
    assert_eq!(h.scanner.state(), ScanState::Idle);
    assert_eq!(h.scanner.last_uid(), None);
    assert_eq!(h.pad.stats().await.reads, 0);

    // Same UID, now a genuine tag: processed again, not debounced.
    h.pad
        .place_tag(Figurines::default().vehicle(uid(UID_A), VEHICLE_ID))
        .await;
    let report = expect_report(h.scanner.run_cycle().await.unwrap());
    assert_eq!(report.id, CatalogId::new(300));
}

// ============================================================================
// Debouncing
// ============================================================================

#[tokio::test]
async fn test_tag_left_on_pad_is_reported_once() {
    let mut h = Harness::new();
    h.pad
        .place_tag(Figurines::default().vehicle(uid(UID_A), VEHICLE_ID))
        .await;

    expect_report(h.scanner.run_cycle().await.unwrap());
    for _ in 0..3 {
        assert_eq!(
            h.scanner.run_cycle().await.unwrap(),
            CycleOutcome::Debounced(uid(UID_A))
        );
        assert_eq!(h.scanner.state(), ScanState::CoolDown);
    }

    let stats = h.pad.stats().await;
    assert_eq!(stats.polls, 4);
    assert_eq!(stats.auth_attempts, 1);
    assert_eq!(stats.reads, 1);
    assert_eq!(h.drain_events().len(), 3);
}

#[tokio::test]
async fn test_removed_tag_is_reported_again() {
    let mut h = Harness::new();
    let tag = Figurines::default().character(uid(UID_A), 1u32);
    h.pad.place_tag(tag.clone()).await;

    expect_report(h.scanner.run_cycle().await.unwrap());
    assert_eq!(h.scanner.last_uid(), Some(uid(UID_A)));

    h.pad.remove_tag().await;
    assert_eq!(h.scanner.run_cycle().await.unwrap(), CycleOutcome::NoTarget);
    assert_eq!(h.scanner.last_uid(), None);
    assert_eq!(h.scanner.state(), ScanState::Detecting);

    h.pad.place_tag(tag).await;
    expect_report(h.scanner.run_cycle().await.unwrap());
    assert_eq!(h.pad.stats().await.reads, 2);
}

#[tokio::test]
async fn test_swapped_tag_is_reported() {
    let mut h = Harness::new();
    h.pad
        .place_tag(Figurines::default().vehicle(uid(UID_A), VEHICLE_ID))
        .await;
    expect_report(h.scanner.run_cycle().await.unwrap());

    h.pad
        .place_tag(Figurines::default().character(uid(UID_B), CHARACTER_ID))
        .await;
    let report = expect_report(h.scanner.run_cycle().await.unwrap());
    assert_eq!(report.uid, uid(UID_B));
    assert_eq!(report.kind, TagKind::Character);
}

// ============================================================================
// Reader Faults
// ============================================================================

#[tokio::test]
async fn test_detect_fault_is_reader_communication() {
    let mut h = Harness::new();
    h.pad
        .inject_fault(MockOperation::Detect, HardwareError::disconnected("Test Pad"))
        .await;

    let failure = expect_failure(h.scanner.run_cycle().await.unwrap());
    assert_eq!(failure.kind, ErrorKind::ReaderCommunication);
    assert_eq!(failure.uid, None);
    assert_eq!(h.scanner.state(), ScanState::Idle);

    assert_eq!(h.scanner.run_cycle().await.unwrap(), CycleOutcome::NoTarget);
}

#[tokio::test]
async fn test_read_fault_then_same_tag_is_processed() {
    let mut h = Harness::new();
    h.pad
        .place_tag(Figurines::default().vehicle(uid(UID_A), VEHICLE_ID))
        .await;
    h.pad
        .inject_fault(MockOperation::Read, HardwareError::card_read("NAK"))
        .await;

    let failure = expect_failure(h.scanner.run_cycle().await.unwrap());
    assert_eq!(failure.kind, ErrorKind::PayloadRead);
    assert_eq!(h.scanner.last_uid(), None);

    let events = h.drain_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], ScanEvent::Failed(_)));

    let report = expect_report(h.scanner.run_cycle().await.unwrap());
    assert_eq!(report.id, CatalogId::new(300));
}

#[tokio::test]
async fn test_read_communication_error_clears_last_uid() {
    let mut h = Harness::new();
    h.pad
        .place_tag(Figurines::default().vehicle(uid(UID_A), VEHICLE_ID))
        .await;
    h.pad
        .inject_fault(MockOperation::Read, HardwareError::communication("crc"))
        .await;

    let failure = expect_failure(h.scanner.run_cycle().await.unwrap());
    assert_eq!(failure.kind, ErrorKind::ReaderCommunication);
    assert_eq!(failure.uid, Some(uid(UID_A)));
    assert_eq!(h.scanner.last_uid(), None);
    assert_eq!(h.scanner.state(), ScanState::Idle);

    let report = expect_report(h.scanner.run_cycle().await.unwrap());
    assert_eq!(report.uid, uid(UID_A));
    assert_eq!(report.id, CatalogId::new(300));
    assert_eq!(h.scanner.last_uid(), Some(uid(UID_A)));

    let stats = h.pad.stats().await;
    assert_eq!(stats.auth_attempts, 2);
    assert_eq!(stats.reads, 2);
}

#[tokio::test]
async fn test_short_read_is_payload_failure() {
    let mut h = Harness::new();
    h.pad
        .place_tag(
            Figurines::default()
                .vehicle(uid(UID_A), VEHICLE_ID)
                .with_read_len(8),
        )
        .await;

    let failure = expect_failure(h.scanner.run_cycle().await.unwrap());
    assert_eq!(failure.kind, ErrorKind::PayloadRead);
}

#[tokio::test]
async fn test_corrupt_character_block_is_payload_failure() {
    let mut h = Harness::new();
    // UID_A's genuine block on UID_B's tag decrypts to mismatched words.
    let tag = Figurines::default()
        .blank(uid(UID_B))
        .with_pages(PAYLOAD_PAGE, &UID_A_CHARACTER_1);
    h.pad.place_tag(tag).await;

    let failure = expect_failure(h.scanner.run_cycle().await.unwrap());
    assert_eq!(failure.kind, ErrorKind::PayloadRead);
    assert_eq!(failure.uid, Some(uid(UID_B)));
    assert_eq!(h.scanner.state(), ScanState::Idle);
}

// ============================================================================
// Scan Loop
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_run_reports_once_and_settles() {
    let mut h = Harness::with_config(
        ScannerConfig::default()
            .with_poll_interval(Duration::from_millis(100))
            .with_settle_interval(Duration::from_millis(1000)),
    );
    h.pad
        .place_tag(Figurines::default().vehicle(uid(UID_A), VEHICLE_ID))
        .await;

    let cancel = CancellationToken::new();
    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        stopper.cancel();
    });

    // Cycles at 0 (reported), 1000 and 2000 ms (debounced).
    let stats = h.scanner.run(cancel).await.unwrap();
    assert_eq!(stats.cycles, 3);
    assert_eq!(stats.reported, 1);
    assert_eq!(stats.debounced, 2);
    assert_eq!(h.pad.stats().await.reads, 1);
}

#[tokio::test(start_paused = true)]
async fn test_run_backs_off_after_failure() {
    let mut h = Harness::with_config(
        ScannerConfig::default()
            .with_poll_interval(Duration::from_millis(100))
            .with_failure_backoff(Duration::from_millis(500)),
    );
    h.pad
        .inject_fault(MockOperation::Detect, HardwareError::timeout(50))
        .await;

    let cancel = CancellationToken::new();
    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(650)).await;
        stopper.cancel();
    });

    // Failure at 0, then empty polls at 500 and 600 ms.
    let stats = h.scanner.run(cancel).await.unwrap();
    assert_eq!(stats.failures, 1);
    assert_eq!(stats.cycles, 3);
}
