//! Regulatory alerting: CTR and structuring SAR triggers.

use amlservice_core::regulatory_alerts::{RegulatoryAlertEngine, ReportType, Severity};
use amlservice_core::snapshot::TransactionSnapshot;
use amlservice_core::types::{ScreeningStatus, TransactionType};
use chrono::{DateTime, Duration, Utc};

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn txn(id: &str, amount: f64, timestamp: DateTime<Utc>) -> TransactionSnapshot {
    TransactionSnapshot {
        transaction_id: id.into(),
        customer_id: "cust-0042".into(),
        amount,
        timestamp,
        transaction_type: TransactionType::Deposit,
        source_country: "GB".into(),
        destination_country: "GB".into(),
        reference: None,
        risk_score: 0.0,
        is_suspicious: false,
        screening_status: ScreeningStatus::Pending,
    }
}

/// Amount 10001 with no other recent activity: exactly one CTR alert,
/// severity HIGH, action required.
#[test]
fn ctr_fires_strictly_above_threshold() {
    let now = at("2026-03-01T12:00:00Z");
    let t = txn("t-1", 10_001.0, now);

    let alerts = RegulatoryAlertEngine::new().evaluate_transaction(&t, &[], now);

    assert_eq!(alerts.len(), 1, "expected exactly one alert: {alerts:?}");
    assert_eq!(alerts[0].report_type, ReportType::Ctr);
    assert_eq!(alerts[0].severity, Severity::High);
    assert!(alerts[0].action_required);
    assert_eq!(alerts[0].related_entities, vec!["cust-0042".to_string()]);
    assert_eq!(alerts[0].generated_at, now);
}

/// Exactly 10000 does not trigger a CTR (strict greater-than).
#[test]
fn ctr_does_not_fire_at_threshold() {
    let now = at("2026-03-01T12:00:00Z");
    let t = txn("t-1", 10_000.0, now);

    let alerts = RegulatoryAlertEngine::new().evaluate_transaction(&t, &[], now);
    assert!(alerts.is_empty(), "no alert expected: {alerts:?}");
}

/// Five transactions in the trailing week summing to 5001 raise a MEDIUM
/// structuring SAR.
#[test]
fn sar_fires_when_weekly_total_exceeds_threshold() {
    let now = at("2026-03-01T12:00:00Z");
    let current = txn("t-5", 1_001.0, now);
    let window = vec![
        txn("t-1", 1_000.0, now - Duration::days(6)),
        txn("t-2", 1_000.0, now - Duration::days(4)),
        txn("t-3", 1_000.0, now - Duration::days(2)),
        txn("t-4", 1_000.0, now - Duration::days(1)),
        current.clone(),
    ];

    let alerts = RegulatoryAlertEngine::new().evaluate_transaction(&current, &window, now);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].report_type, ReportType::Sar);
    assert_eq!(alerts[0].severity, Severity::Medium);
    assert!(alerts[0].action_required);
    assert!(
        alerts[0].description.contains("structuring"),
        "description should name structuring: {}",
        alerts[0].description
    );
}

/// A weekly total of exactly 5000 stays quiet.
#[test]
fn sar_does_not_fire_at_threshold() {
    let now = at("2026-03-01T12:00:00Z");
    let current = txn("t-5", 1_000.0, now);
    let window = vec![
        txn("t-1", 1_000.0, now - Duration::days(6)),
        txn("t-2", 1_000.0, now - Duration::days(4)),
        txn("t-3", 1_000.0, now - Duration::days(2)),
        txn("t-4", 1_000.0, now - Duration::days(1)),
        current.clone(),
    ];

    let alerts = RegulatoryAlertEngine::new().evaluate_transaction(&current, &window, now);
    assert!(alerts.is_empty(), "no alert expected: {alerts:?}");
}

/// The two rules are independent: a large transaction inside a heavy week
/// raises both alerts, CTR first.
#[test]
fn ctr_and_sar_can_both_fire() {
    let now = at("2026-03-01T12:00:00Z");
    let current = txn("t-2", 12_000.0, now);
    let window = vec![txn("t-1", 500.0, now - Duration::days(3)), current.clone()];

    let alerts = RegulatoryAlertEngine::new().evaluate_transaction(&current, &window, now);

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].report_type, ReportType::Ctr);
    assert_eq!(alerts[1].report_type, ReportType::Sar);
}

/// Report types expose their long-form filing labels.
#[test]
fn report_type_labels() {
    assert_eq!(ReportType::Ctr.label(), "Currency Transaction Report");
    assert_eq!(ReportType::Sar.label(), "Suspicious Activity Report");
    assert_eq!(ReportType::Str.label(), "Suspicious Transaction Report");
}
