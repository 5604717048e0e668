//! Anomaly flagging: the black-box outlier verdict and its degenerate
//! single-sample fit.

use amlservice_core::anomaly::{AnomalyFlagger, OutlierScorer};
use amlservice_core::snapshot::TransactionSnapshot;
use amlservice_core::types::{ScreeningStatus, TransactionType};
use chrono::{DateTime, Utc};

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn txn(amount: f64) -> TransactionSnapshot {
    TransactionSnapshot {
        transaction_id: "txn-a".into(),
        customer_id: "cust-0001".into(),
        amount,
        timestamp: at("2026-03-01T12:00:00Z"),
        transaction_type: TransactionType::Deposit,
        source_country: "GB".into(),
        destination_country: "GB".into(),
        reference: None,
        risk_score: 0.0,
        is_suspicious: false,
        screening_status: ScreeningStatus::Pending,
    }
}

/// The feature vector is (amount, customer risk score, history length).
#[test]
fn feature_vector_shape() {
    let features = AnomalyFlagger::extract_features(&txn(1_234.5), 0.42, 17);
    assert_eq!(features, [1_234.5, 0.42, 17.0]);
}

/// A scorer fit on the single vector under evaluation has no spread, so
/// the verdict is always inlier — the documented degenerate behavior.
#[test]
fn single_sample_fit_reports_inlier() {
    let flagger = AnomalyFlagger::new();

    assert!(!flagger.is_suspicious(&txn(25.0), 0.1, 0));
    assert!(!flagger.is_suspicious(&txn(999_999.0), 0.99, 5_000));
}

/// The verdict is deterministic for identical inputs.
#[test]
fn verdict_is_idempotent() {
    let flagger = AnomalyFlagger::new();
    let first = flagger.is_suspicious(&txn(500.0), 0.3, 12);
    let second = flagger.is_suspicious(&txn(500.0), 0.3, 12);
    assert_eq!(first, second);
}

/// Fit on a real population, the scorer separates gross outliers from
/// typical samples.
#[test]
fn population_fit_flags_gross_outliers() {
    let samples: Vec<[f64; 3]> = (0..40)
        .map(|i| {
            let wiggle = (i % 7) as f64;
            [100.0 + wiggle * 10.0, 0.2 + wiggle * 0.01, 10.0 + wiggle]
        })
        .collect();
    let scorer = OutlierScorer::fit(&samples);

    assert!(scorer.is_outlier(&[50_000.0, 0.95, 400.0]));
    assert!(!scorer.is_outlier(&[120.0, 0.22, 12.0]));
}

/// A dimension with no spread standardizes to zero instead of dividing by
/// zero.
#[test]
fn constant_dimension_does_not_explode() {
    let samples: Vec<[f64; 3]> = (0..10).map(|i| [100.0, 0.5, i as f64]).collect();
    let scorer = OutlierScorer::fit(&samples);

    let score = scorer.score(&[100.0, 0.5, 4.0]);
    assert!(score.is_finite());
}
