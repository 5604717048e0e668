//! Transaction-pattern risk: velocity, amount variance, frequency, and the
//! weighted overall score.

use amlservice_core::factors;
use amlservice_core::transaction_pattern::{TransactionPatternEvaluator, TxnObservation};
use chrono::{DateTime, Duration, Utc};

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn obs(amount: f64, timestamp: DateTime<Utc>) -> TxnObservation {
    TxnObservation { amount, timestamp }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// An empty history yields exactly `{overall_risk: 0.5}` and nothing else.
#[test]
fn empty_history_defaults_to_medium_risk() {
    let evaluator = TransactionPatternEvaluator::new();
    let set = evaluator.evaluate(&[], at("2026-03-01T12:00:00Z"));

    assert_eq!(set.len(), 1, "no per-factor keys expected for empty history");
    assert_eq!(set.get(factors::OVERALL_RISK), Some(0.5));
}

/// Identical amounts have zero variance risk.
#[test]
fn identical_amounts_have_zero_variance() {
    let now = at("2026-03-01T12:00:00Z");
    let history: Vec<TxnObservation> = (0..5)
        .map(|i| obs(250.0, now - Duration::days(i + 1)))
        .collect();

    let set = TransactionPatternEvaluator::new().evaluate(&history, now);
    assert_eq!(set.get(factors::AMOUNT_VARIANCE), Some(0.0));
}

/// A single transaction can score neither velocity nor variance.
#[test]
fn single_transaction_scores_zero_velocity_and_variance() {
    let now = at("2026-03-01T12:00:00Z");
    let history = vec![obs(900.0, now - Duration::days(2))];

    let set = TransactionPatternEvaluator::new().evaluate(&history, now);
    assert_eq!(set.get(factors::VELOCITY), Some(0.0));
    assert_eq!(set.get(factors::AMOUNT_VARIANCE), Some(0.0));
    assert!(approx(set.get(factors::FREQUENCY).unwrap(), 1.0 / 50.0));
}

/// Transactions a minute apart saturate the velocity factor.
#[test]
fn tight_spacing_saturates_velocity() {
    let now = at("2026-03-01T12:00:00Z");
    let history: Vec<TxnObservation> = (0..4)
        .map(|i| obs(100.0, now - Duration::minutes(i)))
        .collect();

    let set = TransactionPatternEvaluator::new().evaluate(&history, now);
    assert_eq!(set.get(factors::VELOCITY), Some(1.0));
}

/// Two-hour spacing scores half velocity (3600 / 7200).
#[test]
fn two_hour_spacing_scores_half_velocity() {
    let now = at("2026-03-01T12:00:00Z");
    let history = vec![
        obs(100.0, now - Duration::hours(4)),
        obs(100.0, now - Duration::hours(2)),
        obs(100.0, now),
    ];

    let set = TransactionPatternEvaluator::new().evaluate(&history, now);
    assert!(approx(set.get(factors::VELOCITY).unwrap(), 0.5));
}

/// Frequency counts only the trailing seven days.
#[test]
fn frequency_counts_only_trailing_week() {
    let now = at("2026-03-01T12:00:00Z");
    let mut history = Vec::new();
    for i in 0..5 {
        history.push(obs(100.0, now - Duration::days(i + 1))); // in window
    }
    for i in 0..5 {
        history.push(obs(100.0, now - Duration::days(30 + i))); // outside
    }

    let set = TransactionPatternEvaluator::new().evaluate(&history, now);
    assert!(approx(set.get(factors::FREQUENCY).unwrap(), 5.0 / 50.0));
}

/// An all-zero-amount history must not divide by zero.
#[test]
fn zero_amounts_do_not_divide_by_zero() {
    let now = at("2026-03-01T12:00:00Z");
    let history: Vec<TxnObservation> = (0..3)
        .map(|i| obs(0.0, now - Duration::days(i + 1)))
        .collect();

    let set = TransactionPatternEvaluator::new().evaluate(&history, now);
    assert_eq!(set.get(factors::AMOUNT_VARIANCE), Some(0.0));
    for (key, value) in set.iter() {
        assert!(value.is_finite(), "factor {key} not finite: {value}");
    }
}

/// The overall score is the documented fixed weighting of the factors.
#[test]
fn overall_risk_uses_fixed_weights() {
    let now = at("2026-03-01T12:00:00Z");
    // Two transactions two hours apart: velocity 0.5, amounts 100/300 give
    // variance 10_000 over mean² 40_000 = 0.25, both in the trailing week.
    let history = vec![
        obs(100.0, now - Duration::hours(2)),
        obs(300.0, now),
    ];

    let set = TransactionPatternEvaluator::new().evaluate(&history, now);
    let expected = 0.4 * 0.5 + 0.3 * 0.25 + 0.3 * (2.0 / 50.0);
    assert!(
        approx(set.get(factors::OVERALL_RISK).unwrap(), expected),
        "overall {:?} != {expected}",
        set.get(factors::OVERALL_RISK)
    );
}

/// Every factor stays within the unit interval.
#[test]
fn all_factors_within_unit_interval() {
    let now = at("2026-03-01T12:00:00Z");
    let history: Vec<TxnObservation> = (0..60)
        .map(|i| obs((i as f64) * 913.7, now - Duration::minutes(i * 7)))
        .collect();

    let set = TransactionPatternEvaluator::new().evaluate(&history, now);
    for (key, value) in set.iter() {
        assert!(
            (0.0..=1.0).contains(&value),
            "factor {key} out of range: {value}"
        );
    }
}
