//! Temporal pattern risk over a customer's transaction history.
//!
//! Scores velocity (how tightly spaced transactions are), amount variance
//! (how erratic the amounts are) and frequency (trailing-week volume), then
//! combines them into `overall_risk` with fixed weights.

use crate::{
    factors::{self, RiskFactorSet},
    rules,
    snapshot::TransactionSnapshot,
};
use chrono::{DateTime, Duration, Utc};

// ── Overall-risk weights ─────────────────────────────────────────────────────

const VELOCITY_WEIGHT: f64 = 0.4;
const VARIANCE_WEIGHT: f64 = 0.3;
const FREQUENCY_WEIGHT: f64 = 0.3;

/// Average inter-transaction gap (seconds) at which velocity saturates.
const REFERENCE_GAP_SECS: f64 = 3600.0;

/// No history carries no signal; score the default medium risk.
const NO_HISTORY_RISK: f64 = 0.5;

/// Minimal view of a transaction for pattern analysis, decoupled from the
/// record-store schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TxnObservation {
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<&TransactionSnapshot> for TxnObservation {
    fn from(t: &TransactionSnapshot) -> Self {
        Self {
            amount: t.amount,
            timestamp: t.timestamp,
        }
    }
}

/// Stateless evaluator for transaction-pattern risk.
#[derive(Debug, Default)]
pub struct TransactionPatternEvaluator;

impl TransactionPatternEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a customer's history.
    ///
    /// An empty history yields `{overall_risk: 0.5}` with no other keys.
    /// Velocity and variance need at least two transactions and are 0.0
    /// below that.
    pub fn evaluate(&self, observations: &[TxnObservation], now: DateTime<Utc>) -> RiskFactorSet {
        let mut set = RiskFactorSet::new();

        if observations.is_empty() {
            set.set(factors::OVERALL_RISK, NO_HISTORY_RISK);
            return set;
        }

        let velocity = Self::velocity(observations);
        let amount_variance = Self::amount_variance(observations);
        let frequency = Self::frequency(observations, now);

        set.set(factors::VELOCITY, velocity);
        set.set(factors::AMOUNT_VARIANCE, amount_variance);
        set.set(factors::FREQUENCY, frequency);
        set.set(
            factors::OVERALL_RISK,
            VELOCITY_WEIGHT * velocity
                + VARIANCE_WEIGHT * amount_variance
                + FREQUENCY_WEIGHT * frequency,
        );
        set
    }

    /// Average gap between consecutive (time-sorted) transactions, scored
    /// so that gaps at or below an hour saturate at 1.0.
    fn velocity(observations: &[TxnObservation]) -> f64 {
        if observations.len() < 2 {
            return 0.0;
        }
        let mut timestamps: Vec<DateTime<Utc>> =
            observations.iter().map(|o| o.timestamp).collect();
        timestamps.sort();

        let gaps: Vec<f64> = timestamps
            .windows(2)
            .map(|w| (w[1] - w[0]).num_seconds() as f64)
            .collect();
        let avg_gap = gaps.iter().sum::<f64>() / gaps.len() as f64;
        (REFERENCE_GAP_SECS / avg_gap.max(1.0)).min(1.0)
    }

    /// Population variance of amounts relative to the squared mean, capped
    /// at 1.0. An all-zero-amount history contributes no risk.
    fn amount_variance(observations: &[TxnObservation]) -> f64 {
        if observations.len() < 2 {
            return 0.0;
        }
        let n = observations.len() as f64;
        let mean = observations.iter().map(|o| o.amount).sum::<f64>() / n;
        if mean == 0.0 {
            return 0.0;
        }
        let variance = observations
            .iter()
            .map(|o| (o.amount - mean).powi(2))
            .sum::<f64>()
            / n;
        (variance / (mean * mean)).min(1.0)
    }

    /// Trailing-week transaction count against the weekly cap.
    fn frequency(observations: &[TxnObservation], now: DateTime<Utc>) -> f64 {
        let window = Duration::days(rules::STRUCTURING_WINDOW_DAYS);
        let recent = observations
            .iter()
            .filter(|o| now - o.timestamp <= window)
            .count();
        (recent as f64 / rules::WEEKLY_FREQUENCY_CAP).min(1.0)
    }
}
