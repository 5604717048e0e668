//! Customer-level scalar risk score.
//!
//! Combines the suspicious-transaction ratio, recent activity rate and
//! average amount into the single score written back onto the customer
//! record. Customers with no history get the documented default.

use crate::snapshot::TransactionSnapshot;
use chrono::{DateTime, Utc};

// ── Score weights and scales ─────────────────────────────────────────────────

const SUSPICIOUS_WEIGHT: f64 = 0.3;
const FREQUENCY_WEIGHT: f64 = 0.3;
const AMOUNT_WEIGHT: f64 = 0.4;

/// Transactions-per-day rate at which the frequency term saturates.
const FREQUENCY_SCALE: f64 = 10.0;
/// Mean amount at which the amount term saturates.
const AMOUNT_SCALE: f64 = 10_000.0;

/// Default medium risk for customers with no transaction history.
const DEFAULT_RISK: f64 = 0.5;

/// Stateless aggregator producing the customer record's scalar risk score.
#[derive(Debug, Default)]
pub struct RiskScoreAggregator;

impl RiskScoreAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Score a customer's history. Always in [0, 1].
    pub fn score(&self, transactions: &[TransactionSnapshot], now: DateTime<Utc>) -> f64 {
        let Some(latest) = transactions.iter().map(|t| t.timestamp).max() else {
            return DEFAULT_RISK;
        };
        let total = transactions.len() as f64;

        let suspicious = transactions.iter().filter(|t| t.is_suspicious).count() as f64;
        let suspicious_ratio = suspicious / total;

        // max(1, days) keeps same-day activity from dividing by zero.
        let days_since_latest = (now - latest).num_days().max(1) as f64;
        let frequency_term = (total / days_since_latest / FREQUENCY_SCALE).min(1.0);

        let mean_amount = transactions.iter().map(|t| t.amount).sum::<f64>() / total;
        let amount_term = (mean_amount / AMOUNT_SCALE).min(1.0);

        SUSPICIOUS_WEIGHT * suspicious_ratio
            + FREQUENCY_WEIGHT * frequency_term
            + AMOUNT_WEIGHT * amount_term
    }
}
