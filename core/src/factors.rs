//! Named risk factors and their scores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Factor keys ──────────────────────────────────────────────────────────────

pub const IDENTITY_VERIFICATION: &str = "identity_verification";
pub const TRANSACTION_PATTERN: &str = "transaction_pattern";
pub const GEOGRAPHIC_RISK: &str = "geographic_risk";
pub const BUSINESS_TYPE_RISK: &str = "business_type_risk";
pub const VELOCITY: &str = "velocity";
pub const AMOUNT_VARIANCE: &str = "amount_variance";
pub const FREQUENCY: &str = "frequency";
pub const OVERALL_RISK: &str = "overall_risk";

/// Mapping from factor name to a score in [0, 1].
///
/// Serializes as a flat JSON object keyed by factor name. Iteration order is
/// stable (sorted by key) so serialized output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskFactorSet(BTreeMap<String, f64>);

impl RiskFactorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, score: f64) {
        debug_assert!(
            (0.0..=1.0).contains(&score),
            "factor {key} out of range: {score}"
        );
        self.0.insert(key.to_string(), score);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Unweighted mean over all factor scores; 0.0 for an empty set.
    pub fn mean(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.0.values().sum::<f64>() / self.0.len() as f64
    }
}
