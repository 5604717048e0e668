//! Customer-level compliance risk factors.
//!
//! Produces the per-factor view used by regulatory reporting and license
//! checks. This is deliberately separate from the transaction-pattern view
//! (`transaction_pattern`): the two risk surfaces are reported side by side
//! and never merged into a single undocumented number.

use crate::{
    factors::{self, RiskFactorSet},
    rules,
    snapshot::{CustomerSnapshot, TransactionSnapshot},
    types::EntityId,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stateless evaluator for customer-level compliance risk. Construct once
/// and share; it holds no per-call state.
#[derive(Debug, Default)]
pub struct CustomerRiskEvaluator;

impl CustomerRiskEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the per-factor risk scores for a customer.
    ///
    /// `geographic_risk` and `business_type_risk` are reserved keys and stay
    /// at zero; jurisdiction exposure is surfaced through
    /// [`CustomerRiskEvaluator::country_warnings`] instead.
    pub fn evaluate(
        &self,
        customer: &CustomerSnapshot,
        transactions: &[TransactionSnapshot],
        now: DateTime<Utc>,
    ) -> RiskFactorSet {
        let mut set = RiskFactorSet::new();

        // A verified flag without a recorded date counts as never verified.
        let identity = match (customer.is_verified, customer.last_verification) {
            (false, _) | (true, None) => 1.0,
            (true, Some(at)) if (now - at).num_days() > rules::VERIFICATION_STALE_DAYS => 0.5,
            (true, Some(_)) => 0.0,
        };
        set.set(factors::IDENTITY_VERIFICATION, identity);

        let total = transactions.len();
        let pattern = if total == 0 {
            0.0
        } else {
            let suspicious = transactions.iter().filter(|t| t.is_suspicious).count();
            suspicious as f64 / total as f64
        };
        set.set(factors::TRANSACTION_PATTERN, pattern);

        set.set(factors::GEOGRAPHIC_RISK, 0.0);
        set.set(factors::BUSINESS_TYPE_RISK, 0.0);
        set
    }

    /// Descriptive warnings for customers tied to listed jurisdictions.
    /// Warning strings, not alerts; consumed by customer risk reporting.
    pub fn country_warnings(&self, country_code: &str) -> Vec<String> {
        match rules::high_risk_country(country_code) {
            Some(label) => vec![format!("Customer associated with {label}")],
            None => Vec::new(),
        }
    }

    /// Full assessment returned to callers: factor scores, jurisdiction
    /// warnings, and the unweighted mean of all factor scores.
    pub fn report(
        &self,
        customer: &CustomerSnapshot,
        transactions: &[TransactionSnapshot],
        now: DateTime<Utc>,
    ) -> CustomerRiskReport {
        let risk_factors = self.evaluate(customer, transactions, now);
        let country_warnings = self.country_warnings(&customer.country_code);
        if !country_warnings.is_empty() {
            log::info!(
                "customer {}: jurisdiction warning ({})",
                customer.customer_id,
                customer.country_code
            );
        }
        let overall_risk_score = risk_factors.mean();
        CustomerRiskReport {
            customer_id: customer.customer_id.clone(),
            risk_factors,
            country_warnings,
            overall_risk_score,
            generated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerRiskReport {
    pub customer_id: EntityId,
    pub risk_factors: RiskFactorSet,
    pub country_warnings: Vec<String>,
    pub overall_risk_score: f64,
    pub generated_at: DateTime<Utc>,
}
