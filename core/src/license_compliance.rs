//! PSR license document checks and compliance reporting.

use crate::{
    customer_risk::CustomerRiskEvaluator,
    factors::RiskFactorSet,
    rules,
    snapshot::{CustomerSnapshot, TransactionSnapshot},
    types::{ComplianceStatus, CustomerType, EntityId},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize)]
pub struct LicenseVerificationResult {
    pub complete: bool,
    pub missing_documents: Vec<String>,
    pub additional_documents: Vec<String>,
}

/// Monitoring statistics carried into the compliance report.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionMonitoringSummary {
    pub suspicious_transactions: usize,
    pub total_transactions: usize,
    /// None when the customer has no transactions.
    pub average_transaction_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub customer_id: EntityId,
    pub verification_status: bool,
    pub risk_assessment: RiskFactorSet,
    pub transaction_monitoring: TransactionMonitoringSummary,
    pub compliance_status: ComplianceStatus,
    pub generated_at: DateTime<Utc>,
}

/// Stateless verifier for PSR license document requirements.
#[derive(Debug, Default)]
pub struct LicenseComplianceVerifier;

impl LicenseComplianceVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Check the provided document set against the fixed requirement set
    /// for the customer type. The requirement set is applied whole.
    pub fn verify_license_requirements(
        &self,
        customer_type: CustomerType,
        documents: &[String],
    ) -> LicenseVerificationResult {
        let required: BTreeSet<&str> = rules::required_documents(customer_type)
            .iter()
            .copied()
            .collect();
        let provided: BTreeSet<&str> = documents.iter().map(String::as_str).collect();

        LicenseVerificationResult {
            complete: required.is_subset(&provided),
            missing_documents: required
                .difference(&provided)
                .map(|s| s.to_string())
                .collect(),
            additional_documents: provided
                .difference(&required)
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Assemble the license-application compliance report.
    ///
    /// The compliant/non-compliant label follows the verification flag
    /// alone; the computed risk factors are reported alongside but do not
    /// gate the label.
    pub fn compliance_report(
        &self,
        customer: &CustomerSnapshot,
        transactions: &[TransactionSnapshot],
        risk_evaluator: &CustomerRiskEvaluator,
        now: DateTime<Utc>,
    ) -> ComplianceReport {
        let total = transactions.len();
        let suspicious = transactions.iter().filter(|t| t.is_suspicious).count();
        let average = if total == 0 {
            None
        } else {
            Some(transactions.iter().map(|t| t.amount).sum::<f64>() / total as f64)
        };

        let compliance_status = if customer.is_verified {
            ComplianceStatus::Compliant
        } else {
            ComplianceStatus::NonCompliant
        };

        ComplianceReport {
            customer_id: customer.customer_id.clone(),
            verification_status: customer.is_verified,
            risk_assessment: risk_evaluator.evaluate(customer, transactions, now),
            transaction_monitoring: TransactionMonitoringSummary {
                suspicious_transactions: suspicious,
                total_transactions: total,
                average_transaction_amount: average,
            },
            compliance_status,
            generated_at: now,
        }
    }
}
