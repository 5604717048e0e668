//! Engine facade wiring the stateless evaluators together.
//!
//! Every method is a pure function of the supplied snapshots and the
//! explicit evaluation time. The engine owns no per-call state and never
//! touches the record store; callers supply complete, already-filtered
//! collections (for example "this customer's trailing-7-day activity").

use crate::{
    anomaly::AnomalyFlagger,
    customer_risk::{CustomerRiskEvaluator, CustomerRiskReport},
    factors::RiskFactorSet,
    license_compliance::{ComplianceReport, LicenseComplianceVerifier, LicenseVerificationResult},
    regulatory_alerts::{ComplianceAlert, RegulatoryAlertEngine},
    risk_aggregator::RiskScoreAggregator,
    snapshot::{CustomerSnapshot, TransactionSnapshot},
    transaction_pattern::{TransactionPatternEvaluator, TxnObservation},
    types::CustomerType,
};
use chrono::{DateTime, Utc};

pub struct AmlEngine {
    customer_risk: CustomerRiskEvaluator,
    patterns: TransactionPatternEvaluator,
    anomaly: AnomalyFlagger,
    aggregator: RiskScoreAggregator,
    alerts: RegulatoryAlertEngine,
    license: LicenseComplianceVerifier,
}

impl AmlEngine {
    pub fn new() -> Self {
        Self {
            customer_risk: CustomerRiskEvaluator::new(),
            patterns: TransactionPatternEvaluator::new(),
            anomaly: AnomalyFlagger::new(),
            aggregator: RiskScoreAggregator::new(),
            alerts: RegulatoryAlertEngine::new(),
            license: LicenseComplianceVerifier::new(),
        }
    }

    /// Customer-level compliance risk: factor scores, jurisdiction warnings
    /// and their unweighted mean.
    pub fn assess_customer(
        &self,
        customer: &CustomerSnapshot,
        transactions: &[TransactionSnapshot],
        now: DateTime<Utc>,
    ) -> CustomerRiskReport {
        self.customer_risk.report(customer, transactions, now)
    }

    /// Transaction-pattern risk over a full history.
    pub fn evaluate_patterns(
        &self,
        transactions: &[TransactionSnapshot],
        now: DateTime<Utc>,
    ) -> RiskFactorSet {
        let observations: Vec<TxnObservation> =
            transactions.iter().map(TxnObservation::from).collect();
        self.patterns.evaluate(&observations, now)
    }

    /// Boolean anomaly verdict for a single transaction.
    pub fn flag_transaction(
        &self,
        transaction: &TransactionSnapshot,
        customer_risk_score: f64,
        history_len: usize,
    ) -> bool {
        self.anomaly
            .is_suspicious(transaction, customer_risk_score, history_len)
    }

    /// Scalar customer risk score written back onto the customer record.
    pub fn aggregate_risk(
        &self,
        transactions: &[TransactionSnapshot],
        now: DateTime<Utc>,
    ) -> f64 {
        self.aggregator.score(transactions, now)
    }

    /// Regulatory alerts for one transaction given its customer's
    /// trailing-window activity (current transaction included).
    pub fn transaction_alerts(
        &self,
        transaction: &TransactionSnapshot,
        recent_transactions: &[TransactionSnapshot],
        now: DateTime<Utc>,
    ) -> Vec<ComplianceAlert> {
        self.alerts
            .evaluate_transaction(transaction, recent_transactions, now)
    }

    /// PSR document completeness check.
    pub fn verify_license(
        &self,
        customer_type: CustomerType,
        documents: &[String],
    ) -> LicenseVerificationResult {
        self.license
            .verify_license_requirements(customer_type, documents)
    }

    /// License-application compliance report.
    pub fn compliance_report(
        &self,
        customer: &CustomerSnapshot,
        transactions: &[TransactionSnapshot],
        now: DateTime<Utc>,
    ) -> ComplianceReport {
        self.license
            .compliance_report(customer, transactions, &self.customer_risk, now)
    }
}

impl Default for AmlEngine {
    fn default() -> Self {
        Self::new()
    }
}
