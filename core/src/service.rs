//! Store-coupled orchestration around the pure engine.
//!
//! The service owns the fetch → evaluate → persist cycle. Store failures
//! propagate as errors and are never collapsed into a default risk score:
//! "no risk computed" and "evaluation could not be performed" stay
//! distinguishable for every caller.

use crate::{
    customer_risk::CustomerRiskReport,
    engine::AmlEngine,
    error::{EngineError, EngineResult},
    license_compliance::{ComplianceReport, LicenseVerificationResult},
    regulatory_alerts::ComplianceAlert,
    rules::{self, RiskBand},
    snapshot::CustomerSnapshot,
    store::{RecordStore, RiskAssessmentRecord, RiskDistribution},
    types::{AssessmentType, EntityId, ScreeningStatus},
};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Result of screening one transaction.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningOutcome {
    pub transaction_id: EntityId,
    pub suspicious: bool,
    pub alerts: Vec<ComplianceAlert>,
    /// The customer's refreshed aggregate score after this screening.
    pub customer_risk_score: f64,
}

/// Result of a license verification request.
#[derive(Debug, Clone, Serialize)]
pub struct LicenseOutcome {
    pub verification: LicenseVerificationResult,
    /// Present only when the document set was complete.
    pub report: Option<ComplianceReport>,
}

/// One entry of the periodic regulatory report sweep.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodReportEntry {
    pub transaction_id: EntityId,
    pub customer_id: EntityId,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    pub alerts: Vec<ComplianceAlert>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodReport {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_reports: usize,
    pub reports: Vec<PeriodReportEntry>,
}

/// Aggregate compliance posture for dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceOverview {
    pub total_customers: i64,
    pub low_risk_customers: i64,
    pub medium_risk_customers: i64,
    pub high_risk_customers: i64,
    pub suspicious_transactions_30d: i64,
    pub pending_verifications: i64,
}

pub struct ComplianceService<'a> {
    engine: AmlEngine,
    store: &'a RecordStore,
}

impl<'a> ComplianceService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self {
            engine: AmlEngine::new(),
            store,
        }
    }

    pub fn engine(&self) -> &AmlEngine {
        &self.engine
    }

    fn require_customer(&self, customer_id: &str) -> EngineResult<CustomerSnapshot> {
        self.store
            .get_customer(customer_id)?
            .ok_or_else(|| EngineError::NotFound {
                kind: "customer",
                id: customer_id.to_string(),
            })
    }

    /// Recompute a customer's factor set and aggregate score, persist both,
    /// and return the report.
    pub fn assess_customer(
        &self,
        customer_id: &str,
        assessment_type: AssessmentType,
        now: DateTime<Utc>,
    ) -> EngineResult<CustomerRiskReport> {
        let customer = self.require_customer(customer_id)?;
        let history = self.store.transactions_for_customer(customer_id)?;

        let report = self.engine.assess_customer(&customer, &history, now);
        let score = self.engine.aggregate_risk(&history, now);

        self.store.insert_risk_assessment(&RiskAssessmentRecord {
            assessment_id: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            assessed_at: now,
            risk_factors: report.risk_factors.clone(),
            overall_score: score,
            assessment_type,
        })?;
        self.store.update_customer_risk(customer_id, score)?;

        if RiskBand::classify(score) == RiskBand::High {
            log::warn!("customer {customer_id} scored in the high risk band ({score:.2})");
        }
        Ok(report)
    }

    /// Screen a recorded transaction: anomaly verdict, regulatory alerts,
    /// and the customer's refreshed aggregate score. Nothing is written
    /// until the corresponding evaluation step has succeeded.
    pub fn screen_transaction(
        &self,
        transaction_id: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<ScreeningOutcome> {
        let txn = self
            .store
            .get_transaction(transaction_id)?
            .ok_or_else(|| EngineError::NotFound {
                kind: "transaction",
                id: transaction_id.to_string(),
            })?;
        let customer = self.require_customer(&txn.customer_id)?;
        let history = self.store.transactions_for_customer(&txn.customer_id)?;

        let suspicious = self
            .engine
            .flag_transaction(&txn, customer.risk_score, history.len());

        let window_start = now - Duration::days(rules::STRUCTURING_WINDOW_DAYS);
        let window = self
            .store
            .transactions_in_window(&txn.customer_id, window_start, now)?;
        let alerts = self.engine.transaction_alerts(&txn, &window, now);

        let status = if suspicious {
            ScreeningStatus::Flagged
        } else {
            ScreeningStatus::Cleared
        };
        self.store
            .mark_transaction(&txn.transaction_id, suspicious, status)?;
        for alert in &alerts {
            self.store.insert_alert(
                &Uuid::new_v4().to_string(),
                &txn.customer_id,
                Some(&txn.transaction_id),
                alert,
            )?;
        }

        // Re-read so the aggregate sees the screening verdict just written.
        let history = self.store.transactions_for_customer(&txn.customer_id)?;
        let score = self.engine.aggregate_risk(&history, now);
        self.store.update_customer_risk(&txn.customer_id, score)?;

        Ok(ScreeningOutcome {
            transaction_id: txn.transaction_id,
            suspicious,
            alerts,
            customer_risk_score: score,
        })
    }

    /// Verify PSR license documents; on a complete set, assemble the
    /// compliance report and persist the resulting label.
    pub fn verify_license(
        &self,
        customer_id: &str,
        documents: &[String],
        now: DateTime<Utc>,
    ) -> EngineResult<LicenseOutcome> {
        let customer = self.require_customer(customer_id)?;
        let verification = self
            .engine
            .verify_license(customer.customer_type, documents);

        if !verification.complete {
            log::info!(
                "license documents incomplete for {customer_id}: missing {:?}",
                verification.missing_documents
            );
            return Ok(LicenseOutcome {
                verification,
                report: None,
            });
        }

        let history = self.store.transactions_for_customer(customer_id)?;
        let report = self.engine.compliance_report(&customer, &history, now);
        self.store
            .set_compliance_status(customer_id, report.compliance_status)?;

        Ok(LicenseOutcome {
            verification,
            report: Some(report),
        })
    }

    /// Re-evaluate every suspicious transaction in a period, each against
    /// the trailing window ending at its own timestamp.
    pub fn regulatory_reports(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<PeriodReport> {
        let suspicious = self.store.suspicious_transactions_in_range(start, end)?;

        let mut reports = Vec::new();
        for txn in suspicious {
            let window_start = txn.timestamp - Duration::days(rules::STRUCTURING_WINDOW_DAYS);
            let window =
                self.store
                    .transactions_in_window(&txn.customer_id, window_start, txn.timestamp)?;
            let alerts = self.engine.transaction_alerts(&txn, &window, txn.timestamp);
            if !alerts.is_empty() {
                reports.push(PeriodReportEntry {
                    transaction_id: txn.transaction_id.clone(),
                    customer_id: txn.customer_id.clone(),
                    amount: txn.amount,
                    timestamp: txn.timestamp,
                    alerts,
                });
            }
        }

        Ok(PeriodReport {
            start,
            end,
            total_reports: reports.len(),
            reports,
        })
    }

    /// Aggregate posture for the monitoring dashboard.
    pub fn overview(&self, now: DateTime<Utc>) -> EngineResult<ComplianceOverview> {
        let RiskDistribution { low, medium, high } = self.store.risk_distribution()?;
        Ok(ComplianceOverview {
            total_customers: self.store.customer_count()?,
            low_risk_customers: low,
            medium_risk_customers: medium,
            high_risk_customers: high,
            suspicious_transactions_30d: self
                .store
                .suspicious_transaction_count_since(now - Duration::days(30))?,
            pending_verifications: self.store.pending_document_count()?,
        })
    }
}
