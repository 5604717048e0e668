//! Regulatory reporting triggers: CTR and structuring SARs.

use crate::{rules, snapshot::TransactionSnapshot, types::EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EngineError;

/// Closed set of regulatory report types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportType {
    Sar,
    Ctr,
    Str,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Sar => "SAR",
            ReportType::Ctr => "CTR",
            ReportType::Str => "STR",
        }
    }

    /// Long-form filing label.
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Sar => "Suspicious Activity Report",
            ReportType::Ctr => "Currency Transaction Report",
            ReportType::Str => "Suspicious Transaction Report",
        }
    }
}

impl FromStr for ReportType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SAR" => Ok(ReportType::Sar),
            "CTR" => Ok(ReportType::Ctr),
            "STR" => Ok(ReportType::Str),
            other => Err(EngineError::UnrecognizedValue {
                field: "report_type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

impl FromStr for Severity {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(Severity::High),
            "MEDIUM" => Ok(Severity::Medium),
            "LOW" => Ok(Severity::Low),
            other => Err(EngineError::UnrecognizedValue {
                field: "severity",
                value: other.to_string(),
            }),
        }
    }
}

/// A single regulatory alert. Alerts are ephemeral: produced fresh per
/// evaluation call; the record store owns persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceAlert {
    pub report_type: ReportType,
    pub severity: Severity,
    pub description: String,
    pub generated_at: DateTime<Utc>,
    pub related_entities: Vec<EntityId>,
    pub action_required: bool,
}

/// Stateless rule engine for transaction-level regulatory triggers.
#[derive(Debug, Default)]
pub struct RegulatoryAlertEngine;

impl RegulatoryAlertEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one transaction against the CTR and structuring rules. Both
    /// checks run independently and both may fire.
    ///
    /// `recent_transactions` is the customer's trailing-7-day activity and
    /// must include the transaction under evaluation.
    pub fn evaluate_transaction(
        &self,
        transaction: &TransactionSnapshot,
        recent_transactions: &[TransactionSnapshot],
        now: DateTime<Utc>,
    ) -> Vec<ComplianceAlert> {
        let mut alerts = Vec::new();

        // CTR: strictly greater than the threshold.
        if transaction.amount > rules::CTR_THRESHOLD {
            log::info!(
                "CTR trigger: customer {} amount £{:.2}",
                transaction.customer_id,
                transaction.amount
            );
            alerts.push(ComplianceAlert {
                report_type: ReportType::Ctr,
                severity: Severity::High,
                description: format!(
                    "Transaction amount (£{:.2}) exceeds CTR threshold",
                    transaction.amount
                ),
                generated_at: now,
                related_entities: vec![transaction.customer_id.clone()],
                action_required: true,
            });
        }

        // Structuring: trailing-window total, current transaction included.
        let window_total: f64 = recent_transactions.iter().map(|t| t.amount).sum();
        if window_total > rules::STRUCTURING_THRESHOLD {
            log::warn!(
                "structuring trigger: customer {} moved £{:.2} in {} days",
                transaction.customer_id,
                window_total,
                rules::STRUCTURING_WINDOW_DAYS
            );
            alerts.push(ComplianceAlert {
                report_type: ReportType::Sar,
                severity: Severity::Medium,
                description: "Multiple transactions potentially indicating structuring".into(),
                generated_at: now,
                related_entities: vec![transaction.customer_id.clone()],
                action_required: true,
            });
        }

        alerts
    }
}
