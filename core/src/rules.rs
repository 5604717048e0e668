//! Static rule tables and threshold constants.
//!
//! Every value here is part of the engine's observable contract: changing
//! one changes alerting and scoring behavior for every caller, so changes
//! must be called out explicitly in release notes.

use crate::types::CustomerType;
use serde::Serialize;

// ── Monetary thresholds ──────────────────────────────────────────────────────

/// Currency Transaction Report threshold. Strictly-greater-than.
pub const CTR_THRESHOLD: f64 = 10_000.0;
/// Trailing-window total above which structuring is suspected.
pub const STRUCTURING_THRESHOLD: f64 = 5_000.0;
/// Single-transaction ceiling; at or above this, intake is rejected pending
/// enhanced due diligence.
pub const EDD_CEILING: f64 = 1_000_000.0;

// ── Temporal windows ─────────────────────────────────────────────────────────

/// Lookback for the structuring check and the frequency factor.
pub const STRUCTURING_WINDOW_DAYS: i64 = 7;
/// Identity verification older than this is considered stale.
pub const VERIFICATION_STALE_DAYS: i64 = 365;
/// Documents expiring within this window get an early warning.
pub const DOC_EXPIRY_WARNING_DAYS: i64 = 90;

// ── Scoring bands ────────────────────────────────────────────────────────────

pub const HIGH_RISK_BAND: f64 = 0.7;
pub const LOW_RISK_BAND: f64 = 0.3;
/// Transactions-per-week count at which the frequency factor saturates.
pub const WEEKLY_FREQUENCY_CAP: f64 = 50.0;

/// Risk band a scalar score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn classify(score: f64) -> Self {
        if score >= HIGH_RISK_BAND {
            RiskBand::High
        } else if score >= LOW_RISK_BAND {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
        }
    }
}

// ── Jurisdiction table ───────────────────────────────────────────────────────

/// Country codes with a standing AML concern. The label feeds customer risk
/// reporting as a warning string, not a transaction alert.
pub fn high_risk_country(country_code: &str) -> Option<&'static str> {
    match country_code {
        "XX" => Some("High-risk jurisdiction"),
        "YY" => Some("Sanctioned country"),
        "ZZ" => Some("Non-cooperative jurisdiction"),
        _ => None,
    }
}

// ── PSR license document sets ────────────────────────────────────────────────

/// Required-document sets are fixed per customer type and applied whole.
pub fn required_documents(customer_type: CustomerType) -> &'static [&'static str] {
    match customer_type {
        CustomerType::Business => &[
            "certificate_of_incorporation",
            "business_plan",
            "financial_projections",
            "aml_policy",
        ],
        CustomerType::Personal => &[
            "proof_of_identity",
            "proof_of_address",
            "source_of_funds",
        ],
    }
}

// ── KYC document validity rules ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct DocumentRule {
    pub doc_type: &'static str,
    pub expiry_required: bool,
    /// Maximum document age, for proof-of-address style documents.
    pub max_age_months: Option<i64>,
}

pub const DOCUMENT_RULES: &[DocumentRule] = &[
    DocumentRule {
        doc_type: "passport",
        expiry_required: true,
        max_age_months: None,
    },
    DocumentRule {
        doc_type: "driving_license",
        expiry_required: true,
        max_age_months: None,
    },
    DocumentRule {
        doc_type: "national_id",
        expiry_required: true,
        max_age_months: None,
    },
    DocumentRule {
        doc_type: "utility_bill",
        expiry_required: false,
        max_age_months: Some(3),
    },
];

pub fn document_rule(doc_type: &str) -> Option<&'static DocumentRule> {
    DOCUMENT_RULES.iter().find(|r| r.doc_type == doc_type)
}
