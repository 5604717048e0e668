//! Immutable record snapshots supplied by the record store.
//!
//! Evaluators read these views and write nothing. The store mutates the
//! underlying rows only after the engine returns, so two evaluations over
//! the same snapshots always agree.

use crate::types::{
    ComplianceStatus, CustomerType, EntityId, ScreeningStatus, TransactionType,
    VerificationStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub customer_id: EntityId,
    pub customer_type: CustomerType,
    pub country_code: String,
    pub is_verified: bool,
    pub last_verification: Option<DateTime<Utc>>,
    pub risk_score: f64,
    pub compliance_status: ComplianceStatus,
    pub business_type: Option<String>,
    pub annual_revenue: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSnapshot {
    pub transaction_id: EntityId,
    pub customer_id: EntityId,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    pub transaction_type: TransactionType,
    pub source_country: String,
    pub destination_country: String,
    pub reference: Option<String>,
    pub risk_score: f64,
    pub is_suspicious: bool,
    pub screening_status: ScreeningStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationDocumentSnapshot {
    pub document_id: EntityId,
    pub customer_id: EntityId,
    pub document_type: String,
    pub upload_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub verification_status: VerificationStatus,
    pub issuing_country: String,
    pub document_number: Option<String>,
}
