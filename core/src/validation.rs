//! Caller-input validation: transaction intake and KYC document checks.
//!
//! Validation failures reject the single offending call with nothing
//! written; the engine never retries internally.

use crate::{
    error::{EngineError, EngineResult},
    rules,
    types::{EntityId, TransactionType},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Incoming transaction payload, validated before any evaluation runs.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRequest {
    pub customer_id: EntityId,
    pub amount: f64,
    pub transaction_type: String,
    pub description: Option<String>,
}

/// A request that passed the intake rules.
#[derive(Debug, Clone)]
pub struct ValidatedTransaction {
    pub customer_id: EntityId,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
}

impl TransactionRequest {
    pub fn validate(&self) -> EngineResult<ValidatedTransaction> {
        if self.amount <= 0.0 {
            return Err(EngineError::NonPositiveAmount {
                amount: self.amount,
            });
        }
        if self.amount >= rules::EDD_CEILING {
            return Err(EngineError::EnhancedDueDiligenceRequired {
                amount: self.amount,
                ceiling: rules::EDD_CEILING,
            });
        }
        let transaction_type: TransactionType = self.transaction_type.to_lowercase().parse()?;

        Ok(ValidatedTransaction {
            customer_id: self.customer_id.clone(),
            amount: self.amount,
            transaction_type,
            description: self.description.clone(),
        })
    }
}

/// Outcome of a document validity check.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentCheck {
    pub valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Validate a KYC document against its type-specific rules.
///
/// Unknown document types are a validation error. Age and expiry breaches
/// mark the check invalid; an expiry inside the warning window only warns.
pub fn validate_document(
    doc_type: &str,
    issue_date: DateTime<Utc>,
    expiry_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> EngineResult<DocumentCheck> {
    let rule = rules::document_rule(doc_type).ok_or_else(|| EngineError::UnknownDocumentType {
        value: doc_type.to_string(),
    })?;

    let mut check = DocumentCheck {
        valid: true,
        warnings: Vec::new(),
        errors: Vec::new(),
    };

    if let Some(max_months) = rule.max_age_months {
        if now - issue_date > Duration::days(max_months * 30) {
            check.valid = false;
            check
                .errors
                .push(format!("Document too old. Must be less than {max_months} months"));
        }
    }

    // Expiry is only assessed when a date was supplied.
    if rule.expiry_required {
        if let Some(expiry) = expiry_date {
            if expiry < now {
                check.valid = false;
                check.errors.push("Document has expired".into());
            } else if expiry < now + Duration::days(rules::DOC_EXPIRY_WARNING_DAYS) {
                check.warnings.push("Document will expire soon".into());
            }
        }
    }

    if !check.valid {
        log::info!("document rejected ({doc_type}): {:?}", check.errors);
    }

    Ok(check)
}
