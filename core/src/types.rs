//! Shared primitive types and closed enumerations used across the engine.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A stable, unique identifier for any entity in the record store.
pub type EntityId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    Personal,
    Business,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Personal => "personal",
            CustomerType::Business => "business",
        }
    }
}

impl FromStr for CustomerType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(CustomerType::Personal),
            "business" => Ok(CustomerType::Business),
            other => Err(EngineError::UnknownCustomerType {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    Payment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::Transfer => "transfer",
            TransactionType::Payment => "payment",
        }
    }
}

impl FromStr for TransactionType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(TransactionType::Deposit),
            "withdrawal" => Ok(TransactionType::Withdrawal),
            "transfer" => Ok(TransactionType::Transfer),
            "payment" => Ok(TransactionType::Payment),
            other => Err(EngineError::UnknownTransactionType {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Pending,
    Compliant,
    NonCompliant,
    ReviewRequired,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Pending => "pending",
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::NonCompliant => "non_compliant",
            ComplianceStatus::ReviewRequired => "review_required",
        }
    }
}

impl FromStr for ComplianceStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ComplianceStatus::Pending),
            "compliant" => Ok(ComplianceStatus::Compliant),
            "non_compliant" => Ok(ComplianceStatus::NonCompliant),
            "review_required" => Ok(ComplianceStatus::ReviewRequired),
            other => Err(EngineError::UnrecognizedValue {
                field: "compliance_status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningStatus {
    Pending,
    Cleared,
    Flagged,
    Blocked,
}

impl ScreeningStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreeningStatus::Pending => "pending",
            ScreeningStatus::Cleared => "cleared",
            ScreeningStatus::Flagged => "flagged",
            ScreeningStatus::Blocked => "blocked",
        }
    }
}

impl FromStr for ScreeningStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ScreeningStatus::Pending),
            "cleared" => Ok(ScreeningStatus::Cleared),
            "flagged" => Ok(ScreeningStatus::Flagged),
            "blocked" => Ok(ScreeningStatus::Blocked),
            other => Err(EngineError::UnrecognizedValue {
                field: "screening_status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
    Expired,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
            VerificationStatus::Expired => "expired",
        }
    }
}

impl FromStr for VerificationStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            "expired" => Ok(VerificationStatus::Expired),
            other => Err(EngineError::UnrecognizedValue {
                field: "verification_status",
                value: other.to_string(),
            }),
        }
    }
}

/// Why a risk assessment was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    Initial,
    Periodic,
    Triggered,
}

impl AssessmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::Initial => "initial",
            AssessmentType::Periodic => "periodic",
            AssessmentType::Triggered => "triggered",
        }
    }
}

impl FromStr for AssessmentType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initial" => Ok(AssessmentType::Initial),
            "periodic" => Ok(AssessmentType::Periodic),
            "triggered" => Ok(AssessmentType::Triggered),
            other => Err(EngineError::UnrecognizedValue {
                field: "assessment_type",
                value: other.to_string(),
            }),
        }
    }
}
