use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transaction amount must be positive (got {amount})")]
    NonPositiveAmount { amount: f64 },

    #[error("Transactions of {amount} require enhanced due diligence (ceiling {ceiling})")]
    EnhancedDueDiligenceRequired { amount: f64, ceiling: f64 },

    #[error("Unknown transaction type '{value}'")]
    UnknownTransactionType { value: String },

    #[error("Unknown document type '{value}'")]
    UnknownDocumentType { value: String },

    #[error("Unknown customer type '{value}'")]
    UnknownCustomerType { value: String },

    #[error("Unrecognized {field} value '{value}' in record store")]
    UnrecognizedValue { field: &'static str, value: String },

    #[error("Malformed timestamp '{value}' in record store")]
    MalformedTimestamp { value: String },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// True for errors the caller can correct and resubmit. Everything else
    /// is a store or data failure and must never be collapsed into a
    /// default risk score.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::NonPositiveAmount { .. }
                | EngineError::EnhancedDueDiligenceRequired { .. }
                | EngineError::UnknownTransactionType { .. }
                | EngineError::UnknownDocumentType { .. }
                | EngineError::UnknownCustomerType { .. }
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
