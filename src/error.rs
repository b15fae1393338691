use thiserror::Error;

// Everything that can stop a transaction from being explained.
// Interpretation itself never fails once the record has the right gross shape.
#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("Invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("Transaction {0} not found")]
    NotFound(String),

    #[error("Aptos node returned HTTP {status}: {body}")]
    Node { status: u16, body: String },

    #[error("Request to Aptos node failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed transaction record: {0}")]
    MalformedTransaction(String),
}

impl ExplainError {
    // The not-found / invalid-hash cases share one user-facing message
    pub fn user_message(&self) -> String {
        match self {
            ExplainError::InvalidHash(_) | ExplainError::NotFound(_) => {
                "Transaction not found or invalid hash".to_string()
            }
            other => other.to_string(),
        }
    }
}
