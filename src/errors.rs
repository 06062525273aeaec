use thiserror::Error;

/// Error type shared by the payment catalog, overlay, and workflow.
#[derive(Debug, Error)]
pub enum BundulError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("Payment not found: {0}")]
    PaymentNotFound(u32),
    #[error("Payment already paid: {0}")]
    AlreadyPaid(u32),
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BundulError {
    pub(crate) fn transition(action: &'static str, state: &'static str) -> Self {
        BundulError::InvalidTransition { action, state }
    }
}
