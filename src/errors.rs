use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Record not found: {0}")]
    NotFound(String),
}
