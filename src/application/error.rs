use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Description cannot be empty")]
    EmptyDescription,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
