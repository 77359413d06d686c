use thiserror::Error;

/// Top-level error for payment operations
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("Database error: {0}")]
    Database(String),
}
