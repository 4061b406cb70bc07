use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("{0}")]
    Validation(String),

    #[error("Payment not found: {0}")]
    PaymentNotFound(Uuid),

    #[error("Webhook not found: {0}")]
    WebhookNotFound(Uuid),

    #[error("Payment processing failed: {0}")]
    Processing(String),

    #[error("Encryption error: {0}")]
    Crypto(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
