use {thiserror::Error, uuid::Uuid};

#[derive(Debug, Error)]
pub enum ReconError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("invalid order: {0}")]
    InvalidOrder(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid status transition: {0}")]
    InvalidStatusTransition(String),

    #[error("exchange request already decided: {0}")]
    AlreadyDecided(Uuid),

    #[error("exchange request already exists for order {0}")]
    DuplicateRequest(Uuid),

    #[error("not eligible for exchange: {0}")]
    NotEligible(String),

    #[error("payment verification failed: {0}")]
    PaymentVerification(String),

    #[error("gateway unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("webhook signature: {0}")]
    WebhookSignature(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
