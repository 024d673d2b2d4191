use {
    super::error::ReconError,
    super::id::IntentId,
    super::money::Money,
    std::{future::Future, pin::Pin},
};

/// A gateway-side payment intent, created before the customer pays.
/// Nothing is persisted on our side at this point — an abandoned intent is
/// just an unconsumed row on the gateway.
#[derive(Debug, Clone)]
pub struct CreatedIntent {
    pub intent_id: IntentId,
    pub money: Money,
}

pub trait PaymentGateway: Send + Sync {
    fn create_intent(
        &self,
        money: Money,
        receipt: &str,
    ) -> Pin<Box<dyn Future<Output = Result<CreatedIntent, ReconError>> + Send + '_>>;
}
