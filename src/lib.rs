pub mod adapters;
pub mod domain;
pub mod infra;
pub mod services;

use std::sync::Arc;

use crate::{
    domain::{catalog::CatalogReader, gateway::PaymentGateway},
    services::pricing::PricingPolicy,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub catalog: Arc<dyn CatalogReader>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub pricing: Arc<PricingPolicy>,
    /// Public key id the client hands to the gateway's hosted checkout.
    pub gateway_key_id: Arc<str>,
    /// Secret keying the checkout completion signature.
    pub checkout_secret: Arc<str>,
    /// Separate secret keying webhook delivery signatures.
    pub webhook_secret: Arc<str>,
    pub admin_token: Arc<str>,
}
