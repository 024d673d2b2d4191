use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{
            id::{IntentId, PaymentId},
            order::{Address, Order},
        },
        services::checkout::{self, CheckoutPayload, IssuedIntent, PaymentClaim},
        services::pricing::ProposedLine,
    },
    axum::{Json, extract::State, http::StatusCode},
    serde::Deserialize,
    uuid::Uuid,
};

#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    pub items: Vec<ProposedLine>,
}

// POST /checkout/intent
pub async fn create_intent(
    State(state): State<AppState>,
    Json(request): Json<IntentRequest>,
) -> Result<Json<IssuedIntent>, ApiError> {
    let issued = checkout::issue_intent(
        &*state.gateway,
        &*state.catalog,
        &state.pricing,
        &request.items,
        &state.gateway_key_id,
    )
    .await?;

    Ok(Json(issued))
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub user_id: Uuid,
    pub items: Vec<ProposedLine>,
    pub shipping_info: Address,
    pub billing_info: Option<Address>,
    pub intent_id: String,
    pub payment_id: String,
    pub signature: String,
}

// POST /checkout/verify
pub async fn verify_checkout(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let claim = PaymentClaim {
        intent_id: IntentId::new(request.intent_id)?,
        payment_id: PaymentId::new(request.payment_id)?,
        signature: request.signature,
    };
    let payload = CheckoutPayload {
        user_id: request.user_id,
        lines: request.items,
        shipping_info: request.shipping_info,
        billing_info: request.billing_info,
    };

    let order = checkout::verify_and_record(
        &state.pool,
        &*state.catalog,
        &state.pricing,
        &state.checkout_secret,
        &claim,
        payload,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(order)))
}
