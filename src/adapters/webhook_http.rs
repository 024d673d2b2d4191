use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{error::ReconError, webhook::{GatewayEvent, ProcessOutcome}},
        services::{signature, webhook_pipeline::process_gateway_event},
    },
    axum::{Json, extract::State, http::HeaderMap},
};

pub const SIGNATURE_HEADER: &str = "x-gateway-signature";
pub const EVENT_ID_HEADER: &str = "x-gateway-event-id";

// POST /webhooks/gateway
//
// Delivery signature first, independent of dedup; then parse; then the
// pipeline. A 2xx acknowledges the delivery (including duplicates); a 5xx
// tells the gateway to redeliver.
#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(event_type = tracing::field::Empty, payment_id = tracing::field::Empty)
)]
pub async fn gateway_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sig = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            ReconError::WebhookSignature(format!("missing {SIGNATURE_HEADER} header"))
        })?;
    signature::verify_delivery_signature(&state.webhook_secret, body.as_bytes(), sig)?;

    let event_id = headers
        .get(EVENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let event = match GatewayEvent::parse(&body, event_id) {
        Ok(event) => event,
        // An unparseable-but-authentic payload will not improve on retry, so
        // acknowledge it instead of making the gateway redeliver forever.
        Err(e @ (ReconError::Validation(_) | ReconError::Serialization(_))) => {
            tracing::warn!(error = %e, "unparseable webhook payload, acknowledged");
            return Ok(Json(serde_json::json!({"status": "ignored_invalid_payload"})));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::Span::current()
        .record("event_type", tracing::field::display(&event.event_type))
        .record("payment_id", tracing::field::display(&event.payment_id));

    match process_gateway_event(&state.pool, &event).await? {
        ProcessOutcome::Processed(order_id) => {
            tracing::info!(order_id = %order_id, "webhook processed");
            Ok(Json(serde_json::json!({"status": "processed"})))
        }
        ProcessOutcome::Ignored => Ok(Json(serde_json::json!({"status": "ignored"}))),
        ProcessOutcome::Duplicate => {
            tracing::info!("duplicate delivery, already processed");
            Ok(Json(serde_json::json!({"status": "duplicate"})))
        }
    }
}
