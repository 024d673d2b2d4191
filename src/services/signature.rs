use {
    crate::domain::error::ReconError,
    crate::domain::id::{IntentId, PaymentId},
    hmac::{Hmac, Mac},
    sha2::Sha256,
};

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &str) -> Result<HmacSha256, ReconError> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ReconError::Validation(format!("signing secret rejected: {e}")))
}

/// hex(HMAC-SHA256(`"<intent_id>|<payment_id>"`)) — the confirmation the
/// gateway hands the customer's browser after a completed hosted checkout.
pub fn checkout_signature(
    secret: &str,
    intent_id: &IntentId,
    payment_id: &PaymentId,
) -> Result<String, ReconError> {
    let mut mac = mac(secret)?;
    mac.update(format!("{intent_id}|{payment_id}").as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a client-reported completion triple.
pub fn verify_checkout_signature(
    secret: &str,
    intent_id: &IntentId,
    payment_id: &PaymentId,
    provided: &str,
) -> Result<(), ReconError> {
    let provided = hex::decode(provided)
        .map_err(|_| ReconError::PaymentVerification("signature is not valid hex".into()))?;
    let mut mac = mac(secret)?;
    mac.update(format!("{intent_id}|{payment_id}").as_bytes());
    mac.verify_slice(&provided)
        .map_err(|_| ReconError::PaymentVerification("signature mismatch".into()))
}

/// hex(HMAC-SHA256(raw body)) — the gateway signs every webhook delivery
/// with a separate webhook secret.
pub fn delivery_signature(secret: &str, body: &[u8]) -> Result<String, ReconError> {
    let mut mac = mac(secret)?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a webhook delivery, independent of the dedup check.
pub fn verify_delivery_signature(
    secret: &str,
    body: &[u8],
    provided: &str,
) -> Result<(), ReconError> {
    let provided = hex::decode(provided)
        .map_err(|_| ReconError::WebhookSignature("signature is not valid hex".into()))?;
    let mut mac = mac(secret)?;
    mac.update(body);
    mac.verify_slice(&provided)
        .map_err(|_| ReconError::WebhookSignature("signature mismatch".into()))
}
