use {
    crate::domain::error::ReconError,
    crate::domain::id::IntentId,
    crate::domain::webhook::NewWebhookEvent,
    sqlx::{Postgres, Transaction},
};

/// Append one delivery to the webhook ledger.
/// Returns `false` when the dedupe key is already present — the uniqueness
/// violation, not application logic, is what detects redelivery.
pub async fn insert_event(
    tx: &mut Transaction<'_, Postgres>,
    event: &NewWebhookEvent,
) -> Result<bool, ReconError> {
    let inserted: Option<bool> = sqlx::query_scalar(
        r#"
        INSERT INTO webhook_events
            (id, dedupe_key, event_type, payment_id, intent_id, status, note, payload)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (dedupe_key) DO NOTHING
        RETURNING true
        "#,
    )
    .bind(event.id)
    .bind(&event.dedupe_key)
    .bind(&event.event_type)
    .bind(event.payment_id.as_str())
    .bind(event.intent_id.as_ref().map(IntentId::as_str))
    .bind(event.status.as_str())
    .bind(&event.note)
    .bind(&event.payload)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(inserted.is_some())
}
