use {
    crate::domain::error::ReconError,
    crate::domain::webhook::{GatewayEvent, NewWebhookEvent, ProcessOutcome, Reconciliation, reconcile},
    crate::infra::postgres::{order_repo, webhook_repo},
    sqlx::PgPool,
};

/// Push one verified gateway delivery through the reconciliation pipeline.
///
/// Everything happens in a single transaction under the intent's advisory
/// lock: read the matching order, decide the outcome purely, append the
/// ledger row, apply the side effect. A conflict on `dedupe_key` means a
/// redelivery — commit nothing else and report `Duplicate` so the handler
/// acknowledges it. Any storage error aborts the transaction whole, so the
/// gateway's retry finds no half-recorded state.
pub async fn process_gateway_event(
    pool: &PgPool,
    event: &GatewayEvent,
) -> Result<ProcessOutcome, ReconError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SET LOCAL lock_timeout = '5s'")
        .execute(&mut *tx)
        .await?;

    // Same lock the checkout writer takes, so the payment state read below
    // cannot move before our write commits.
    let lock_key = match &event.intent_id {
        Some(intent) => intent.as_str(),
        None => event.payment_id.as_str(),
    };
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(lock_key)
        .execute(&mut *tx)
        .await?;

    let order = match &event.intent_id {
        Some(intent) => order_repo::find_by_intent(&mut tx, intent).await?,
        None => None,
    };

    let decision = reconcile(&event.event_type, order.as_ref().map(|o| o.payment_status));
    let row = NewWebhookEvent::from_event(event, &decision);

    if !webhook_repo::insert_event(&mut tx, &row).await? {
        tx.commit().await?;
        return Ok(ProcessOutcome::Duplicate);
    }

    match (decision.new_state(), &order) {
        (Some(new_state), Some(order)) => {
            order_repo::set_payment_state(&mut tx, order.id, new_state, Some(&event.payment_id))
                .await?;
            tx.commit().await?;

            tracing::info!(
                order_id = %order.id,
                payment_id = %event.payment_id,
                state = %new_state,
                "webhook reconciled payment state"
            );
            Ok(ProcessOutcome::Processed(order.id))
        }
        _ => {
            tx.commit().await?;

            if matches!(decision, Reconciliation::UnknownOrder) {
                tracing::warn!(
                    payment_id = %event.payment_id,
                    event_type = %event.event_type,
                    "webhook references an intent this store never recorded"
                );
            } else {
                tracing::info!(
                    payment_id = %event.payment_id,
                    event_type = %event.event_type,
                    note = %decision.note(),
                    "webhook recorded without side effects"
                );
            }
            Ok(ProcessOutcome::Ignored)
        }
    }
}
