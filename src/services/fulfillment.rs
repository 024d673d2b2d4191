use {
    crate::domain::error::ReconError,
    crate::domain::order::{Order, OrderStatus},
    crate::infra::postgres::order_repo,
    sqlx::PgPool,
    uuid::Uuid,
};

/// Admin-initiated fulfillment transition. Validated against the state read
/// under the order's advisory lock, so two racing admins cannot both move
/// the same order.
pub async fn set_order_status(
    pool: &PgPool,
    order_id: Uuid,
    new: OrderStatus,
) -> Result<Order, ReconError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SET LOCAL lock_timeout = '5s'")
        .execute(&mut *tx)
        .await?;
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(order_id.to_string())
        .execute(&mut *tx)
        .await?;

    let order = order_repo::get_order_for_update(&mut tx, order_id)
        .await?
        .ok_or_else(|| ReconError::NotFound(format!("order {order_id}")))?;

    if !order.order_status.can_transition_to(&new) {
        return Err(ReconError::InvalidStatusTransition(format!(
            "{} → {}",
            order.order_status, new
        )));
    }

    order_repo::set_order_status(&mut tx, order_id, new).await?;
    tx.commit().await?;

    tracing::info!(order_id = %order_id, from = %order.order_status, to = %new, "order status updated");

    order_repo::get_order(pool, order_id)
        .await?
        .ok_or_else(|| ReconError::NotFound(format!("order {order_id}")))
}
