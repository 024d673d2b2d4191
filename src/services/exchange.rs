use {
    crate::domain::error::ReconError,
    crate::domain::exchange::{
        CustomerDetails, ExchangeDecision, ExchangeRequest, NewExchangeRequest, eligibility,
    },
    crate::infra::postgres::{exchange_repo, order_repo},
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    uuid::Uuid,
};

/// Open an exchange request against a delivered order. `now` is passed in so
/// eligibility is evaluated exactly once per call, on one clock reading.
pub async fn create_exchange_request(
    pool: &PgPool,
    order_id: Uuid,
    customer: CustomerDetails,
    reason: String,
    now: DateTime<Utc>,
) -> Result<ExchangeRequest, ReconError> {
    let order = order_repo::get_order(pool, order_id)
        .await?
        .ok_or_else(|| ReconError::NotFound(format!("order {order_id}")))?;

    let verdict = eligibility(order.order_status, order.delivered_at, now);
    if !verdict.can_apply {
        return Err(ReconError::NotEligible(verdict.reason));
    }

    let request = NewExchangeRequest::new(order_id, customer, reason)?;
    if !exchange_repo::insert_request(pool, &request).await? {
        return Err(ReconError::DuplicateRequest(order_id));
    }

    tracing::info!(order_id = %order_id, request_id = %request.id(), "exchange request opened");

    exchange_repo::get_request(pool, request.id())
        .await?
        .ok_or_else(|| ReconError::NotFound(format!("exchange request {}", request.id())))
}

/// Admin accept/reject. The Pending → decided move is a compare-and-swap in
/// the store, so it happens exactly once no matter how many admins click.
pub async fn decide_exchange_request(
    pool: &PgPool,
    request_id: Uuid,
    decision: ExchangeDecision,
) -> Result<ExchangeRequest, ReconError> {
    match exchange_repo::decide_request(pool, request_id, decision.status()).await? {
        Some(updated) => {
            tracing::info!(request_id = %request_id, status = %updated.status, "exchange request decided");
            Ok(updated)
        }
        None => match exchange_repo::get_request(pool, request_id).await? {
            Some(_) => Err(ReconError::AlreadyDecided(request_id)),
            None => Err(ReconError::NotFound(format!(
                "exchange request {request_id}"
            ))),
        },
    }
}
