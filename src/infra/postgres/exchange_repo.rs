use {
    crate::domain::error::ReconError,
    crate::domain::exchange::{
        CustomerDetails, ExchangeRequest, ExchangeStatus, NewExchangeRequest,
    },
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    uuid::Uuid,
};

#[derive(sqlx::FromRow)]
struct ExchangeRow {
    id: Uuid,
    order_id: Uuid,
    customer_name: String,
    email: String,
    address: String,
    mobile: String,
    reason: String,
    status: String,
    created_at: DateTime<Utc>,
    decision_at: Option<DateTime<Utc>>,
}

const EXCHANGE_COLUMNS: &str = "id, order_id, customer_name, email, address, mobile, reason, \
     status, created_at, decision_at";

impl ExchangeRow {
    fn into_request(self) -> Result<ExchangeRequest, ReconError> {
        Ok(ExchangeRequest {
            id: self.id,
            order_id: self.order_id,
            customer: CustomerDetails {
                name: self.customer_name,
                email: self.email,
                address: self.address,
                mobile: self.mobile,
            },
            reason: self.reason,
            status: ExchangeStatus::try_from(self.status.as_str())?,
            created_at: self.created_at,
            decision_at: self.decision_at,
        })
    }
}

/// Returns `false` when an exchange request already exists for the order —
/// enforced by the unique index on `order_id`, not by a prior read.
pub async fn insert_request(
    pool: &PgPool,
    request: &NewExchangeRequest,
) -> Result<bool, ReconError> {
    let inserted: Option<bool> = sqlx::query_scalar(
        r#"
        INSERT INTO exchange_requests
            (id, order_id, customer_name, email, address, mobile, reason, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'Pending')
        ON CONFLICT (order_id) DO NOTHING
        RETURNING true
        "#,
    )
    .bind(request.id())
    .bind(request.order_id())
    .bind(&request.customer().name)
    .bind(&request.customer().email)
    .bind(&request.customer().address)
    .bind(&request.customer().mobile)
    .bind(request.reason())
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

pub async fn get_request(pool: &PgPool, id: Uuid) -> Result<Option<ExchangeRequest>, ReconError> {
    let row = sqlx::query_as::<_, ExchangeRow>(&format!(
        "SELECT {EXCHANGE_COLUMNS} FROM exchange_requests WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(ExchangeRow::into_request).transpose()
}

/// Compare-and-swap Pending → decided, stamping `decision_at`.
/// Returns the updated row, or `None` when the request was not Pending
/// (already decided, or raced with another admin).
pub async fn decide_request(
    pool: &PgPool,
    id: Uuid,
    status: ExchangeStatus,
) -> Result<Option<ExchangeRequest>, ReconError> {
    let row = sqlx::query_as::<_, ExchangeRow>(&format!(
        r#"
        UPDATE exchange_requests
        SET status = $2, decision_at = now()
        WHERE id = $1 AND status = 'Pending'
        RETURNING {EXCHANGE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(ExchangeRow::into_request).transpose()
}
