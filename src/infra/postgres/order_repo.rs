use {
    crate::domain::error::ReconError,
    crate::domain::id::{IntentId, PaymentId},
    crate::domain::money::Currency,
    crate::domain::order::{NewOrder, Order, OrderStatus, PaymentState},
    chrono::{DateTime, Utc},
    sqlx::{PgPool, Postgres, Transaction},
    uuid::Uuid,
};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    items: serde_json::Value,
    items_price: i64,
    shipping_price: i64,
    gift_wrap_price: i64,
    total_price: i64,
    currency: String,
    shipping_info: serde_json::Value,
    billing_info: Option<serde_json::Value>,
    intent_id: String,
    payment_id: Option<String>,
    payment_status: String,
    order_status: String,
    delivered_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const ORDER_COLUMNS: &str = "id, user_id, items, items_price, shipping_price, gift_wrap_price, \
     total_price, currency, shipping_info, billing_info, intent_id, payment_id, \
     payment_status, order_status, delivered_at, created_at, updated_at";

impl OrderRow {
    fn into_order(self) -> Result<Order, ReconError> {
        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            items: serde_json::from_value(self.items)?,
            items_price: crate::domain::money::MoneyAmount::new(self.items_price)?,
            shipping_price: crate::domain::money::MoneyAmount::new(self.shipping_price)?,
            gift_wrap_price: crate::domain::money::MoneyAmount::new(self.gift_wrap_price)?,
            total_price: crate::domain::money::MoneyAmount::new(self.total_price)?,
            currency: Currency::try_from(self.currency.as_str())?,
            shipping_info: serde_json::from_value(self.shipping_info)?,
            billing_info: self.billing_info.map(serde_json::from_value).transpose()?,
            intent_id: IntentId::new(self.intent_id)?,
            payment_id: self.payment_id.map(PaymentId::new).transpose()?,
            payment_status: PaymentState::try_from(self.payment_status.as_str())?,
            order_status: OrderStatus::try_from(self.order_status.as_str())?,
            delivered_at: self.delivered_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insert a freshly priced order. Payment starts at `processing`; the caller
/// applies the verified transition in the same transaction.
pub async fn insert_order(
    tx: &mut Transaction<'_, Postgres>,
    order: &NewOrder,
) -> Result<(), ReconError> {
    sqlx::query(
        r#"
        INSERT INTO orders
            (id, user_id, items, items_price, shipping_price, gift_wrap_price,
             total_price, currency, shipping_info, billing_info, intent_id,
             payment_status, order_status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'processing', 'Processing')
        "#,
    )
    .bind(order.id())
    .bind(order.user_id())
    .bind(serde_json::to_value(order.items())?)
    .bind(order.items_price().minor())
    .bind(order.shipping_price().minor())
    .bind(order.gift_wrap_price().minor())
    .bind(order.total_price().minor())
    .bind(order.currency().as_str())
    .bind(serde_json::to_value(order.shipping_info())?)
    .bind(
        order
            .billing_info()
            .map(serde_json::to_value)
            .transpose()?,
    )
    .bind(order.intent_id().as_str())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn get_order(pool: &PgPool, id: Uuid) -> Result<Option<Order>, ReconError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(OrderRow::into_order).transpose()
}

/// Read inside the transaction that holds the per-order advisory lock, so
/// the state seen here is the state the following write is validated against.
pub async fn get_order_for_update(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<Order>, ReconError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    row.map(OrderRow::into_order).transpose()
}

pub async fn find_by_intent(
    tx: &mut Transaction<'_, Postgres>,
    intent_id: &IntentId,
) -> Result<Option<Order>, ReconError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE intent_id = $1"
    ))
    .bind(intent_id.as_str())
    .fetch_optional(&mut **tx)
    .await?;

    row.map(OrderRow::into_order).transpose()
}

pub async fn set_payment_state(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    new: PaymentState,
    payment_id: Option<&PaymentId>,
) -> Result<(), ReconError> {
    sqlx::query(
        r#"
        UPDATE orders
        SET payment_status = $2,
            payment_id = COALESCE($3, payment_id),
            updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(new.as_str())
    .bind(payment_id.map(PaymentId::as_str))
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// `delivered_at` is stamped exactly once, on the transition into Delivered.
pub async fn set_order_status(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    new: OrderStatus,
) -> Result<(), ReconError> {
    sqlx::query(
        r#"
        UPDATE orders
        SET order_status = $2,
            delivered_at = CASE WHEN $2 = 'Delivered' THEN now() ELSE delivered_at END,
            updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(new.as_str())
    .execute(&mut **tx)
    .await?;

    Ok(())
}
