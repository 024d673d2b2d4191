use {
    crate::domain::catalog::CatalogReader,
    crate::domain::error::ReconError,
    crate::domain::gateway::PaymentGateway,
    crate::domain::id::{IntentId, PaymentId},
    crate::domain::money::{Currency, Money, MoneyAmount},
    crate::domain::order::{Address, NewOrder, NewOrderParams, Order, PaymentState},
    crate::infra::postgres::order_repo,
    crate::services::pricing::{self, PricingPolicy, ProposedLine},
    crate::services::signature,
    serde::Serialize,
    sqlx::PgPool,
    uuid::Uuid,
};

/// What the client needs to open the gateway's hosted checkout.
#[derive(Debug, Serialize)]
pub struct IssuedIntent {
    pub intent_id: IntentId,
    pub amount: MoneyAmount,
    pub currency: Currency,
    pub key_id: String,
}

/// Price the cart and create a gateway-side intent for the total.
/// Deliberately stateless on our side: an abandoned checkout leaves no
/// pending order row behind, and re-issuing is always safe.
pub async fn issue_intent(
    gateway: &dyn PaymentGateway,
    catalog: &dyn CatalogReader,
    policy: &PricingPolicy,
    lines: &[ProposedLine],
    key_id: &str,
) -> Result<IssuedIntent, ReconError> {
    let priced = pricing::price_order(catalog, lines, policy).await?;
    let receipt = format!("rcpt_{}", Uuid::now_v7().simple());
    let created = gateway
        .create_intent(Money::new(priced.total_price, priced.currency), &receipt)
        .await?;

    Ok(IssuedIntent {
        intent_id: created.intent_id,
        amount: created.money.amount(),
        currency: created.money.currency(),
        key_id: key_id.to_string(),
    })
}

/// The completion triple the browser reports back from the hosted checkout.
#[derive(Debug, Clone)]
pub struct PaymentClaim {
    pub intent_id: IntentId,
    pub payment_id: PaymentId,
    pub signature: String,
}

#[derive(Debug)]
pub struct CheckoutPayload {
    pub user_id: Uuid,
    pub lines: Vec<ProposedLine>,
    pub shipping_info: Address,
    pub billing_info: Option<Address>,
}

/// Verify the gateway's confirmation and materialize the order.
///
/// Signature first: a mismatch creates nothing. Then the cart is repriced
/// against the catalog as it is now — prices and stock may have moved since
/// intent issuance. The insert and the `processing → paid` transition commit
/// together under the intent's advisory lock, so racing the webhook writer
/// (or a double submit) converges on one paid order.
pub async fn verify_and_record(
    pool: &PgPool,
    catalog: &dyn CatalogReader,
    policy: &PricingPolicy,
    key_secret: &str,
    claim: &PaymentClaim,
    payload: CheckoutPayload,
) -> Result<Order, ReconError> {
    if let Err(e) = signature::verify_checkout_signature(
        key_secret,
        &claim.intent_id,
        &claim.payment_id,
        &claim.signature,
    ) {
        tracing::warn!(
            intent_id = %claim.intent_id,
            payment_id = %claim.payment_id,
            "checkout signature rejected"
        );
        return Err(e);
    }

    let priced = pricing::price_order(catalog, &payload.lines, policy).await?;

    let mut tx = pool.begin().await?;

    sqlx::query("SET LOCAL lock_timeout = '5s'")
        .execute(&mut *tx)
        .await?;

    // Serialize all writers of this intent's order.
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(claim.intent_id.as_str())
        .execute(&mut *tx)
        .await?;

    if let Some(existing) = order_repo::find_by_intent(&mut tx, &claim.intent_id).await? {
        tx.commit().await?;
        tracing::info!(
            order_id = %existing.id,
            intent_id = %claim.intent_id,
            "order already recorded for this intent"
        );
        return Ok(existing);
    }

    let order = NewOrder::new(NewOrderParams {
        user_id: payload.user_id,
        items: priced.items,
        items_price: priced.items_price,
        shipping_price: priced.shipping_price,
        gift_wrap_price: priced.gift_wrap_price,
        total_price: priced.total_price,
        currency: priced.currency,
        shipping_info: payload.shipping_info,
        billing_info: payload.billing_info,
        intent_id: claim.intent_id.clone(),
    })?;

    order_repo::insert_order(&mut tx, &order).await?;
    order_repo::set_payment_state(
        &mut tx,
        order.id(),
        PaymentState::Paid,
        Some(&claim.payment_id),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        order_id = %order.id(),
        intent_id = %claim.intent_id,
        total = %order.total_price(),
        "order recorded and marked paid"
    );

    order_repo::get_order(pool, order.id())
        .await?
        .ok_or_else(|| ReconError::NotFound(format!("order {}", order.id())))
}
