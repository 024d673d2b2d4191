use {
    crate::domain::catalog::CatalogReader,
    crate::domain::error::ReconError,
    crate::domain::money::{Currency, MoneyAmount},
    crate::domain::order::OrderItem,
    serde::Deserialize,
    std::collections::HashMap,
    uuid::Uuid,
};

/// What the client is allowed to say about a line: which product, how many,
/// and the variant selection. Never a price.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposedLine {
    pub product_id: Uuid,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub gift_wrap: bool,
}

/// Server-side pricing constants, in minor units.
#[derive(Debug, Clone)]
pub struct PricingPolicy {
    pub shipping_fee: MoneyAmount,
    /// Orders whose items total reaches this ship free.
    pub free_shipping_threshold: MoneyAmount,
    /// Charged per gift-wrapped unit.
    pub gift_wrap_fee: MoneyAmount,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            shipping_fee: MoneyAmount::from_minor(4_900),
            free_shipping_threshold: MoneyAmount::from_minor(99_900),
            gift_wrap_fee: MoneyAmount::from_minor(3_000),
        }
    }
}

/// A normalized, repriced order: snapshots plus aggregate totals, all from
/// catalog state.
#[derive(Debug, Clone)]
pub struct PricedOrder {
    pub items: Vec<OrderItem>,
    pub items_price: MoneyAmount,
    pub shipping_price: MoneyAmount,
    pub gift_wrap_price: MoneyAmount,
    pub total_price: MoneyAmount,
    pub currency: Currency,
}

fn overflow() -> ReconError {
    ReconError::InvalidOrder("order total overflows".into())
}

/// Reprice a proposed cart against the catalog. Pure computation over a
/// catalog read — stock is checked but not decremented here.
pub async fn price_order(
    catalog: &dyn CatalogReader,
    lines: &[ProposedLine],
    policy: &PricingPolicy,
) -> Result<PricedOrder, ReconError> {
    if lines.is_empty() {
        return Err(ReconError::InvalidOrder("order has no items".into()));
    }

    let mut requested: HashMap<Uuid, u64> = HashMap::new();
    for line in lines {
        if line.quantity == 0 {
            return Err(ReconError::InvalidOrder(format!(
                "quantity for product {} must be at least 1",
                line.product_id
            )));
        }
        *requested.entry(line.product_id).or_default() += u64::from(line.quantity);
    }

    let ids: Vec<Uuid> = requested.keys().copied().collect();
    let found = catalog.fetch(&ids).await?;
    let by_id: HashMap<Uuid, _> = found.into_iter().map(|item| (item.id, item)).collect();

    // Stock is checked per product across all lines, since the same product
    // may appear on several lines with different variants.
    for (product_id, quantity) in &requested {
        let item = by_id.get(product_id).ok_or_else(|| {
            ReconError::InvalidOrder(format!("unknown product: {product_id}"))
        })?;
        if *quantity > u64::from(item.stock) {
            return Err(ReconError::InvalidOrder(format!(
                "insufficient stock for {}: requested {}, available {}",
                item.name, quantity, item.stock
            )));
        }
    }

    let mut currency: Option<Currency> = None;
    let mut items = Vec::with_capacity(lines.len());
    let mut items_price = MoneyAmount::ZERO;
    let mut gift_wrap_price = MoneyAmount::ZERO;

    for line in lines {
        let item = &by_id[&line.product_id];
        match currency {
            None => currency = Some(item.currency),
            Some(c) if c == item.currency => {}
            Some(c) => {
                return Err(ReconError::InvalidOrder(format!(
                    "mixed currencies in one order: {} and {}",
                    c, item.currency
                )));
            }
        }

        let line_total = item
            .unit_price
            .checked_mul(line.quantity)
            .ok_or_else(overflow)?;
        items_price = items_price.checked_add(line_total).ok_or_else(overflow)?;

        if line.gift_wrap {
            let wrap = policy
                .gift_wrap_fee
                .checked_mul(line.quantity)
                .ok_or_else(overflow)?;
            gift_wrap_price = gift_wrap_price.checked_add(wrap).ok_or_else(overflow)?;
        }

        items.push(OrderItem {
            product_id: item.id,
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: line.quantity,
            size: line.size.clone(),
            color: line.color.clone(),
            gift_wrap: line.gift_wrap,
            image_url: item.image_url.clone(),
        });
    }

    let shipping_price = if items_price.minor() >= policy.free_shipping_threshold.minor() {
        MoneyAmount::ZERO
    } else {
        policy.shipping_fee
    };

    let total_price = items_price
        .checked_add(shipping_price)
        .and_then(|sum| sum.checked_add(gift_wrap_price))
        .ok_or_else(overflow)?;

    Ok(PricedOrder {
        items,
        items_price,
        shipping_price,
        gift_wrap_price,
        total_price,
        currency: currency.ok_or_else(|| ReconError::InvalidOrder("order has no items".into()))?,
    })
}
