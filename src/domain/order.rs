use {
    super::error::ReconError,
    super::id::{IntentId, PaymentId},
    super::money::{Currency, MoneyAmount},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::fmt,
    uuid::Uuid,
};

/// Payment lifecycle. `paid` and `failed` are terminal — the webhook and
/// checkout writers both refuse to move an order out of either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Processing,
    Paid,
    Failed,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Failed)
    }

    pub fn can_transition_to(&self, new: &PaymentState) -> bool {
        matches!(
            (self, new),
            (PaymentState::Processing, PaymentState::Paid)
                | (PaymentState::Processing, PaymentState::Failed)
        )
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for PaymentState {
    type Error = ReconError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "processing" => Ok(Self::Processing),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(ReconError::Validation(format!(
                "unknown payment state: {other}"
            ))),
        }
    }
}

/// Fulfillment lifecycle, admin-driven and forward-only.
/// `Cancelled` is reachable from `Processing` and `Shipped` only;
/// `Delivered` and `Cancelled` accept no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn can_transition_to(&self, new: &OrderStatus) -> bool {
        matches!(
            (self, new),
            (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
                | (OrderStatus::Processing, OrderStatus::Cancelled)
                | (OrderStatus::Shipped, OrderStatus::Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = ReconError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(ReconError::Validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// One priced line of an order. Name, price and image are snapshots taken
/// from the catalog at verification time, not references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub name: String,
    pub unit_price: MoneyAmount,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
    pub gift_wrap: bool,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub phone: String,
}

/// Full order record from the store (for reads).
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<OrderItem>,
    pub items_price: MoneyAmount,
    pub shipping_price: MoneyAmount,
    pub gift_wrap_price: MoneyAmount,
    pub total_price: MoneyAmount,
    pub currency: Currency,
    pub shipping_info: Address,
    pub billing_info: Option<Address>,
    pub intent_id: IntentId,
    pub payment_id: Option<PaymentId>,
    pub payment_status: PaymentState,
    pub order_status: OrderStatus,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewOrderParams {
    pub user_id: Uuid,
    pub items: Vec<OrderItem>,
    pub items_price: MoneyAmount,
    pub shipping_price: MoneyAmount,
    pub gift_wrap_price: MoneyAmount,
    pub total_price: MoneyAmount,
    pub currency: Currency,
    pub shipping_info: Address,
    pub billing_info: Option<Address>,
    pub intent_id: IntentId,
}

/// For INSERT — id generated in Rust via Uuid::now_v7(). Construction
/// re-checks the pricing identity so a mispriced order can never reach the
/// store.
#[derive(Debug)]
pub struct NewOrder {
    id: Uuid,
    params: NewOrderParams,
}

impl NewOrder {
    pub fn new(params: NewOrderParams) -> Result<Self, ReconError> {
        if params.items.is_empty() {
            return Err(ReconError::InvalidOrder("order has no items".into()));
        }

        let expected = params
            .items_price
            .checked_add(params.shipping_price)
            .and_then(|sum| sum.checked_add(params.gift_wrap_price))
            .ok_or_else(|| ReconError::InvalidOrder("order total overflows".into()))?;
        if expected != params.total_price {
            return Err(ReconError::InvalidOrder(format!(
                "total {} does not equal items {} + shipping {} + gift wrap {}",
                params.total_price,
                params.items_price,
                params.shipping_price,
                params.gift_wrap_price
            )));
        }

        Ok(Self {
            id: Uuid::now_v7(),
            params,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.params.user_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.params.items
    }

    pub fn items_price(&self) -> MoneyAmount {
        self.params.items_price
    }

    pub fn shipping_price(&self) -> MoneyAmount {
        self.params.shipping_price
    }

    pub fn gift_wrap_price(&self) -> MoneyAmount {
        self.params.gift_wrap_price
    }

    pub fn total_price(&self) -> MoneyAmount {
        self.params.total_price
    }

    pub fn currency(&self) -> Currency {
        self.params.currency
    }

    pub fn shipping_info(&self) -> &Address {
        &self.params.shipping_info
    }

    pub fn billing_info(&self) -> Option<&Address> {
        self.params.billing_info.as_ref()
    }

    pub fn intent_id(&self) -> &IntentId {
        &self.params.intent_id
    }
}
