use {
    super::error::ReconError,
    super::order::OrderStatus,
    chrono::{DateTime, Duration, Utc},
    serde::{Deserialize, Serialize},
    std::fmt,
    uuid::Uuid,
};

/// Days after delivery during which an exchange may be requested.
pub const EXCHANGE_WINDOW_DAYS: i64 = 3;

pub const MIN_REASON_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeStatus {
    Pending,
    #[serde(rename = "Exchange Accepted")]
    Accepted,
    #[serde(rename = "Exchange Rejected")]
    Rejected,
}

impl ExchangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Exchange Accepted",
            Self::Rejected => "Exchange Rejected",
        }
    }
}

impl fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ExchangeStatus {
    type Error = ReconError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Exchange Accepted" => Ok(Self::Accepted),
            "Exchange Rejected" => Ok(Self::Rejected),
            other => Err(ReconError::Validation(format!(
                "unknown exchange status: {other}"
            ))),
        }
    }
}

/// Admin verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeDecision {
    Accepted,
    Rejected,
}

impl ExchangeDecision {
    pub fn status(&self) -> ExchangeStatus {
        match self {
            Self::Accepted => ExchangeStatus::Accepted,
            Self::Rejected => ExchangeStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    pub can_apply: bool,
    pub deadline: Option<DateTime<Utc>>,
    pub reason: String,
}

/// Whether a delivered order may still be exchanged at `now`.
/// Deterministic and side-effect-free: identical inputs yield identical
/// results on every evaluation.
pub fn eligibility(
    order_status: OrderStatus,
    delivered_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Eligibility {
    if order_status != OrderStatus::Delivered {
        return Eligibility {
            can_apply: false,
            deadline: None,
            reason: "exchange is available only after delivery".into(),
        };
    }

    let Some(delivered) = delivered_at else {
        return Eligibility {
            can_apply: false,
            deadline: None,
            reason: "exchange is currently unavailable".into(),
        };
    };

    let deadline = delivered + Duration::days(EXCHANGE_WINDOW_DAYS);
    if now > deadline {
        Eligibility {
            can_apply: false,
            deadline: Some(deadline),
            reason: format!(
                "exchange window closed on {}",
                deadline.format("%Y-%m-%d %H:%M UTC")
            ),
        }
    } else {
        Eligibility {
            can_apply: true,
            deadline: Some(deadline),
            reason: format!(
                "exchange available until {}",
                deadline.format("%Y-%m-%d %H:%M UTC")
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub address: String,
    pub mobile: String,
}

impl CustomerDetails {
    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::Validation("name must not be empty".into()));
        }
        if !self.email.contains('@') {
            return Err(ReconError::Validation(format!(
                "malformed email: {}",
                self.email
            )));
        }
        if self.address.trim().is_empty() {
            return Err(ReconError::Validation("address must not be empty".into()));
        }
        if self.mobile.len() != 10 || !self.mobile.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ReconError::Validation(
                "mobile must be a 10-digit number".into(),
            ));
        }
        Ok(())
    }
}

pub fn validate_reason(reason: &str) -> Result<(), ReconError> {
    if reason.trim().chars().count() < MIN_REASON_LEN {
        return Err(ReconError::Validation(format!(
            "reason must be at least {MIN_REASON_LEN} characters"
        )));
    }
    Ok(())
}

/// For INSERT — id generated in Rust via Uuid::now_v7().
#[derive(Debug)]
pub struct NewExchangeRequest {
    id: Uuid,
    order_id: Uuid,
    customer: CustomerDetails,
    reason: String,
}

impl NewExchangeRequest {
    pub fn new(
        order_id: Uuid,
        customer: CustomerDetails,
        reason: String,
    ) -> Result<Self, ReconError> {
        customer.validate()?;
        validate_reason(&reason)?;
        Ok(Self {
            id: Uuid::now_v7(),
            order_id,
            customer,
            reason,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Full exchange request record from the store (for reads).
#[derive(Debug, Clone, Serialize)]
pub struct ExchangeRequest {
    pub id: Uuid,
    pub order_id: Uuid,
    pub customer: CustomerDetails,
    pub reason: String,
    pub status: ExchangeStatus,
    pub created_at: DateTime<Utc>,
    pub decision_at: Option<DateTime<Utc>>,
}
