use {
    super::error::ReconError,
    super::id::{IntentId, PaymentId},
    super::order::PaymentState,
    serde::Deserialize,
    std::fmt,
    uuid::Uuid,
};

pub const EVENT_PAYMENT_CAPTURED: &str = "payment.captured";
pub const EVENT_PAYMENT_FAILED: &str = "payment.failed";

/// Final disposition of a webhook delivery, recorded on its ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Processed,
    Ignored,
    Failed,
}

impl WebhookOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Ignored => "ignored",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for WebhookOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for WebhookOutcome {
    type Error = ReconError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "processed" => Ok(Self::Processed),
            "ignored" => Ok(Self::Ignored),
            "failed" => Ok(Self::Failed),
            other => Err(ReconError::Validation(format!(
                "unknown webhook outcome: {other}"
            ))),
        }
    }
}

// Gateway envelope: `{"event": "...", "payload": {"payment": {"entity": {...}}}}`.
#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    payload: EnvelopePayload,
}

#[derive(Debug, Deserialize)]
struct EnvelopePayload {
    payment: Option<PaymentEnvelope>,
}

#[derive(Debug, Deserialize)]
struct PaymentEnvelope {
    entity: PaymentEntity,
}

#[derive(Debug, Deserialize)]
struct PaymentEntity {
    id: String,
    order_id: Option<String>,
}

/// A parsed, delivery-signature-verified gateway notification.
#[derive(Debug, Clone)]
pub struct GatewayEvent {
    pub event_type: String,
    pub payment_id: PaymentId,
    pub intent_id: Option<IntentId>,
    /// Gateway event id from the delivery header, when the gateway sends one.
    pub event_id: Option<String>,
    pub payload: serde_json::Value,
}

impl GatewayEvent {
    /// Parse the raw body. `event_id` comes from the delivery header, not the
    /// payload, so redeliveries of the same event carry the same value.
    pub fn parse(body: &str, event_id: Option<String>) -> Result<Self, ReconError> {
        let envelope: Envelope = serde_json::from_str(body)?;
        let payment = envelope.payload.payment.ok_or_else(|| {
            ReconError::Validation(format!(
                "event {} carries no payment entity",
                envelope.event
            ))
        })?;

        let payment_id = PaymentId::new(payment.entity.id)?;
        let intent_id = payment
            .entity
            .order_id
            .map(IntentId::new)
            .transpose()?;
        let payload: serde_json::Value = serde_json::from_str(body)?;

        Ok(Self {
            event_type: envelope.event,
            payment_id,
            intent_id,
            event_id,
            payload,
        })
    }

    /// Deterministic identity of this delivery — derived from event content,
    /// never from arrival time. Redeliveries map to the same key.
    pub fn dedupe_key(&self) -> String {
        match &self.event_id {
            Some(id) => id.clone(),
            None => format!("{}:{}", self.event_type, self.payment_id),
        }
    }
}

/// What a genuinely new event should do to the matching order, decided
/// purely from the event type and the order's current payment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    MarkPaid,
    MarkFailed,
    /// Payment already in a terminal state — record for audit, no side effect.
    AlreadySettled(PaymentState),
    /// No order with this intent id — record for audit, no side effect.
    UnknownOrder,
    /// Event type this handler does not act on.
    UnhandledEvent,
}

pub fn reconcile(event_type: &str, payment_state: Option<PaymentState>) -> Reconciliation {
    match (event_type, payment_state) {
        (_, None) => Reconciliation::UnknownOrder,
        (EVENT_PAYMENT_CAPTURED, Some(PaymentState::Processing)) => Reconciliation::MarkPaid,
        (EVENT_PAYMENT_FAILED, Some(PaymentState::Processing)) => Reconciliation::MarkFailed,
        (EVENT_PAYMENT_CAPTURED | EVENT_PAYMENT_FAILED, Some(state)) => {
            Reconciliation::AlreadySettled(state)
        }
        (_, Some(_)) => Reconciliation::UnhandledEvent,
    }
}

impl Reconciliation {
    pub fn outcome(&self) -> WebhookOutcome {
        match self {
            Self::MarkPaid | Self::MarkFailed => WebhookOutcome::Processed,
            Self::AlreadySettled(_) | Self::UnknownOrder | Self::UnhandledEvent => {
                WebhookOutcome::Ignored
            }
        }
    }

    pub fn note(&self) -> String {
        match self {
            Self::MarkPaid => "payment marked paid".into(),
            Self::MarkFailed => "payment marked failed".into(),
            Self::AlreadySettled(state) => format!("payment already {state}"),
            Self::UnknownOrder => "no order matches this intent".into(),
            Self::UnhandledEvent => "event type not handled".into(),
        }
    }

    /// The payment transition to apply, if any.
    pub fn new_state(&self) -> Option<PaymentState> {
        match self {
            Self::MarkPaid => Some(PaymentState::Paid),
            Self::MarkFailed => Some(PaymentState::Failed),
            _ => None,
        }
    }
}

/// For INSERT into the append-only webhook ledger.
#[derive(Debug)]
pub struct NewWebhookEvent {
    pub id: Uuid,
    pub dedupe_key: String,
    pub event_type: String,
    pub payment_id: PaymentId,
    pub intent_id: Option<IntentId>,
    pub status: WebhookOutcome,
    pub note: String,
    pub payload: serde_json::Value,
}

impl NewWebhookEvent {
    pub fn from_event(event: &GatewayEvent, decision: &Reconciliation) -> Self {
        Self {
            id: Uuid::now_v7(),
            dedupe_key: event.dedupe_key(),
            event_type: event.event_type.clone(),
            payment_id: event.payment_id.clone(),
            intent_id: event.intent_id.clone(),
            status: decision.outcome(),
            note: decision.note(),
            payload: event.payload.clone(),
        }
    }
}

/// Result of pushing one delivery through the pipeline.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// New event, side effect applied to this order.
    Processed(Uuid),
    /// New event, recorded but deliberately without side effects.
    Ignored,
    /// Dedupe key already present — redelivery, nothing done.
    Duplicate,
}
