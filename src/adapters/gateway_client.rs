use {
    crate::domain::{
        error::ReconError,
        gateway::{CreatedIntent, PaymentGateway},
        id::IntentId,
        money::{Currency, Money, MoneyAmount},
    },
    serde::{Deserialize, Serialize},
    std::{future::Future, pin::Pin, time::Duration},
};

const GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client for the gateway's "create order" API. Every call is bounded
/// by `GATEWAY_TIMEOUT`; a timeout or transport error surfaces as
/// `GatewayUnavailable` and the caller simply re-issues the intent.
pub struct RestGateway {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

#[derive(Serialize)]
struct CreateIntentBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Deserialize)]
struct IntentResponse {
    id: String,
    amount: i64,
    currency: String,
}

impl RestGateway {
    pub fn new(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
    ) -> Result<Self, ReconError> {
        let http = reqwest::Client::builder()
            .timeout(GATEWAY_TIMEOUT)
            .build()
            .map_err(|e| ReconError::GatewayUnavailable(format!("http client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        })
    }

    async fn create_intent_inner(
        &self,
        money: Money,
        receipt: &str,
    ) -> Result<CreatedIntent, ReconError> {
        let body = CreateIntentBody {
            amount: money.amount().minor(),
            currency: money.currency().as_str(),
            receipt,
        };

        let response = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| ReconError::GatewayUnavailable(format!("create intent: {e}")))?;

        if !response.status().is_success() {
            return Err(ReconError::GatewayUnavailable(format!(
                "create intent: HTTP {}",
                response.status()
            )));
        }

        let parsed: IntentResponse = response
            .json()
            .await
            .map_err(|e| ReconError::GatewayUnavailable(format!("create intent body: {e}")))?;

        Ok(CreatedIntent {
            intent_id: IntentId::new(parsed.id)?,
            money: Money::new(
                MoneyAmount::new(parsed.amount)?,
                Currency::try_from(parsed.currency.as_str())?,
            ),
        })
    }
}

impl PaymentGateway for RestGateway {
    fn create_intent(
        &self,
        money: Money,
        receipt: &str,
    ) -> Pin<Box<dyn Future<Output = Result<CreatedIntent, ReconError>> + Send + '_>> {
        let receipt = receipt.to_string();
        Box::pin(async move { self.create_intent_inner(money, &receipt).await })
    }
}
