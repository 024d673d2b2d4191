use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::error::ReconError;

/// Gateway-side payment intent identifier (`order_xxx`).
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentId(String);

impl IntentId {
    pub fn new(id: impl Into<String>) -> Result<Self, ReconError> {
        let id = id.into();
        if !id.starts_with("order_") {
            return Err(ReconError::Validation(format!(
                "IntentId must start with order_, got: {id}"
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Gateway-side payment identifier (`pay_xxx`), assigned when the customer
/// completes the hosted checkout.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

impl PaymentId {
    pub fn new(id: impl Into<String>) -> Result<Self, ReconError> {
        let id = id.into();
        if !id.starts_with("pay_") {
            return Err(ReconError::Validation(format!(
                "PaymentId must start with pay_, got: {id}"
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
