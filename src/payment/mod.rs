//! Payment processor bridge (REST, no SDK).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// `amount` is in minor currency units (cents).
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent>;
}

/// Decimal amount to minor units, rounding half away from zero.
/// `None` for anything that is not a positive, finite amount of at least one unit.
pub fn to_minor_units(amount: f64) -> Option<i64> {
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }

    let units = (amount * 100.0).round();
    if units < 1.0 || units > i64::MAX as f64 {
        return None;
    }
    Some(units as i64)
}

pub struct StripeGateway {
    client: Client,
    api_base: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent> {
        let amount = amount.to_string();
        debug!(amount = %amount, currency, "Requesting payment intent");

        let resp = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[
                ("amount", amount.as_str()),
                ("currency", currency),
                ("payment_method_types[]", "card"),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body: serde_json::Value = resp.json().await?;

        if !status.is_success() {
            let message = body["error"]["message"].as_str().unwrap_or("unknown error");
            error!(status = %status, message, "Payment intent rejected");
            return Err(ApiError::Payment(format!("{status}: {message}")));
        }

        serde_json::from_value(body)
            .map_err(|e| ApiError::Payment(format!("unexpected payment intent body: {e}")))
    }
}
