//! HTTP payment gateway client.

use reqwest::Client;

use super::{GatewayError, PaymentConfirmation, PaymentIntent, PaymentIntentRequest};

/// Configuration for connecting to the payment provider.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Provider base address, e.g. `"https://api.payments.example"`.
    pub base_url: String,

    /// Secret API key sent as a bearer token.
    pub api_key: String,
}

/// HTTP client for the payment provider.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    config: GatewayConfig,
    http: Client,
}

impl HttpPaymentGateway {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl super::PaymentGateway for HttpPaymentGateway {
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, GatewayError> {
        let url = format!("{}/v1/payment_intents", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(format!(
                "intent creation failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }

    async fn confirm_payment(&self, intent_id: &str) -> Result<PaymentConfirmation, GatewayError> {
        let url = format!(
            "{}/v1/payment_intents/{intent_id}/confirm",
            self.config.base_url
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(format!(
                "confirmation failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}
