//! Payment gateway
//!
//! The external payment service behind card checkout, reduced to its two-call contract:
//! create an intent for the amount due, then confirm it. Everything else about the provider
//! is opaque to the storefront.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkout::ShippingInfo;

pub mod http;
pub mod simulator;

pub use http::{GatewayConfig, HttpPaymentGateway};
pub use simulator::SimulatedGateway;

/// Errors reaching or understanding the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The HTTP round trip failed.
    #[error("gateway request failed")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with something other than the documented shape.
    #[error("unexpected gateway response: {0}")]
    UnexpectedResponse(String),
}

/// Customer details attached to a payment intent.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetails {
    /// Name as entered on the checkout form.
    pub name: String,

    /// Contact phone number.
    pub phone: String,
}

/// Request body for intent creation.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentIntentRequest {
    /// Amount due, in minor units of `currency`.
    pub amount: u64,

    /// ISO currency code, lowercase.
    pub currency: String,

    /// Customer details.
    pub customer: CustomerDetails,

    /// Delivery address for the order being paid.
    pub shipping_address: ShippingInfo,
}

/// An intent created by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Gateway-assigned intent id.
    pub id: String,

    /// Secret handed to the client-side confirmation widget.
    pub client_secret: String,

    /// Gateway-reported status string.
    pub status: String,
}

/// Result of confirming an intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// Whether the charge went through.
    pub success: bool,

    /// Gateway-provided failure message when `success` is false.
    #[serde(default)]
    pub error: Option<String>,
}

/// The two-call payment gateway contract.
#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for the amount due.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the gateway cannot be reached or answers with an
    /// unexpected shape.
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, GatewayError>;

    /// Confirm a previously created intent.
    ///
    /// A declined charge is not an error: it comes back as a confirmation with
    /// `success: false` and the gateway's message.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the gateway cannot be reached or answers with an
    /// unexpected shape.
    async fn confirm_payment(&self, intent_id: &str) -> Result<PaymentConfirmation, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_error_field_is_optional_in_wire_format() {
        let confirmation: PaymentConfirmation =
            serde_json::from_str(r#"{"success": true}"#).expect("should deserialize");

        assert!(confirmation.success);
        assert!(confirmation.error.is_none());
    }

    #[test]
    fn declined_confirmation_carries_the_message() {
        let confirmation: PaymentConfirmation =
            serde_json::from_str(r#"{"success": false, "error": "card declined"}"#)
                .expect("should deserialize");

        assert!(!confirmation.success);
        assert_eq!(confirmation.error.as_deref(), Some("card declined"));
    }
}
