//! Simulated payment gateway.
//!
//! Stands in for the provider in demos and local environments. Confirmation declines with a
//! configurable probability; tests that need exact behavior use a mock or a rate of 0.0 or
//! 1.0 instead of relying on chance.

use uuid::Uuid;

use super::{GatewayError, PaymentConfirmation, PaymentIntent, PaymentIntentRequest};

/// In-process gateway with a configurable decline rate.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    decline_rate: f64,
}

impl SimulatedGateway {
    /// Create a simulator that declines the given fraction of confirmations.
    ///
    /// The rate is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn new(decline_rate: f64) -> Self {
        Self {
            decline_rate: decline_rate.clamp(0.0, 1.0),
        }
    }

    /// A simulator that always approves.
    #[must_use]
    pub fn always_approve() -> Self {
        Self::new(0.0)
    }

    /// A simulator that always declines.
    #[must_use]
    pub fn always_decline() -> Self {
        Self::new(1.0)
    }
}

#[async_trait::async_trait]
impl super::PaymentGateway for SimulatedGateway {
    async fn create_payment_intent(
        &self,
        _request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, GatewayError> {
        let id = format!("pi_{}", Uuid::now_v7().simple());
        let client_secret = format!("{id}_secret_{}", Uuid::now_v7().simple());

        Ok(PaymentIntent {
            id,
            client_secret,
            status: "requires_confirmation".to_string(),
        })
    }

    async fn confirm_payment(&self, _intent_id: &str) -> Result<PaymentConfirmation, GatewayError> {
        if rand::random::<f64>() < self.decline_rate {
            return Ok(PaymentConfirmation {
                success: false,
                error: Some("Your card was declined.".to_string()),
            });
        }

        Ok(PaymentConfirmation {
            success: true,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        checkout::ShippingInfo,
        gateway::{CustomerDetails, PaymentGateway},
    };

    use super::*;

    fn request() -> PaymentIntentRequest {
        PaymentIntentRequest {
            amount: 126_000,
            currency: "idr".to_string(),
            customer: CustomerDetails {
                name: "Ayu Lestari".to_string(),
                phone: "+62 812 0000 0000".to_string(),
            },
            shipping_address: ShippingInfo {
                name: "Ayu Lestari".to_string(),
                phone: "+62 812 0000 0000".to_string(),
                address: "Jl. Kebon Jeruk No. 7".to_string(),
                city: "Jakarta".to_string(),
                postal_code: "11530".to_string(),
                province: "DKI Jakarta".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn intents_get_unique_ids() {
        let gateway = SimulatedGateway::always_approve();

        let first = gateway.create_payment_intent(request()).await.expect("ok");
        let second = gateway.create_payment_intent(request()).await.expect("ok");

        assert_ne!(first.id, second.id);
        assert_eq!(first.status, "requires_confirmation");
    }

    #[tokio::test]
    async fn zero_rate_always_approves() {
        let gateway = SimulatedGateway::always_approve();

        let confirmation = gateway.confirm_payment("pi_test").await.expect("ok");

        assert!(confirmation.success);
        assert!(confirmation.error.is_none());
    }

    #[tokio::test]
    async fn full_rate_always_declines_with_a_message() {
        let gateway = SimulatedGateway::always_decline();

        let confirmation = gateway.confirm_payment("pi_test").await.expect("ok");

        assert!(!confirmation.success);
        assert!(confirmation.error.is_some());
    }

    #[test]
    fn rate_is_clamped() {
        assert!((SimulatedGateway::new(7.0).decline_rate - 1.0).abs() < f64::EPSILON);
        assert!(SimulatedGateway::new(-1.0).decline_rate.abs() < f64::EPSILON);
    }
}
