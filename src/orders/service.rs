//! Orders service
//!
//! The order builder and lifecycle manager. Submission is an attempted all-or-nothing
//! sequence: confirm payment (gateway methods only), reserve stock, insert the order, and on
//! any failure after the reservation put the stock back and leave the cart untouched. The
//! cart is cleared only once the order is safely stored.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;
use serde_json::json;
use tracing::{Span, info, warn};

use crate::{
    checkout::{Checkout, ShippingInfo},
    gateway::{CustomerDetails, PaymentGateway, PaymentIntentRequest},
    metrics::MetricsSink,
    pricing::Quote,
};

use super::{
    errors::{CheckoutError, OrdersServiceError},
    models::{CustomerId, Order, OrderId, OrderLine},
    number::OrderNumber,
    repository::{InventoryRepository, OrdersRepository},
    status::{Actor, OrderStatus, check_transition},
};

/// Order submission and lifecycle operations exposed to the UI layer.
#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Build and persist an order from the given checkout session.
    ///
    /// On success the checkout's cart is cleared and the stored order returned. On any
    /// failure the cart and all previously applied side effects are left as they were.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] describing the first failed precondition or step; see
    /// the variants for which are customer-correctable.
    async fn place_order(
        &self,
        customer: Option<CustomerId>,
        checkout: &mut Checkout,
        shipping_info: ShippingInfo,
    ) -> Result<Order, CheckoutError>;

    /// Apply a status transition to a stored order.
    ///
    /// Validates the transition against the order's current status and the acting role,
    /// then overwrites status and `updated_at` (last write wins).
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::Transition`] for illegal transitions (the stored
    /// order is untouched) and [`OrdersServiceError::NotFound`] for unknown ids.
    async fn transition_order(
        &self,
        id: OrderId,
        target: OrderStatus,
        actor: Actor,
    ) -> Result<Order, OrdersServiceError>;

    /// All orders placed by a customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::Storage`] on backend failure.
    async fn orders_for_customer(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<Order>, OrdersServiceError>;
}

/// [`CheckoutService`] over the storefront's ports.
#[derive(Clone)]
pub struct StorefrontCheckoutService {
    orders: Arc<dyn OrdersRepository>,
    inventory: Arc<dyn InventoryRepository>,
    gateway: Arc<dyn PaymentGateway>,
    metrics: Arc<dyn MetricsSink>,
}

impl fmt::Debug for StorefrontCheckoutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorefrontCheckoutService").finish_non_exhaustive()
    }
}

impl StorefrontCheckoutService {
    /// Wire the service to its collaborators.
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrdersRepository>,
        inventory: Arc<dyn InventoryRepository>,
        gateway: Arc<dyn PaymentGateway>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            orders,
            inventory,
            gateway,
            metrics,
        }
    }

    /// Run the create-intent/confirm round trip for gateway payment methods.
    async fn confirm_gateway_payment(
        &self,
        quote: Quote,
        shipping_info: &ShippingInfo,
    ) -> Result<(), CheckoutError> {
        let request = PaymentIntentRequest {
            amount: quote.total,
            currency: "idr".to_string(),
            customer: CustomerDetails {
                name: shipping_info.name.clone(),
                phone: shipping_info.phone.clone(),
            },
            shipping_address: shipping_info.clone(),
        };

        let intent = self
            .gateway
            .create_payment_intent(request)
            .await
            .map_err(|error| CheckoutError::PaymentFailed(error.to_string()))?;

        let confirmation = self
            .gateway
            .confirm_payment(&intent.id)
            .await
            .map_err(|error| CheckoutError::PaymentFailed(error.to_string()))?;

        if confirmation.success {
            Ok(())
        } else {
            Err(CheckoutError::PaymentFailed(
                confirmation
                    .error
                    .unwrap_or_else(|| "payment was declined".to_string()),
            ))
        }
    }

    /// Put reserved stock back after an aborted submission, logging instead of failing.
    async fn release_reserved(&self, lines: &[OrderLine]) {
        if let Err(error) = self.inventory.release(lines).await {
            warn!(%error, "failed to release reserved stock after aborted order");
        }
    }
}

#[async_trait]
impl CheckoutService for StorefrontCheckoutService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, customer, checkout, shipping_info),
        fields(
            customer = tracing::field::Empty,
            order_number = tracing::field::Empty,
            total = tracing::field::Empty
        ),
        err
    )]
    async fn place_order(
        &self,
        customer: Option<CustomerId>,
        checkout: &mut Checkout,
        shipping_info: ShippingInfo,
    ) -> Result<Order, CheckoutError> {
        let customer = customer.ok_or(CheckoutError::Unauthenticated)?;

        let span = Span::current();
        span.record("customer", tracing::field::display(customer));

        if checkout.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let (Some(shipping_method), Some(payment_method)) =
            (checkout.shipping_method(), checkout.payment_method())
        else {
            return Err(CheckoutError::MissingSelection);
        };

        // Quote from current state; never trust a total computed earlier.
        let quote = checkout.quote();
        span.record("total", quote.total);

        let lines: Vec<OrderLine> = checkout.cart().lines().iter().map(OrderLine::from).collect();

        if payment_method.gateway {
            self.confirm_gateway_payment(quote, &shipping_info).await?;
        }

        self.inventory.reserve(&lines).await?;

        let now = Timestamp::now();
        let year = now.to_zoned(TimeZone::UTC).year();

        let sequence = match self.orders.next_sequence(year).await {
            Ok(sequence) => sequence,
            Err(error) => {
                self.release_reserved(&lines).await;
                return Err(CheckoutError::Persistence(error));
            }
        };

        let order = Order {
            id: OrderId::new(),
            number: OrderNumber::new(year, sequence),
            customer,
            lines: lines.clone(),
            shipping_info,
            shipping_method: *shipping_method,
            payment_method: *payment_method,
            pricing: quote,
            discount_code: checkout.discount().active_code().map(str::to_string),
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let order = match self.orders.insert_order(order).await {
            Ok(order) => order,
            Err(error) => {
                self.release_reserved(&lines).await;
                return Err(CheckoutError::Persistence(error));
            }
        };

        checkout.cart_mut().clear();

        span.record("order_number", tracing::field::display(&order.number));

        self.metrics.record_event(
            "order_placed",
            order.pricing.total,
            json!({
                "order_number": order.number.as_str(),
                "payment_method": order.payment_method.id,
                "shipping_method": order.shipping_method.id,
                "discount_code": order.discount_code,
            }),
        );

        info!(order_number = %order.number, "order placed");

        Ok(order)
    }

    #[tracing::instrument(
        name = "orders.service.transition_order",
        skip(self),
        fields(order_id = %id, target = %target, actor = %actor)
    )]
    async fn transition_order(
        &self,
        id: OrderId,
        target: OrderStatus,
        actor: Actor,
    ) -> Result<Order, OrdersServiceError> {
        let mut order = self.orders.get_order(id).await?;

        if let Err(error) = check_transition(order.status, target, actor) {
            // Internal/admin-facing only; customers never see this.
            warn!(%error, current = %order.status, "rejected status transition");
            return Err(error.into());
        }

        let now = Timestamp::now();

        self.orders.update_status(id, target, now).await?;

        self.metrics.record_event(
            "order_status_changed",
            1,
            json!({
                "order_number": order.number.as_str(),
                "from": order.status.as_str(),
                "to": target.as_str(),
                "actor": actor.to_string(),
            }),
        );

        info!(order_number = %order.number, from = %order.status, to = %target, "order status updated");

        order.status = target;
        order.updated_at = now;

        Ok(order)
    }

    async fn orders_for_customer(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        Ok(self.orders.orders_for_customer(customer).await?)
    }
}
