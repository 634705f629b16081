//! Order models

use std::fmt;

use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    cart::CartLine,
    catalog::{PaymentMethod, ShippingMethod},
    checkout::ShippingInfo,
    pricing::Quote,
};

use super::{number::OrderNumber, status::OrderStatus};

/// Identity of the customer who placed an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Generate a fresh customer id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    #[must_use]
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Internal order identity, distinct from the human-readable order number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a fresh order id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    #[must_use]
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A cart line frozen onto an order at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    /// Product identity at the time of purchase.
    pub product_id: String,

    /// Product name at the time of purchase.
    pub name: String,

    /// Unit price at the time of purchase, in rupiah.
    pub unit_price: u64,

    /// Units purchased.
    pub quantity: u32,
}

impl OrderLine {
    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// A placed order.
///
/// Everything here is a snapshot taken at submission time: later changes to the cart, the
/// catalogs, or discount state never touch an existing order. After creation only `status`
/// and `updated_at` change, and only through the lifecycle rules in
/// [`status`](super::status).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    /// Internal identity.
    pub id: OrderId,

    /// Human-readable, year-scoped order number.
    pub number: OrderNumber,

    /// The customer who placed the order.
    pub customer: CustomerId,

    /// Item snapshot.
    pub lines: Vec<OrderLine>,

    /// Delivery details from the checkout form.
    pub shipping_info: ShippingInfo,

    /// Shipping method snapshot.
    pub shipping_method: ShippingMethod,

    /// Payment method snapshot.
    pub payment_method: PaymentMethod,

    /// Full pricing breakdown at submission time.
    pub pricing: Quote,

    /// Canonical discount code on the order, if one was active.
    pub discount_code: Option<String>,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// Submission time.
    pub created_at: Timestamp,

    /// Last status change (equals `created_at` until the first transition).
    pub updated_at: Timestamp,
}
