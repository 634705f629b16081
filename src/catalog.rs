//! Shipping and payment method catalogs
//!
//! Both catalogs are fixed at build time. The storefront only ever offers these entries, so
//! they live here as `'static` data rather than behind the persistence port.

use serde::Serialize;

/// A delivery option offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShippingMethod {
    /// Stable identifier used by the UI and stored on orders.
    pub id: &'static str,

    /// Customer-facing name.
    pub name: &'static str,

    /// Flat delivery price in rupiah.
    pub price: u64,

    /// Display string for the delivery estimate.
    pub estimated_days: &'static str,
}

/// How a payment method settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// Bank transfer or card settlement.
    Bank,

    /// E-wallet transfer.
    Ewallet,

    /// Cash on delivery.
    Cod,
}

/// A payment option offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentMethod {
    /// Stable identifier used by the UI and stored on orders.
    pub id: &'static str,

    /// Customer-facing name.
    pub name: &'static str,

    /// Settlement kind.
    pub kind: PaymentKind,

    /// Flat handling fee in rupiah.
    pub fee: u64,

    /// Whether placing an order with this method requires an external
    /// create-intent/confirm round trip before the order may be persisted.
    pub gateway: bool,
}

/// Every delivery option the storefront offers.
pub static SHIPPING_METHODS: [ShippingMethod; 3] = [
    ShippingMethod {
        id: "regular",
        name: "Regular Shipping",
        price: 15_000,
        estimated_days: "3-5 days",
    },
    ShippingMethod {
        id: "express",
        name: "Express Shipping",
        price: 30_000,
        estimated_days: "1-2 days",
    },
    ShippingMethod {
        id: "same-day",
        name: "Same Day Delivery",
        price: 50_000,
        estimated_days: "Today",
    },
];

/// Every payment option the storefront offers.
///
/// Card payments settle through the external gateway and carry no fee; e-wallets and cash on
/// delivery carry flat handling fees.
pub static PAYMENT_METHODS: [PaymentMethod; 11] = [
    PaymentMethod {
        id: "stripe",
        name: "Credit / Debit Card",
        kind: PaymentKind::Bank,
        fee: 0,
        gateway: true,
    },
    PaymentMethod {
        id: "bca",
        name: "BCA Virtual Account",
        kind: PaymentKind::Bank,
        fee: 0,
        gateway: false,
    },
    PaymentMethod {
        id: "bni",
        name: "BNI Virtual Account",
        kind: PaymentKind::Bank,
        fee: 0,
        gateway: false,
    },
    PaymentMethod {
        id: "bri",
        name: "BRI Virtual Account",
        kind: PaymentKind::Bank,
        fee: 0,
        gateway: false,
    },
    PaymentMethod {
        id: "mandiri",
        name: "Mandiri Virtual Account",
        kind: PaymentKind::Bank,
        fee: 0,
        gateway: false,
    },
    PaymentMethod {
        id: "gopay",
        name: "GoPay",
        kind: PaymentKind::Ewallet,
        fee: 2_500,
        gateway: false,
    },
    PaymentMethod {
        id: "ovo",
        name: "OVO",
        kind: PaymentKind::Ewallet,
        fee: 2_500,
        gateway: false,
    },
    PaymentMethod {
        id: "dana",
        name: "DANA",
        kind: PaymentKind::Ewallet,
        fee: 2_500,
        gateway: false,
    },
    PaymentMethod {
        id: "shopeepay",
        name: "ShopeePay",
        kind: PaymentKind::Ewallet,
        fee: 2_500,
        gateway: false,
    },
    PaymentMethod {
        id: "linkaja",
        name: "LinkAja",
        kind: PaymentKind::Ewallet,
        fee: 2_500,
        gateway: false,
    },
    PaymentMethod {
        id: "cod",
        name: "Cash on Delivery",
        kind: PaymentKind::Cod,
        fee: 5_000,
        gateway: false,
    },
];

/// Look up a delivery option by id.
#[must_use]
pub fn shipping_method(id: &str) -> Option<&'static ShippingMethod> {
    SHIPPING_METHODS.iter().find(|method| method.id == id)
}

/// Look up a payment option by id.
#[must_use]
pub fn payment_method(id: &str) -> Option<&'static PaymentMethod> {
    PAYMENT_METHODS.iter().find(|method| method.id == id)
}
