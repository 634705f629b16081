//! Pricing
//!
//! The pure checkout pricing computation. Evaluation order is fixed and load-bearing: tax is
//! computed on the item subtotal only, and the discount applies to the subtotal only, never
//! to tax or fees.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::Serialize;

use crate::{
    cart::CartLine,
    catalog::{PaymentMethod, ShippingMethod},
};

/// PPN, the Indonesian value-added tax, fixed at 11% of the item subtotal.
#[must_use]
pub fn tax_rate() -> Percentage {
    Percentage::from(Decimal::new(11, 2))
}

/// A full pricing breakdown, all amounts in rupiah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: u64,

    /// PPN on the subtotal.
    pub tax: u64,

    /// Price of the selected shipping method, 0 while nothing is selected.
    pub shipping_fee: u64,

    /// Fee of the selected payment method, 0 while nothing is selected.
    pub payment_fee: u64,

    /// Discount amount, clamped so it can never exceed the subtotal.
    pub discount: u64,

    /// Amount due.
    pub total: u64,
}

/// Apply a fractional rate to an amount in rupiah, rounding the midpoint away from zero.
#[must_use]
pub fn apply_rate(amount: u64, rate: Percentage) -> u64 {
    let applied = rate * Decimal::from(amount);

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(u64::MAX)
}

/// Price a cart against the current method selections and discount rate.
///
/// Pure: the same inputs always produce the same [`Quote`], and callers re-quote whenever any
/// input changes rather than caching a total.
#[must_use]
pub fn quote(
    lines: &[CartLine],
    shipping: Option<&ShippingMethod>,
    payment: Option<&PaymentMethod>,
    discount_rate: Option<Percentage>,
) -> Quote {
    let subtotal: u64 = lines.iter().map(CartLine::line_total).sum();

    let tax = apply_rate(subtotal, tax_rate());
    let shipping_fee = shipping.map_or(0, |method| method.price);
    let payment_fee = payment.map_or(0, |method| method.fee);

    // A rate above 1.0 cannot push the total negative: the discount never exceeds what the
    // items themselves cost.
    let discount = discount_rate
        .map_or(0, |rate| apply_rate(subtotal, rate))
        .min(subtotal);

    let total = subtotal + tax + shipping_fee + payment_fee - discount;

    Quote {
        subtotal,
        tax,
        shipping_fee,
        payment_fee,
        discount,
        total,
    }
}
