//! Checkout
//!
//! One customer's in-progress checkout: the cart, the shipping/payment method selections,
//! and the discount latch. Totals are never stored; [`Checkout::quote`] recomputes the full
//! breakdown from current state so the UI can never show a stale total.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::{self, PaymentMethod, ShippingMethod},
    discounts::{DiscountError, DiscountState, ResolvedCode},
    pricing::{self, Quote},
};

/// Errors from method selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The shipping method id is not in the catalog.
    #[error("unknown shipping method \"{0}\"")]
    UnknownShippingMethod(String),

    /// The payment method id is not in the catalog.
    #[error("unknown payment method \"{0}\"")]
    UnknownPaymentMethod(String),
}

/// Delivery details collected by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    /// Recipient name.
    pub name: String,

    /// Recipient phone number.
    pub phone: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// Postal code.
    pub postal_code: String,

    /// Province.
    pub province: String,
}

/// A customer's in-progress checkout session.
#[derive(Debug, Default)]
pub struct Checkout {
    cart: Cart,
    shipping_method: Option<&'static ShippingMethod>,
    payment_method: Option<&'static PaymentMethod>,
    discount: DiscountState,
}

impl Checkout {
    /// Start a checkout over an existing cart.
    #[must_use]
    pub fn new(cart: Cart) -> Self {
        Self {
            cart,
            shipping_method: None,
            payment_method: None,
            discount: DiscountState::default(),
        }
    }

    /// Select a shipping method by catalog id.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownShippingMethod`] for ids not in the catalog; the
    /// previous selection is kept.
    pub fn select_shipping(&mut self, id: &str) -> Result<&'static ShippingMethod, SelectionError> {
        let method = catalog::shipping_method(id)
            .ok_or_else(|| SelectionError::UnknownShippingMethod(id.to_string()))?;

        self.shipping_method = Some(method);

        Ok(method)
    }

    /// Select a payment method by catalog id.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownPaymentMethod`] for ids not in the catalog; the
    /// previous selection is kept.
    pub fn select_payment(&mut self, id: &str) -> Result<&'static PaymentMethod, SelectionError> {
        let method = catalog::payment_method(id)
            .ok_or_else(|| SelectionError::UnknownPaymentMethod(id.to_string()))?;

        self.payment_method = Some(method);

        Ok(method)
    }

    /// Apply a manually entered discount code (last write wins, no stacking).
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::UnknownCode`] for codes not in the table; pricing is
    /// unchanged in that case.
    pub fn apply_discount_code(&mut self, input: &str) -> Result<ResolvedCode, DiscountError> {
        self.discount.apply_code(input)
    }

    /// Apply the automatic newsletter discount for a subscriber.
    ///
    /// A no-op unless the customer is subscribed and no discount is active yet.
    pub fn apply_newsletter_discount(&mut self, subscribed: bool) -> Option<ResolvedCode> {
        self.discount.apply_newsletter(subscribed)
    }

    /// Price the checkout as it stands right now.
    #[must_use]
    pub fn quote(&self) -> Quote {
        pricing::quote(
            self.cart.lines(),
            self.shipping_method,
            self.payment_method,
            self.discount.active_rate(),
        )
    }

    /// The cart under this checkout.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The cart under this checkout, mutably.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// The selected shipping method, if any.
    #[must_use]
    pub fn shipping_method(&self) -> Option<&'static ShippingMethod> {
        self.shipping_method
    }

    /// The selected payment method, if any.
    #[must_use]
    pub fn payment_method(&self) -> Option<&'static PaymentMethod> {
        self.payment_method
    }

    /// The discount latch.
    #[must_use]
    pub fn discount(&self) -> &DiscountState {
        &self.discount
    }
}
