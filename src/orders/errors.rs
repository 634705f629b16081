//! Order service errors.

use thiserror::Error;

use super::{
    repository::{InventoryError, RepositoryError},
    status::TransitionError,
};

/// Errors from order submission. Every variant leaves the cart intact so the customer can
/// correct the problem and retry.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No signed-in customer; the caller redirects to login.
    #[error("sign in to place an order")]
    Unauthenticated,

    /// Submission from an empty cart is blocked.
    #[error("cart is empty")]
    EmptyCart,

    /// Shipping and payment methods must both be selected.
    #[error("select a shipping and payment method first")]
    MissingSelection,

    /// The gateway declined or could not be reached; carries the message shown to the
    /// customer.
    #[error("payment failed: {0}")]
    PaymentFailed(String),

    /// Stock could not cover the cart.
    #[error(transparent)]
    OutOfStock(#[from] InventoryError),

    /// The order could not be saved; reserved stock has been released and the customer may
    /// retry.
    #[error("order could not be saved")]
    Persistence(#[source] RepositoryError),
}

/// Errors from order lookup and status transitions.
#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// No order with the given id.
    #[error("order not found")]
    NotFound,

    /// The requested status change is not legal; the stored status is untouched.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Backend failure.
    #[error("storage error")]
    Storage(#[source] RepositoryError),
}

impl From<RepositoryError> for OrdersServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}
