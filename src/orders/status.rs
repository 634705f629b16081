//! Order status lifecycle
//!
//! The finite state machine over an order's status field. This module only validates a
//! requested transition against the current state and the acting role; deciding when to
//! request one (payment cleared, parcel handed over) belongs to the callers.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Lifecycle status of an order.
///
/// `Confirmed` is carried in the stored enum for compatibility with existing records, but no
/// transition path produces or consumes it; see [`check_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted, awaiting payment/processing.
    Pending,

    /// Present in stored data; unreachable through any transition.
    Confirmed,

    /// Payment confirmed, being prepared.
    Processing,

    /// Handed to the courier.
    Shipped,

    /// Received by the customer. Terminal.
    Delivered,

    /// Cancelled before shipment. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Lowercase name as stored and displayed.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are permitted out of this status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is requesting a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    /// The customer who owns the order.
    Customer,

    /// Back-office staff.
    Admin,

    /// The storefront itself, e.g. reacting to a payment confirmation.
    System,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Actor::Customer => "customer",
            Actor::Admin => "admin",
            Actor::System => "system",
        };

        f.write_str(name)
    }
}

/// Errors from transition validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The requested pair of states is not connected in the lifecycle.
    #[error("no transition from {from} to {to}")]
    Unsupported {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// The transition exists but the acting role may not perform it.
    #[error("{actor} may not move an order from {from} to {to}")]
    Forbidden {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
        /// The rejected role.
        actor: Actor,
    },
}

/// Roles permitted to perform a given transition, or `None` when the states are not
/// connected at all.
fn allowed_actors(from: OrderStatus, to: OrderStatus) -> Option<&'static [Actor]> {
    match (from, to) {
        // Payment confirmation (customer session or the gateway callback) or manual admin
        // action.
        (OrderStatus::Pending, OrderStatus::Processing) => {
            Some(&[Actor::Customer, Actor::System, Actor::Admin])
        }
        (OrderStatus::Processing, OrderStatus::Shipped) => Some(&[Actor::Admin]),
        // Admin fulfillment, or the customer marking the parcel received.
        (OrderStatus::Shipped, OrderStatus::Delivered) => Some(&[Actor::Admin, Actor::Customer]),
        (OrderStatus::Pending | OrderStatus::Processing, OrderStatus::Cancelled) => {
            Some(&[Actor::Admin])
        }
        _ => None,
    }
}

/// Validate a requested status transition.
///
/// # Errors
///
/// Returns [`TransitionError::Unsupported`] when the lifecycle has no edge from `from` to
/// `to` (including everything out of a terminal status and anything touching `Confirmed`),
/// and [`TransitionError::Forbidden`] when the edge exists but `actor` may not take it.
pub fn check_transition(
    from: OrderStatus,
    to: OrderStatus,
    actor: Actor,
) -> Result<(), TransitionError> {
    let allowed = allowed_actors(from, to).ok_or(TransitionError::Unsupported { from, to })?;

    if allowed.contains(&actor) {
        Ok(())
    } else {
        Err(TransitionError::Forbidden { from, to, actor })
    }
}
