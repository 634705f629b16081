//! Newsletter
//!
//! The newsletter capture collaborator. Checkout only ever reads subscription status from it
//! to decide whether the automatic discount applies; capture itself happens elsewhere in the
//! storefront.

use std::sync::RwLock;

use mockall::automock;
use rustc_hash::FxHashSet;

use crate::orders::models::CustomerId;

/// Read/write view of newsletter subscriptions.
#[automock]
pub trait NewsletterDirectory: Send + Sync {
    /// Whether the customer receives the newsletter.
    fn is_subscribed(&self, customer: &CustomerId) -> bool;

    /// Record a subscription. Idempotent.
    fn subscribe(&self, customer: CustomerId);
}

/// In-memory subscription directory.
#[derive(Debug, Default)]
pub struct InMemoryNewsletter {
    subscribers: RwLock<FxHashSet<CustomerId>>,
}

impl InMemoryNewsletter {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl NewsletterDirectory for InMemoryNewsletter {
    fn is_subscribed(&self, customer: &CustomerId) -> bool {
        self.subscribers
            .read()
            .map(|subscribers| subscribers.contains(customer))
            .unwrap_or(false)
    }

    fn subscribe(&self, customer: CustomerId) {
        if let Ok(mut subscribers) = self.subscribers.write() {
            subscribers.insert(customer);
        }
    }
}
