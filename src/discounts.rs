//! Discounts
//!
//! Resolves user-entered discount codes against the fixed code table and tracks which single
//! discount is active on a checkout. Manual codes and the automatic newsletter discount feed
//! the same latch: at most one rate is ever active, and a manual entry always wins.

use std::sync::LazyLock;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Code recorded when the newsletter discount applies automatically.
pub const NEWSLETTER_CODE: &str = "NEWSLETTER5";

/// The fixed discount code table. Keys are canonical (uppercase) codes.
static CODE_TABLE: LazyLock<FxHashMap<&'static str, Percentage>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();

    table.insert("WELCOME10", Percentage::from(Decimal::new(10, 2)));
    table.insert("PLANT20", Percentage::from(Decimal::new(20, 2)));
    table.insert("NEWBIE15", Percentage::from(Decimal::new(15, 2)));
    table.insert(NEWSLETTER_CODE, Percentage::from(Decimal::new(5, 2)));

    table
});

/// Errors from discount code resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// The entered code is not in the table. The caller surfaces a message and
    /// leaves pricing untouched.
    #[error("unknown discount code \"{0}\"")]
    UnknownCode(String),
}

/// A code that resolved against the table, carrying its canonical spelling and rate.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedCode {
    /// Canonical uppercase code, as shown on receipts.
    pub code: &'static str,

    /// Fractional discount rate applied to the cart subtotal.
    pub rate: Percentage,
}

/// Resolve a user-entered code.
///
/// Input is trimmed and uppercased before lookup, so `" welcome10 "` resolves to
/// `WELCOME10`.
///
/// # Errors
///
/// Returns [`DiscountError::UnknownCode`] when the normalized code is not in the table.
pub fn resolve_code(input: &str) -> Result<ResolvedCode, DiscountError> {
    let normalized = input.trim().to_uppercase();

    CODE_TABLE
        .get_key_value(normalized.as_str())
        .map(|(&code, &rate)| ResolvedCode { code, rate })
        .ok_or(DiscountError::UnknownCode(normalized))
}

/// Which discount, if any, is active on a checkout.
///
/// This is a latch, not a stack: applying the newsletter discount while anything is active is
/// a no-op, and applying a manual code replaces whatever was active before.
#[derive(Debug, Clone, Copy, Default)]
pub enum DiscountState {
    /// No discount active.
    #[default]
    Inactive,

    /// The newsletter discount applied automatically.
    Auto(ResolvedCode),

    /// A manually entered code is active.
    Manual(ResolvedCode),
}

impl DiscountState {
    /// Apply a manually entered code, replacing any active discount (last write wins).
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::UnknownCode`] for codes not in the table; the previous state
    /// is kept unchanged in that case.
    pub fn apply_code(&mut self, input: &str) -> Result<ResolvedCode, DiscountError> {
        let resolved = resolve_code(input)?;

        *self = DiscountState::Manual(resolved);

        Ok(resolved)
    }

    /// Apply the automatic newsletter discount.
    ///
    /// Only fires for subscribers and only while no other discount is active, so calling it
    /// repeatedly never stacks or re-triggers. Returns the applied code on the transition
    /// from [`DiscountState::Inactive`], `None` otherwise.
    pub fn apply_newsletter(&mut self, subscribed: bool) -> Option<ResolvedCode> {
        if !subscribed || !matches!(self, DiscountState::Inactive) {
            return None;
        }

        let resolved = resolve_code(NEWSLETTER_CODE).ok()?;

        *self = DiscountState::Auto(resolved);

        Some(resolved)
    }

    /// The active rate, if any.
    #[must_use]
    pub fn active_rate(&self) -> Option<Percentage> {
        match self {
            DiscountState::Inactive => None,
            DiscountState::Auto(resolved) | DiscountState::Manual(resolved) => {
                Some(resolved.rate)
            }
        }
    }

    /// The canonical code of the active discount, if any.
    #[must_use]
    pub fn active_code(&self) -> Option<&'static str> {
        match self {
            DiscountState::Inactive => None,
            DiscountState::Auto(resolved) | DiscountState::Manual(resolved) => Some(resolved.code),
        }
    }

    /// Remove any active discount.
    pub fn clear(&mut self) {
        *self = DiscountState::Inactive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_of(state: &DiscountState) -> Decimal {
        state
            .active_rate()
            .map(|rate| rate * Decimal::ONE)
            .unwrap_or_default()
    }

    #[test]
    fn resolve_code_normalizes_case_and_whitespace() {
        let resolved = resolve_code("  welcome10 ").expect("code should resolve");

        assert_eq!(resolved.code, "WELCOME10");
        assert_eq!(resolved.rate * Decimal::ONE, Decimal::new(10, 2));
    }

    #[test]
    fn resolve_code_unknown_fails() {
        let result = resolve_code("FOOBAR");

        assert_eq!(result.unwrap_err(), DiscountError::UnknownCode("FOOBAR".into()));
    }

    #[test]
    fn apply_code_activates_manual_state() {
        let mut state = DiscountState::default();

        state.apply_code("plant20").expect("code should resolve");

        assert!(matches!(state, DiscountState::Manual(_)));
        assert_eq!(state.active_code(), Some("PLANT20"));
        assert_eq!(rate_of(&state), Decimal::new(20, 2));
    }

    #[test]
    fn apply_code_failure_keeps_previous_state() {
        let mut state = DiscountState::default();
        state.apply_code("WELCOME10").expect("code should resolve");

        let result = state.apply_code("FOOBAR");

        assert!(result.is_err());
        assert_eq!(state.active_code(), Some("WELCOME10"));
    }

    #[test]
    fn newsletter_applies_only_for_subscribers() {
        let mut state = DiscountState::default();

        assert!(state.apply_newsletter(false).is_none());
        assert!(state.active_rate().is_none());

        let applied = state.apply_newsletter(true).expect("should apply");

        assert_eq!(applied.code, NEWSLETTER_CODE);
        assert_eq!(rate_of(&state), Decimal::new(5, 2));
    }

    #[test]
    fn newsletter_is_idempotent() {
        let mut state = DiscountState::default();

        assert!(state.apply_newsletter(true).is_some());
        assert!(state.apply_newsletter(true).is_none());

        assert_eq!(rate_of(&state), Decimal::new(5, 2));
    }

    #[test]
    fn manual_code_replaces_newsletter_discount_without_stacking() {
        let mut state = DiscountState::default();
        state.apply_newsletter(true);

        state.apply_code("PLANT20").expect("code should resolve");

        // 20%, not 25%.
        assert_eq!(rate_of(&state), Decimal::new(20, 2));
        assert_eq!(state.active_code(), Some("PLANT20"));
    }

    #[test]
    fn newsletter_does_not_override_manual_code() {
        let mut state = DiscountState::default();
        state.apply_code("NEWBIE15").expect("code should resolve");

        assert!(state.apply_newsletter(true).is_none());
        assert_eq!(state.active_code(), Some("NEWBIE15"));
    }

    #[test]
    fn clear_resets_the_latch() {
        let mut state = DiscountState::default();
        state.apply_code("WELCOME10").expect("code should resolve");

        state.clear();

        assert!(state.active_rate().is_none());
        assert!(state.apply_newsletter(true).is_some());
    }
}
