//! Order numbers
//!
//! Human-readable order identifiers, sequential within a calendar year:
//! `ORD-2026-0001`, `ORD-2026-0002`, … The sequence itself is allocated by the orders
//! repository; this type only owns the format.

use std::fmt;

use serde::Serialize;

/// A year-scoped, human-readable order number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Format an order number from a year and its sequence within that year.
    ///
    /// Sequences are zero-padded to four digits and grow past that unpadded.
    #[must_use]
    pub fn new(year: i16, sequence: u64) -> Self {
        Self(format!("ORD-{year}-{sequence:04}"))
    }

    /// The formatted number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(OrderNumber::new(2026, 1).as_str(), "ORD-2026-0001");
        assert_eq!(OrderNumber::new(2026, 42).as_str(), "ORD-2026-0042");
    }

    #[test]
    fn large_sequences_are_not_truncated() {
        assert_eq!(OrderNumber::new(2026, 12_345).as_str(), "ORD-2026-12345");
    }

    #[test]
    fn displays_as_the_formatted_number() {
        assert_eq!(OrderNumber::new(2025, 7).to_string(), "ORD-2025-0007");
    }
}
