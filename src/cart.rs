//! Cart
//!
//! The session-owned line item store feeding the pricing calculator. One cart per browser
//! session; all mutation is synchronous and local, so there is no interior mutability here.

use smallvec::SmallVec;
use thiserror::Error;

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Line quantities must stay at least 1; removal is explicit.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// No line with the given product id is in the cart.
    #[error("product \"{0}\" is not in the cart")]
    LineNotFound(String),
}

/// A product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Product identity from the catalog collaborator.
    pub product_id: String,

    /// Product name as shown in the cart and on receipts.
    pub name: String,

    /// Unit price in rupiah.
    pub unit_price: u64,

    /// Number of units; always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// Line item store for one shopping session.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: SmallVec<[CartLine; 8]>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line to the cart.
    ///
    /// Adding a product already in the cart merges quantities instead of creating a second
    /// line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] when the line's quantity is 0.
    pub fn add(&mut self, line: CartLine) -> Result<(), CartError> {
        if line.quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|existing| existing.product_id == line.product_id)
        {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }

        Ok(())
    }

    /// Set the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] for a quantity of 0 (use [`Cart::remove`]) and
    /// [`CartError::LineNotFound`] when the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
            .ok_or_else(|| CartError::LineNotFound(product_id.to_string()))?;

        line.quantity = quantity;

        Ok(())
    }

    /// Remove a line from the cart, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] when the product is not in the cart.
    pub fn remove(&mut self, product_id: &str) -> Result<CartLine, CartError> {
        let idx = self
            .lines
            .iter()
            .position(|line| line.product_id == product_id)
            .ok_or_else(|| CartError::LineNotFound(product_id.to_string()))?;

        Ok(self.lines.remove(idx))
    }

    /// Remove every line. Called by the order builder after a successful submission.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines currently in the cart.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of all line totals, in rupiah.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Number of lines (not units) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
