//! Receipt
//!
//! Text rendering of a placed order: an item table followed by the pricing breakdown,
//! amounts formatted as rupiah.

use std::io;

use rusty_money::{Money, iso};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::orders::models::Order;

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output sink failed.
    #[error("IO error")]
    IO,
}

/// Format a rupiah amount for display.
#[must_use]
pub fn format_idr(amount: u64) -> String {
    let amount = i64::try_from(amount).unwrap_or(i64::MAX);

    Money::from_major(amount, iso::IDR).to_string()
}

/// Renders one order as a printable receipt.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a> {
    order: &'a Order,
}

impl<'a> Receipt<'a> {
    /// Create a receipt for the given order.
    #[must_use]
    pub fn new(order: &'a Order) -> Self {
        Self { order }
    }

    /// Write the receipt to the given sink.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if the sink cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let order = self.order;

        writeln!(out, "{}", order.number).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, "{} ({})", order.status, order.created_at).map_err(|_err| ReceiptError::IO)?;

        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Amount"]);

        for line in &order.lines {
            builder.push_record([
                line.name.clone(),
                line.quantity.to_string(),
                format_idr(line.unit_price),
                format_idr(line.line_total()),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out)
    }

    /// Render the receipt to a string.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if rendering fails.
    pub fn text(&self) -> Result<String, ReceiptError> {
        let mut buffer = Vec::new();

        self.write_to(&mut buffer)?;

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let order = self.order;
        let pricing = &order.pricing;

        let mut rows: Vec<(String, String)> = vec![
            ("Subtotal:".to_string(), format_idr(pricing.subtotal)),
            ("PPN (11%):".to_string(), format_idr(pricing.tax)),
            (
                format!("Shipping ({}):", order.shipping_method.name),
                format_idr(pricing.shipping_fee),
            ),
        ];

        if pricing.payment_fee > 0 {
            rows.push((
                format!("Payment fee ({}):", order.payment_method.name),
                format_idr(pricing.payment_fee),
            ));
        }

        if pricing.discount > 0 {
            let code = order.discount_code.as_deref().unwrap_or("discount");

            rows.push((
                format!("Discount ({code}):"),
                format!("-{}", format_idr(pricing.discount)),
            ));
        }

        rows.push(("Total:".to_string(), format_idr(pricing.total)));

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &rows {
            writeln!(out, " {label:<label_width$}  {value:>value_width$}")
                .map_err(|_err| ReceiptError::IO)?;
        }

        Ok(())
    }
}
