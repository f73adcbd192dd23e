//! Receipt value object
//!
//! The core decides WHAT goes on a receipt - priced lines, subtotal,
//! service fee, total, payment method - as a plain value computed from an
//! order and the catalog. HOW it reaches paper (thermal printer bytes, a
//! print dialog, a PDF) belongs to the printing collaborator behind
//! [`ReceiptPrinter`]. A plain-text rendering is provided as the fallback
//! surface and for tests.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{DeliveryInfo, Order, OrderType, PaymentMethod};
use thiserror::Error;

use crate::money;
use crate::traits::PriceLookup;

/// One priced receipt line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i32,
    /// Preparation note, empty when absent
    pub notes: String,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Printable snapshot of an order at settlement time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receipt {
    pub order_id: i64,
    pub order_type: OrderType,
    pub identifier: String,
    /// Issue time (Unix milliseconds)
    pub issued_at: i64,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_info: Option<DeliveryInfo>,
}

/// Printing collaborator seam
pub trait ReceiptPrinter: Send + Sync {
    fn print(&self, receipt: &Receipt) -> Result<(), PrintError>;
}

/// Printing errors
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("printer unavailable: {0}")]
    Unavailable(String),

    #[error("print failed: {0}")]
    Failed(String),
}

impl Receipt {
    /// Price the order into a receipt. Line order follows item insertion
    /// order.
    pub fn from_order(order: &Order, catalog: &dyn PriceLookup, issued_at: i64) -> Self {
        let lines = order
            .items
            .iter()
            .map(|item| {
                let unit_price = money::unit_price(catalog, &item.name);
                ReceiptLine {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    notes: item.notes.clone(),
                    unit_price,
                    line_total: money::line_total(unit_price, item.quantity),
                }
            })
            .collect();

        Self {
            order_id: order.id,
            order_type: order.order_type,
            identifier: order.identifier.clone(),
            issued_at,
            lines,
            subtotal: money::order_subtotal(order, catalog),
            service_fee: money::service_fee(order, catalog),
            total: money::order_total(order, catalog),
            payment_method: order.payment_method,
            delivery_info: order.delivery_info.clone(),
        }
    }

    /// Plain-text rendering, `width` characters wide.
    pub fn to_text(&self, width: usize) -> String {
        let mut out = String::new();
        let sep = "-".repeat(width);

        out.push_str(&format!(
            "{} #{} - {}\n",
            self.order_type, self.order_id, self.identifier
        ));
        if let Some(info) = &self.delivery_info {
            out.push_str(&format!("{} - {}\n", info.client_name, info.phone));
            out.push_str(&format!(
                "{}, {} - {}\n",
                info.address, info.number, info.neighborhood
            ));
        }
        out.push_str(&sep);
        out.push('\n');

        for line in &self.lines {
            out.push_str(&amount_line(
                &format!("{}x {}", line.quantity, line.name),
                line.line_total,
                width,
            ));
            if !line.notes.is_empty() {
                out.push_str(&format!("   * {}\n", line.notes));
            }
        }

        out.push_str(&sep);
        out.push('\n');
        out.push_str(&amount_line("SUBTOTAL", self.subtotal, width));
        if !self.service_fee.is_zero() {
            out.push_str(&amount_line("SERVICE FEE 10%", self.service_fee, width));
        }
        out.push_str(&amount_line("TOTAL", self.total, width));
        if let Some(method) = self.payment_method {
            out.push_str(&format!("PAID: {method}\n"));
        }
        out
    }
}

/// Label left, amount right, padded to `width`.
fn amount_line(label: &str, amount: Decimal, width: usize) -> String {
    let amount = format!("{amount:.2}");
    let pad = width.saturating_sub(label.len() + amount.len()).max(1);
    format!("{label}{}{amount}\n", " ".repeat(pad))
}
