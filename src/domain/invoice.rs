use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{PartnerId, ProductId};

/// Unique identifier for an invoice (SQLite rowid).
pub type InvoiceId = i64;

/// Unique identifier for an invoice line item.
pub type InvoiceItemId = i64;

/// Lifecycle label of an invoice.
///
/// Any status is settable at any time; there is no enforced transition
/// graph between the four labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    /// All statuses, in the order they appear in pickers.
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Cancelled,
    ];
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "Draft"),
            Self::Sent => write!(f, "Sent"),
            Self::Paid => write!(f, "Paid"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "SENT" => Ok(Self::Sent),
            "PAID" => Ok(Self::Paid),
            "CANCELLED" | "CANCELED" => Ok(Self::Cancelled),
            _ => Ok(Self::Draft),
        }
    }
}

/// An invoice issued to a partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier for the invoice.
    pub id: InvoiceId,
    /// Partner this invoice was issued to.
    pub partner_id: PartnerId,
    /// Issue date in `YYYY-MM-DD` format.
    pub invoice_date: String,
    /// Optional payment due date in `YYYY-MM-DD` format.
    pub due_date: Option<String>,
    /// Current lifecycle label.
    pub status: InvoiceStatus,
    /// Sum of the line totals of all items on this invoice. Maintained by
    /// the repository on every item add/delete.
    pub total_amount: f64,
}

/// Field values for an invoice that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub partner_id: PartnerId,
    pub invoice_date: String,
    pub due_date: Option<String>,
    pub status: InvoiceStatus,
}

impl Invoice {
    pub fn draft(&self) -> InvoiceDraft {
        InvoiceDraft {
            partner_id: self.partner_id,
            invoice_date: self.invoice_date.clone(),
            due_date: self.due_date.clone(),
            status: self.status,
        }
    }
}

/// One line on an invoice: a product, a quantity, and the price that was
/// agreed at the time the line was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: InvoiceItemId,
    pub invoice_id: InvoiceId,
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit price captured when the item was added; independent of the
    /// product's current price.
    pub unit_price: f64,
    /// `quantity * unit_price`, stored denormalized.
    pub line_total: f64,
}

/// Line total for one item: quantity times unit price.
pub fn line_total(quantity: i64, unit_price: f64) -> f64 {
    quantity as f64 * unit_price
}

/// Invoice total: sum of the line totals of the given items.
pub fn invoice_total(items: &[InvoiceItem]) -> f64 {
    items.iter().map(|it| it.line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_total_sums_line_totals() {
        let items = vec![
            InvoiceItem {
                id: 1,
                invoice_id: 1,
                product_id: 1,
                quantity: 2,
                unit_price: 10.0,
                line_total: line_total(2, 10.0),
            },
            InvoiceItem {
                id: 2,
                invoice_id: 1,
                product_id: 2,
                quantity: 3,
                unit_price: 1.5,
                line_total: line_total(3, 1.5),
            },
        ];
        assert_eq!(invoice_total(&items), 24.5);
    }

    #[test]
    fn test_invoice_total_of_no_items_is_zero() {
        assert_eq!(invoice_total(&[]), 0.0);
    }
}
