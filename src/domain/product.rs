use serde::{Deserialize, Serialize};

/// Unique identifier for a product (SQLite rowid).
pub type ProductId = i64;

/// A product that invoice items can reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product.
    pub id: ProductId,
    /// Stock keeping unit, unique across the catalog.
    pub sku: String,
    /// Display name of the product.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Current unit price. Items capture their own price at creation time,
    /// so changing this does not rewrite existing invoices.
    pub price: f64,
    /// Units on hand.
    pub stock: i64,
}

/// Field values for a product that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

impl Product {
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            sku: self.sku.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            stock: self.stock,
        }
    }

    /// Label used in product pickers, e.g. `"3 - Widget (price: 4.50)"`.
    pub fn picker_label(&self) -> String {
        format!("{} - {} (price: {:.2})", self.id, self.name, self.price)
    }
}
