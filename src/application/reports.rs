//! Report aggregation queries.
//!
//! Reports group invoice items by product (quantity and revenue) and rank
//! invoices by total. Ranked reports are capped at [`TOP_LIMIT`] entries.

use anyhow::Result;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Ranked reports return at most this many entries.
pub const TOP_LIMIT: usize = 10;

/// Aggregated sales figures for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSales {
    pub product: String,
    pub qty_sold: i64,
    pub revenue: f64,
}

/// One entry in the top-invoices ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRanking {
    pub invoice_id: i64,
    pub partner: String,
    pub total_amount: f64,
}

/// Read-only report queries over the shared connection.
pub struct Reports {
    conn: Arc<Mutex<Connection>>,
}

impl Reports {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// All products with sales, ordered by quantity sold descending.
    pub fn product_sales_summary(&self) -> Result<Vec<ProductSales>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT p.name AS product, SUM(ii.quantity) AS qty_sold, SUM(ii.line_total) AS revenue
             FROM invoice_items ii
             JOIN products p ON p.id = ii.product_id
             GROUP BY p.id
             ORDER BY qty_sold DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ProductSales {
                product: row.get(0)?,
                qty_sold: row.get(1)?,
                revenue: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Best-selling products by quantity, at most [`TOP_LIMIT`] entries.
    pub fn top_selling_products(&self) -> Result<Vec<ProductSales>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT p.name AS product, SUM(ii.quantity) AS qty_sold, SUM(ii.line_total) AS revenue
             FROM invoice_items ii
             JOIN products p ON p.id = ii.product_id
             GROUP BY p.id
             ORDER BY qty_sold DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map([TOP_LIMIT as i64], |row| {
            Ok(ProductSales {
                product: row.get(0)?,
                qty_sold: row.get(1)?,
                revenue: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Invoices ranked by total, at most [`TOP_LIMIT`] entries.
    pub fn top_invoices(&self) -> Result<Vec<InvoiceRanking>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT invoices.id AS invoice_id, partners.name AS partner, invoices.total_amount
             FROM invoices
             JOIN partners ON partners.id = invoices.partner_id
             ORDER BY invoices.total_amount DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map([TOP_LIMIT as i64], |row| {
            Ok(InvoiceRanking {
                invoice_id: row.get(0)?,
                partner: row.get(1)?,
                total_amount: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InvoiceDraft, InvoiceStatus, PartnerDraft, ProductDraft};
    use crate::infra::db::Database;

    fn seed(db: &Database, products: usize) -> anyhow::Result<()> {
        let partner_repo = db.partner_repo();
        let product_repo = db.product_repo();
        let invoice_repo = db.invoice_repo();

        let pid = partner_repo.create(&PartnerDraft {
            name: "Acme GmbH".into(),
            tax_id: "DE1".into(),
            email: "billing@acme.example".into(),
            phone: "+49 30 1".into(),
            address: "Invalidenstr. 1".into(),
        })?;

        let inv = invoice_repo.create(&InvoiceDraft {
            partner_id: pid,
            invoice_date: "2025-01-15".into(),
            due_date: None,
            status: InvoiceStatus::Sent,
        })?;

        for n in 0..products {
            let prod = product_repo.create(&ProductDraft {
                sku: format!("SKU-{n}"),
                name: format!("Product {n}"),
                description: "A thing".into(),
                price: 2.0,
                stock: 100,
            })?;
            // Product n sells n+1 units so the ranking is deterministic
            invoice_repo.add_item(inv, prod, (n + 1) as i64, None)?;
        }
        Ok(())
    }

    #[test]
    fn test_product_sales_summary_groups_and_sorts() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        seed(&db, 3)?;
        let reports = Reports::new(db.connection());

        let summary = reports.product_sales_summary()?;
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].product, "Product 2");
        assert_eq!(summary[0].qty_sold, 3);
        assert_eq!(summary[0].revenue, 6.0);
        assert!(summary[0].qty_sold >= summary[1].qty_sold);
        assert!(summary[1].qty_sold >= summary[2].qty_sold);
        Ok(())
    }

    #[test]
    fn test_top_selling_products_caps_at_limit() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        seed(&db, 14)?;
        let reports = Reports::new(db.connection());

        let top = reports.top_selling_products()?;
        assert_eq!(top.len(), TOP_LIMIT);
        // Sorted descending by quantity
        for pair in top.windows(2) {
            assert!(pair[0].qty_sold >= pair[1].qty_sold);
        }
        assert_eq!(top[0].qty_sold, 14);
        Ok(())
    }

    #[test]
    fn test_top_invoices_ranked_by_total() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        let partner_repo = db.partner_repo();
        let product_repo = db.product_repo();
        let invoice_repo = db.invoice_repo();

        let pid = partner_repo.create(&PartnerDraft {
            name: "Acme GmbH".into(),
            tax_id: "DE1".into(),
            email: "billing@acme.example".into(),
            phone: "+49 30 1".into(),
            address: "Invalidenstr. 1".into(),
        })?;
        let prod = product_repo.create(&ProductDraft {
            sku: "W-1".into(),
            name: "Widget".into(),
            description: "Standard widget".into(),
            price: 1.0,
            stock: 1000,
        })?;

        // 12 invoices with totals 1.0 .. 12.0
        for n in 1..=12 {
            let inv = invoice_repo.create(&InvoiceDraft {
                partner_id: pid,
                invoice_date: "2025-01-15".into(),
                due_date: None,
                status: InvoiceStatus::Sent,
            })?;
            invoice_repo.add_item(inv, prod, n, None)?;
        }

        let reports = Reports::new(db.connection());
        let top = reports.top_invoices()?;
        assert_eq!(top.len(), TOP_LIMIT);
        assert_eq!(top[0].total_amount, 12.0);
        assert_eq!(top[0].partner, "Acme GmbH");
        for pair in top.windows(2) {
            assert!(pair[0].total_amount >= pair[1].total_amount);
        }
        Ok(())
    }

    #[test]
    fn test_reports_are_empty_without_sales() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        let reports = Reports::new(db.connection());
        assert!(reports.product_sales_summary()?.is_empty());
        assert!(reports.top_selling_products()?.is_empty());
        assert!(reports.top_invoices()?.is_empty());
        Ok(())
    }
}
