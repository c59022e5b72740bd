use crate::domain::{
    Invoice, InvoiceDraft, InvoiceError, InvoiceId, InvoiceItem, InvoiceItemId, InvoiceStatus,
    PartnerId, ProductId, line_total,
};
use rusqlite::Connection;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// Repository for invoice and invoice item operations.
///
/// Item mutations recompute the owning invoice's `total_amount` inside the
/// same transaction, so the stored total always equals the sum of the line
/// totals.
pub struct InvoiceRepository {
    conn: Arc<Mutex<Connection>>,
}

fn db_err(e: rusqlite::Error) -> InvoiceError {
    InvoiceError::OperationFailed(e.into())
}

impl InvoiceRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn create(&self, draft: &InvoiceDraft) -> Result<InvoiceId, InvoiceError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO invoices (partner_id, invoice_date, due_date, status, total_amount) VALUES (?1, ?2, ?3, ?4, 0)",
            (
                draft.partner_id,
                &draft.invoice_date,
                &draft.due_date,
                draft.status.to_string(),
            ),
        )
        .map_err(db_err)?;
        Ok(conn.last_insert_rowid())
    }

    /// Update the invoice header fields. The total is left untouched; it
    /// only changes through item mutations.
    pub fn update(&self, id: InvoiceId, draft: &InvoiceDraft) -> Result<(), InvoiceError> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute(
                "UPDATE invoices SET partner_id = ?1, invoice_date = ?2, due_date = ?3, status = ?4 WHERE id = ?5",
                (
                    draft.partner_id,
                    &draft.invoice_date,
                    &draft.due_date,
                    draft.status.to_string(),
                    id,
                ),
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(InvoiceError::NotFound(id));
        }
        Ok(())
    }

    /// Delete an invoice; its items go with it (ON DELETE CASCADE).
    pub fn delete(&self, id: InvoiceId) -> Result<(), InvoiceError> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute("DELETE FROM invoices WHERE id = ?1", [id])
            .map_err(db_err)?;
        if changed == 0 {
            return Err(InvoiceError::NotFound(id));
        }
        Ok(())
    }

    pub fn find(&self, id: InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, partner_id, invoice_date, due_date, status, total_amount FROM invoices WHERE id = ?1",
            )
            .map_err(db_err)?;
        let mut rows = stmt.query([id]).map_err(db_err)?;
        match rows.next().map_err(db_err)? {
            Some(row) => Ok(Some(Self::row_to_invoice(row).map_err(db_err)?)),
            None => Ok(None),
        }
    }

    pub fn list_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, partner_id, invoice_date, due_date, status, total_amount FROM invoices ORDER BY id",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], Self::row_to_invoice)
            .map_err(db_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(db_err)
    }

    pub fn list_for_partner(&self, partner_id: PartnerId) -> Result<Vec<Invoice>, InvoiceError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, partner_id, invoice_date, due_date, status, total_amount FROM invoices WHERE partner_id = ?1 ORDER BY id",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map([partner_id], Self::row_to_invoice)
            .map_err(db_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(db_err)
    }

    pub fn items_for_invoice(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<Vec<InvoiceItem>, InvoiceError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, invoice_id, product_id, quantity, unit_price, line_total FROM invoice_items WHERE invoice_id = ?1 ORDER BY id",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map([invoice_id], Self::row_to_item)
            .map_err(db_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(db_err)
    }

    /// Items across all invoices that reference the given product.
    pub fn items_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<InvoiceItem>, InvoiceError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, invoice_id, product_id, quantity, unit_price, line_total FROM invoice_items WHERE product_id = ?1 ORDER BY invoice_id, id",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map([product_id], Self::row_to_item)
            .map_err(db_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(db_err)
    }

    /// Attach an item to an invoice.
    ///
    /// When `unit_price` is `None` the product's current price is captured.
    /// The line total is `quantity * unit_price` and the invoice total is
    /// recomputed from the database in the same transaction.
    pub fn add_item(
        &self,
        invoice_id: InvoiceId,
        product_id: ProductId,
        quantity: i64,
        unit_price: Option<f64>,
    ) -> Result<InvoiceItemId, InvoiceError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction().map_err(db_err)?;

        let unit_price = match unit_price {
            Some(p) => p,
            None => tx
                .query_row(
                    "SELECT price FROM products WHERE id = ?1",
                    [product_id],
                    |row| row.get(0),
                )
                .map_err(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => InvoiceError::OperationFailed(
                        anyhow::anyhow!("Product not found: {product_id}"),
                    ),
                    other => db_err(other),
                })?,
        };

        tx.execute(
            "INSERT INTO invoice_items (invoice_id, product_id, quantity, unit_price, line_total) VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                invoice_id,
                product_id,
                quantity,
                unit_price,
                line_total(quantity, unit_price),
            ),
        )
        .map_err(db_err)?;
        let item_id = tx.last_insert_rowid();

        Self::recompute_total(&tx, invoice_id)?;
        tx.commit().map_err(db_err)?;
        Ok(item_id)
    }

    /// Remove an item and recompute the owning invoice's total.
    pub fn delete_item(&self, item_id: InvoiceItemId) -> Result<(), InvoiceError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction().map_err(db_err)?;

        let invoice_id: InvoiceId = tx
            .query_row(
                "SELECT invoice_id FROM invoice_items WHERE id = ?1",
                [item_id],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => InvoiceError::ItemNotFound(item_id),
                other => db_err(other),
            })?;

        tx.execute("DELETE FROM invoice_items WHERE id = ?1", [item_id])
            .map_err(db_err)?;

        Self::recompute_total(&tx, invoice_id)?;
        tx.commit().map_err(db_err)?;
        Ok(())
    }

    fn recompute_total(conn: &Connection, invoice_id: InvoiceId) -> Result<(), InvoiceError> {
        conn.execute(
            "UPDATE invoices SET total_amount = (SELECT COALESCE(SUM(line_total), 0) FROM invoice_items WHERE invoice_id = ?1) WHERE id = ?1",
            [invoice_id],
        )
        .map_err(db_err)?;
        Ok(())
    }

    fn row_to_invoice(row: &rusqlite::Row<'_>) -> rusqlite::Result<Invoice> {
        let status_str: String = row.get(4)?;
        Ok(Invoice {
            id: row.get(0)?,
            partner_id: row.get(1)?,
            invoice_date: row.get(2)?,
            due_date: row.get(3)?,
            // FromStr is lenient and falls back to Draft for unknown labels
            status: InvoiceStatus::from_str(&status_str).unwrap_or_default(),
            total_amount: row.get(5)?,
        })
    }

    fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<InvoiceItem> {
        Ok(InvoiceItem {
            id: row.get(0)?,
            invoice_id: row.get(1)?,
            product_id: row.get(2)?,
            quantity: row.get(3)?,
            unit_price: row.get(4)?,
            line_total: row.get(5)?,
        })
    }
}
