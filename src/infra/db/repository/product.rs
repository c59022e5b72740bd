use crate::domain::{Product, ProductDraft, ProductError, ProductId};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Repository for product operations
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

// SQLite extended result code for UNIQUE constraint violations.
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

fn write_err(sku: &str, e: rusqlite::Error) -> ProductError {
    match &e {
        rusqlite::Error::SqliteFailure(f, _) if f.extended_code == SQLITE_CONSTRAINT_UNIQUE => {
            ProductError::DuplicateSku(sku.to_string())
        }
        _ => ProductError::OperationFailed(e.into()),
    }
}

fn db_err(e: rusqlite::Error) -> ProductError {
    match &e {
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            ProductError::Referenced
        }
        _ => ProductError::OperationFailed(e.into()),
    }
}

impl ProductRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn create(&self, draft: &ProductDraft) -> Result<ProductId, ProductError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO products (sku, name, description, price, stock) VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                &draft.sku,
                &draft.name,
                &draft.description,
                draft.price,
                draft.stock,
            ),
        )
        .map_err(|e| write_err(&draft.sku, e))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<(), ProductError> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute(
                "UPDATE products SET sku = ?1, name = ?2, description = ?3, price = ?4, stock = ?5 WHERE id = ?6",
                (
                    &draft.sku,
                    &draft.name,
                    &draft.description,
                    draft.price,
                    draft.stock,
                    id,
                ),
            )
            .map_err(|e| write_err(&draft.sku, e))?;
        if changed == 0 {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    /// Delete a product. Fails with [`ProductError::Referenced`] when
    /// invoice items still point at it.
    pub fn delete(&self, id: ProductId) -> Result<(), ProductError> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute("DELETE FROM products WHERE id = ?1", [id])
            .map_err(db_err)?;
        if changed == 0 {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    pub fn find(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, sku, name, description, price, stock FROM products WHERE id = ?1",
            )
            .map_err(db_err)?;
        let mut rows = stmt.query([id]).map_err(db_err)?;
        match rows.next().map_err(db_err)? {
            Some(row) => Ok(Some(Self::row_to_product(row).map_err(db_err)?)),
            None => Ok(None),
        }
    }

    pub fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT id, sku, name, description, price, stock FROM products ORDER BY id")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], Self::row_to_product)
            .map_err(db_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(db_err)
    }

    fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
        Ok(Product {
            id: row.get(0)?,
            sku: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            name: row.get(2)?,
            description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            price: row.get(4)?,
            stock: row.get(5)?,
        })
    }
}
