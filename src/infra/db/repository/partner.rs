use crate::domain::{Partner, PartnerDraft, PartnerError, PartnerId};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Repository for partner operations
pub struct PartnerRepository {
    conn: Arc<Mutex<Connection>>,
}

fn db_err(e: rusqlite::Error) -> PartnerError {
    match &e {
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            PartnerError::Referenced
        }
        _ => PartnerError::OperationFailed(e.into()),
    }
}

impl PartnerRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn create(&self, draft: &PartnerDraft) -> Result<PartnerId, PartnerError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO partners (name, tax_id, email, phone, address) VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                &draft.name,
                &draft.tax_id,
                &draft.email,
                &draft.phone,
                &draft.address,
            ),
        )
        .map_err(db_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn update(&self, id: PartnerId, draft: &PartnerDraft) -> Result<(), PartnerError> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute(
                "UPDATE partners SET name = ?1, tax_id = ?2, email = ?3, phone = ?4, address = ?5 WHERE id = ?6",
                (
                    &draft.name,
                    &draft.tax_id,
                    &draft.email,
                    &draft.phone,
                    &draft.address,
                    id,
                ),
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(PartnerError::NotFound(id));
        }
        Ok(())
    }

    /// Delete a partner. Fails with [`PartnerError::Referenced`] when
    /// invoices still point at it.
    pub fn delete(&self, id: PartnerId) -> Result<(), PartnerError> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute("DELETE FROM partners WHERE id = ?1", [id])
            .map_err(db_err)?;
        if changed == 0 {
            return Err(PartnerError::NotFound(id));
        }
        Ok(())
    }

    pub fn find(&self, id: PartnerId) -> Result<Option<Partner>, PartnerError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT id, name, tax_id, email, phone, address FROM partners WHERE id = ?1")
            .map_err(db_err)?;
        let mut rows = stmt.query([id]).map_err(db_err)?;
        match rows.next().map_err(db_err)? {
            Some(row) => Ok(Some(Self::row_to_partner(row).map_err(db_err)?)),
            None => Ok(None),
        }
    }

    pub fn list_all(&self) -> Result<Vec<Partner>, PartnerError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT id, name, tax_id, email, phone, address FROM partners ORDER BY id")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], Self::row_to_partner)
            .map_err(db_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(db_err)
    }

    fn row_to_partner(row: &rusqlite::Row<'_>) -> rusqlite::Result<Partner> {
        Ok(Partner {
            id: row.get(0)?,
            name: row.get(1)?,
            tax_id: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            email: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            phone: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            address: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        })
    }
}
