//! Empties every table while keeping the schema in place.

use billow::infra::db::Database;
use rusqlite::Connection;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    run()
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = Database::default_path();

    if !db_path.exists() {
        println!("Database does not exist at: {}", db_path.display());
        println!("No reset needed.");
        return Ok(());
    }

    println!("Connecting to database at: {}", db_path.display());

    let conn = Connection::open(&db_path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    let tables_exist: i32 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='invoices'",
        [],
        |row| row.get(0),
    )?;

    if tables_exist == 0 {
        println!("Tables do not exist. No reset needed.");
        return Ok(());
    }

    let count = |table: &str| -> Result<i64, rusqlite::Error> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
    };

    println!("Current record counts:");
    println!("  Partners: {}", count("partners")?);
    println!("  Products: {}", count("products")?);
    println!("  Invoices: {}", count("invoices")?);
    println!("  Invoice items: {}", count("invoice_items")?);

    // Delete in dependency order so foreign keys never block the reset
    conn.execute("DELETE FROM invoice_items", [])?;
    println!("Cleared invoice_items table");

    conn.execute("DELETE FROM invoices", [])?;
    println!("Cleared invoices table");

    conn.execute("DELETE FROM products", [])?;
    println!("Cleared products table");

    conn.execute("DELETE FROM partners", [])?;
    println!("Cleared partners table");

    let partners_after = count("partners")?;
    let products_after = count("products")?;
    let invoices_after = count("invoices")?;
    let items_after = count("invoice_items")?;

    println!("\nAfter reset:");
    println!("  Partners: {partners_after}");
    println!("  Products: {products_after}");
    println!("  Invoices: {invoices_after}");
    println!("  Invoice items: {items_after}");

    if partners_after == 0 && products_after == 0 && invoices_after == 0 && items_after == 0 {
        println!("\nDatabase successfully reset! All records have been deleted.");
    } else {
        eprintln!("\nWarning: Some records still exist in the database.");
    }

    println!("Database location: {}", db_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use billow::domain::PartnerDraft;

    #[test]
    fn test_reset_db_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.sqlite");
        unsafe {
            std::env::set_var("BILLOW_DB_PATH", &path);
        }

        // Use a real database init to create tables first
        {
            let db = Database::open_at(path.clone()).unwrap();
            db.partner_repo()
                .create(&PartnerDraft {
                    name: "Acme GmbH".into(),
                    tax_id: "DE1".into(),
                    email: "billing@acme.example".into(),
                    phone: "+49 30 1".into(),
                    address: "Invalidenstr. 1".into(),
                })
                .unwrap();
        }

        run().unwrap();

        let conn = Connection::open(&path).unwrap();
        let count: i32 = conn
            .query_row("SELECT COUNT(*) FROM partners", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);

        unsafe {
            std::env::remove_var("BILLOW_DB_PATH");
        }
    }
}
