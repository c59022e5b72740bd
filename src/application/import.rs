//! CSV import for partners and products.
//!
//! The header must match the table columns exactly; a leading `id` column
//! is accepted and ignored so that exported files can be re-imported
//! verbatim. Rows are validated individually and failures do not abort the
//! rest of the file.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::{ImportError, PartnerDraft, ProductDraft, validate};
use crate::infra::db::repository::{PartnerRepository, ProductRepository};

/// Column layout of the partners table, minus the id.
pub const PARTNER_COLUMNS: [&str; 5] = ["name", "tax_id", "email", "phone", "address"];

/// Column layout of the products table, minus the id.
pub const PRODUCT_COLUMNS: [&str; 5] = ["sku", "name", "description", "price", "stock"];

/// Outcome of one import run: how many rows made it in, and what went
/// wrong with the ones that did not.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub added: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        format!("Added {} rows. Errors: {}", self.added, self.errors.len())
    }
}

/// Check the header against the expected columns. Returns `true` when the
/// file carries a leading `id` column (which the import skips).
fn check_header(headers: &StringRecord, expected: &[&str]) -> Result<bool, ImportError> {
    let cols: Vec<&str> = headers.iter().collect();
    if cols == expected {
        return Ok(false);
    }
    if cols.len() == expected.len() + 1 && cols[0] == "id" && &cols[1..] == expected {
        return Ok(true);
    }
    Err(ImportError::HeaderMismatch {
        expected: expected.join(", "),
    })
}

fn field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or_default().trim().to_string()
}

/// Import partners from CSV. Each row is validated before insertion;
/// failures are collected as `Row N: ...` entries.
pub fn import_partners<R: Read>(
    repo: &PartnerRepository,
    input: R,
) -> Result<ImportReport, ImportError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let headers = reader
        .headers()
        .context("failed to read CSV header")?
        .clone();
    let has_id = check_header(&headers, &PARTNER_COLUMNS)?;
    let offset = usize::from(has_id);

    let mut report = ImportReport::default();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                report.errors.push(format!("Row {row}: {e}"));
                continue;
            }
        };

        let draft = PartnerDraft {
            name: field(&record, offset),
            tax_id: field(&record, offset + 1),
            email: field(&record, offset + 2),
            phone: field(&record, offset + 3),
            address: field(&record, offset + 4),
        };
        let errors = validate::validate_partner(&draft);
        if !errors.is_empty() {
            report.errors.push(format!("Row {row}: {}", errors.join("; ")));
            continue;
        }
        match repo.create(&draft) {
            Ok(_) => report.added += 1,
            Err(e) => report.errors.push(format!("Row {row}: DB {e}")),
        }
    }

    log::info!(
        "partner import finished: {} added, {} errors",
        report.added,
        report.errors.len()
    );
    Ok(report)
}

/// Import products from CSV. Price and stock must parse as a non-negative
/// number and integer; the SKU must not collide with an existing one.
pub fn import_products<R: Read>(
    repo: &ProductRepository,
    input: R,
) -> Result<ImportReport, ImportError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let headers = reader
        .headers()
        .context("failed to read CSV header")?
        .clone();
    let has_id = check_header(&headers, &PRODUCT_COLUMNS)?;
    let offset = usize::from(has_id);

    let mut report = ImportReport::default();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                report.errors.push(format!("Row {row}: {e}"));
                continue;
            }
        };

        let sku = field(&record, offset);
        let name = field(&record, offset + 1);
        let description = field(&record, offset + 2);
        let price = field(&record, offset + 3);
        let stock = field(&record, offset + 4);

        let errors = validate::validate_product_fields(&sku, &name, &description, &price, &stock);
        if !errors.is_empty() {
            report.errors.push(format!("Row {row}: {}", errors.join("; ")));
            continue;
        }

        // Validation guarantees these parse.
        let draft = ProductDraft {
            sku,
            name,
            description,
            price: price.parse().unwrap_or_default(),
            stock: stock.parse().unwrap_or_default(),
        };
        match repo.create(&draft) {
            Ok(_) => report.added += 1,
            Err(e) => report.errors.push(format!("Row {row}: DB {e}")),
        }
    }

    log::info!(
        "product import finished: {} added, {} errors",
        report.added,
        report.errors.len()
    );
    Ok(report)
}

/// Import partners from a CSV file on disk.
pub fn import_partners_csv(
    repo: &PartnerRepository,
    path: &Path,
) -> Result<ImportReport, ImportError> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    import_partners(repo, file)
}

/// Import products from a CSV file on disk.
pub fn import_products_csv(
    repo: &ProductRepository,
    path: &Path,
) -> Result<ImportReport, ImportError> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    import_products(repo, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::db::Database;

    #[test]
    fn test_import_partners_adds_valid_rows() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        let repo = db.partner_repo();

        let csv = "\
name,tax_id,email,phone,address
Acme GmbH,DE1,billing@acme.example,+49 30 1,Invalidenstr. 1
Globex Corp,US2,ap@globex.example,+1 555 2,1 Globex Way
";
        let report = import_partners(&repo, csv.as_bytes())?;
        assert_eq!(report.added, 2);
        assert!(report.errors.is_empty());

        let partners = repo.list_all()?;
        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0].name, "Acme GmbH");
        assert_eq!(partners[1].email, "ap@globex.example");
        Ok(())
    }

    #[test]
    fn test_import_partners_rejects_invalid_email() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        let repo = db.partner_repo();

        let csv = "\
name,tax_id,email,phone,address
Acme GmbH,DE1,not-an-email,+49 30 1,Invalidenstr. 1
";
        let report = import_partners(&repo, csv.as_bytes())?;
        assert_eq!(report.added, 0);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Row 1:"));
        assert!(report.errors[0].contains("email format is invalid"));
        assert!(repo.list_all()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_import_continues_past_bad_rows() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        let repo = db.partner_repo();

        let csv = "\
name,tax_id,email,phone,address
,DE1,billing@acme.example,+49 30 1,Invalidenstr. 1
Globex Corp,US2,ap@globex.example,+1 555 2,1 Globex Way
";
        let report = import_partners(&repo, csv.as_bytes())?;
        assert_eq!(report.added, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(repo.list_all()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_import_rejects_unexpected_header() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        let repo = db.partner_repo();

        let csv = "name,email\nAcme,billing@acme.example\n";
        let result = import_partners(&repo, csv.as_bytes());
        assert!(matches!(result, Err(ImportError::HeaderMismatch { .. })));
        Ok(())
    }

    #[test]
    fn test_import_accepts_leading_id_column() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        let repo = db.partner_repo();

        let csv = "\
id,name,tax_id,email,phone,address
7,Acme GmbH,DE1,billing@acme.example,+49 30 1,Invalidenstr. 1
";
        let report = import_partners(&repo, csv.as_bytes())?;
        assert_eq!(report.added, 1);
        // The id column is ignored; the database assigns its own
        let partners = repo.list_all()?;
        assert_eq!(partners[0].id, 1);
        Ok(())
    }

    #[test]
    fn test_import_products_parses_numeric_fields() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        let repo = db.product_repo();

        let csv = "\
sku,name,description,price,stock
W-1,Widget,Standard widget,4.50,12
G-1,Gadget,Premium gadget,bad,3
";
        let report = import_products(&repo, csv.as_bytes())?;
        assert_eq!(report.added, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("price must be a valid number"));

        let products = repo.list_all()?;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, 4.5);
        assert_eq!(products[0].stock, 12);
        Ok(())
    }

    #[test]
    fn test_import_products_reports_duplicate_sku() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        let repo = db.product_repo();

        let csv = "\
sku,name,description,price,stock
W-1,Widget,Standard widget,4.50,12
W-1,Widget again,Same SKU,5.00,1
";
        let report = import_products(&repo, csv.as_bytes())?;
        assert_eq!(report.added, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Row 2: DB"));
        Ok(())
    }
}
