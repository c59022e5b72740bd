//! CSV export of table contents, column layout matching the schema.
//!
//! Exports include the id column; the importer accepts and ignores it, so
//! an exported file can be re-imported as-is.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::infra::db::repository::{InvoiceRepository, PartnerRepository, ProductRepository};

/// Write all partners as CSV. Returns the number of rows written.
pub fn export_partners<W: Write>(repo: &PartnerRepository, out: W) -> Result<usize> {
    let mut writer = WriterBuilder::new().from_writer(out);
    writer.write_record(["id", "name", "tax_id", "email", "phone", "address"])?;
    let partners = repo.list_all()?;
    for p in &partners {
        writer.write_record([
            p.id.to_string(),
            p.name.clone(),
            p.tax_id.clone(),
            p.email.clone(),
            p.phone.clone(),
            p.address.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(partners.len())
}

/// Write all products as CSV. Returns the number of rows written.
pub fn export_products<W: Write>(repo: &ProductRepository, out: W) -> Result<usize> {
    let mut writer = WriterBuilder::new().from_writer(out);
    writer.write_record(["id", "sku", "name", "description", "price", "stock"])?;
    let products = repo.list_all()?;
    for p in &products {
        writer.write_record([
            p.id.to_string(),
            p.sku.clone(),
            p.name.clone(),
            p.description.clone(),
            p.price.to_string(),
            p.stock.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(products.len())
}

/// Write all invoices as CSV. Returns the number of rows written.
pub fn export_invoices<W: Write>(repo: &InvoiceRepository, out: W) -> Result<usize> {
    let mut writer = WriterBuilder::new().from_writer(out);
    writer.write_record([
        "id",
        "partner_id",
        "invoice_date",
        "due_date",
        "status",
        "total_amount",
    ])?;
    let invoices = repo.list_all()?;
    for inv in &invoices {
        writer.write_record([
            inv.id.to_string(),
            inv.partner_id.to_string(),
            inv.invoice_date.clone(),
            inv.due_date.clone().unwrap_or_default(),
            inv.status.to_string(),
            inv.total_amount.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(invoices.len())
}

fn create_file(path: &Path) -> Result<std::fs::File> {
    std::fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

pub fn export_partners_csv(repo: &PartnerRepository, path: &Path) -> Result<usize> {
    let written = export_partners(repo, create_file(path)?)?;
    log::info!("exported {} partners to {}", written, path.display());
    Ok(written)
}

pub fn export_products_csv(repo: &ProductRepository, path: &Path) -> Result<usize> {
    let written = export_products(repo, create_file(path)?)?;
    log::info!("exported {} products to {}", written, path.display());
    Ok(written)
}

pub fn export_invoices_csv(repo: &InvoiceRepository, path: &Path) -> Result<usize> {
    let written = export_invoices(repo, create_file(path)?)?;
    log::info!("exported {} invoices to {}", written, path.display());
    Ok(written)
}
