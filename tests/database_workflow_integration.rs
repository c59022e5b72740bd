//! Integration tests for the database functionality
//! These tests verify that different repository modules work together correctly

use billow::application::reports::{Reports, TOP_LIMIT};
use billow::application::{export, import};
use billow::domain::{InvoiceDraft, InvoiceStatus, PartnerDraft, ProductDraft};
use billow::infra::db::{Database, repository::*};

fn partner(name: &str, email: &str) -> PartnerDraft {
    PartnerDraft {
        name: name.into(),
        tax_id: "DE811234567".into(),
        email: email.into(),
        phone: "+49 30 2094 8100".into(),
        address: "Invalidenstr. 117, Berlin".into(),
    }
}

fn product(sku: &str, name: &str, price: f64) -> ProductDraft {
    ProductDraft {
        sku: sku.into(),
        name: name.into(),
        description: "Sample product".into(),
        price,
        stock: 50,
    }
}

#[test]
fn test_full_database_workflow() -> anyhow::Result<()> {
    // Test that all repository modules work together in a full workflow
    let db = Database::open_in_memory()?;
    let conn = db.connection();

    let partner_repo = PartnerRepository::new(conn.clone());
    let product_repo = ProductRepository::new(conn.clone());
    let invoice_repo = InvoiceRepository::new(conn.clone());
    let reports = Reports::new(conn);

    // Create partners and products
    let acme = partner_repo.create(&partner("Acme GmbH", "billing@acme.example"))?;
    let globex = partner_repo.create(&partner("Globex Oy", "ap@globex.example"))?;
    let cable = product_repo.create(&product("CBL-1", "HDMI cable", 9.9))?;
    let monitor = product_repo.create(&product("MON-1", "Monitor", 379.0))?;

    // Create an invoice and attach items
    let invoice = invoice_repo.create(&InvoiceDraft {
        partner_id: acme,
        invoice_date: "2025-06-02".into(),
        due_date: Some("2025-07-02".into()),
        status: InvoiceStatus::Draft,
    })?;

    invoice_repo.add_item(invoice, cable, 10, None)?;
    invoice_repo.add_item(invoice, monitor, 2, Some(350.0))?;

    // line_total = quantity * unit_price, total = sum of line totals
    let items = invoice_repo.items_for_invoice(invoice)?;
    assert_eq!(items.len(), 2);
    for item in &items {
        assert_eq!(item.line_total, item.quantity as f64 * item.unit_price);
    }
    let loaded = invoice_repo.find(invoice)?.unwrap();
    assert_eq!(loaded.total_amount, 10.0 * 9.9 + 2.0 * 350.0);

    // Move the invoice through its lifecycle
    let mut draft = loaded.draft();
    draft.status = InvoiceStatus::Sent;
    invoice_repo.update(invoice, &draft)?;
    draft.status = InvoiceStatus::Paid;
    invoice_repo.update(invoice, &draft)?;
    assert_eq!(
        invoice_repo.find(invoice)?.unwrap().status,
        InvoiceStatus::Paid
    );

    // A second, smaller invoice for the other partner
    let second = invoice_repo.create(&InvoiceDraft {
        partner_id: globex,
        invoice_date: "2025-06-17".into(),
        due_date: None,
        status: InvoiceStatus::Sent,
    })?;
    invoice_repo.add_item(second, cable, 3, None)?;

    // Reports see both invoices
    let summary = reports.product_sales_summary()?;
    assert_eq!(summary.len(), 2);
    let cable_row = summary.iter().find(|r| r.product == "HDMI cable").unwrap();
    assert_eq!(cable_row.qty_sold, 13);
    assert_eq!(cable_row.revenue, 13.0 * 9.9);

    let top = reports.top_invoices()?;
    assert!(top.len() <= TOP_LIMIT);
    assert_eq!(top[0].invoice_id, invoice);
    assert_eq!(top[0].partner, "Acme GmbH");

    // Referential guards: partner and product deletions are blocked
    assert!(partner_repo.delete(acme).is_err());
    assert!(product_repo.delete(cable).is_err());

    // Deleting the invoices releases them
    invoice_repo.delete(invoice)?;
    invoice_repo.delete(second)?;
    partner_repo.delete(acme)?;
    product_repo.delete(cable)?;

    Ok(())
}

#[test]
fn test_csv_round_trip_through_databases() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let partner_repo = db.partner_repo();
    let product_repo = db.product_repo();

    for n in 0..4 {
        partner_repo.create(&partner(
            &format!("Partner {n}"),
            &format!("ap{n}@partners.example"),
        ))?;
        product_repo.create(&product(
            &format!("SKU-{n}"),
            &format!("Product {n}"),
            1.5 * (n + 1) as f64,
        ))?;
    }

    let mut partner_csv = Vec::new();
    let mut product_csv = Vec::new();
    assert_eq!(export::export_partners(&partner_repo, &mut partner_csv)?, 4);
    assert_eq!(export::export_products(&product_repo, &mut product_csv)?, 4);

    // Import both files into a fresh database
    let db2 = Database::open_in_memory()?;
    let partner_repo2 = db2.partner_repo();
    let product_repo2 = db2.product_repo();

    let partner_report = import::import_partners(&partner_repo2, partner_csv.as_slice())?;
    let product_report = import::import_products(&product_repo2, product_csv.as_slice())?;
    assert_eq!(partner_report.added, 4);
    assert_eq!(product_report.added, 4);
    assert!(partner_report.errors.is_empty());
    assert!(product_report.errors.is_empty());

    // Same record count and field values
    let original_products = product_repo.list_all()?;
    let imported_products = product_repo2.list_all()?;
    assert_eq!(original_products.len(), imported_products.len());
    for (a, b) in original_products.iter().zip(&imported_products) {
        assert_eq!(a.sku, b.sku);
        assert_eq!(a.name, b.name);
        assert_eq!(a.description, b.description);
        assert_eq!(a.price, b.price);
        assert_eq!(a.stock, b.stock);
    }

    Ok(())
}
