use crate::domain::{
    InvoiceDraft, InvoiceError, InvoiceStatus, PartnerDraft, PartnerError, ProductDraft,
    ProductError,
};
use crate::infra::db::Database;
use crate::infra::db::repository::*;

fn sample_partner(name: &str) -> PartnerDraft {
    PartnerDraft {
        name: name.to_string(),
        tax_id: "DE123456789".into(),
        email: "billing@acme.example".into(),
        phone: "+49 30 1234567".into(),
        address: "Invalidenstr. 1, Berlin".into(),
    }
}

fn sample_product(sku: &str, price: f64) -> ProductDraft {
    ProductDraft {
        sku: sku.to_string(),
        name: format!("Product {sku}"),
        description: "A thing we sell".into(),
        price,
        stock: 10,
    }
}

#[test]
fn test_partner_repository_crud() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = PartnerRepository::new(db.connection());

    let id = repo.create(&sample_partner("Acme GmbH"))?;
    let all = repo.list_all()?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Acme GmbH");
    assert_eq!(all[0].id, id);

    let mut draft = all[0].draft();
    draft.phone = "+49 30 7654321".into();
    repo.update(id, &draft)?;
    let found = repo.find(id)?.unwrap();
    assert_eq!(found.phone, "+49 30 7654321");

    repo.delete(id)?;
    assert!(repo.find(id)?.is_none());

    // Deleting again reports NotFound
    assert!(matches!(repo.delete(id), Err(PartnerError::NotFound(_))));
    Ok(())
}

#[test]
fn test_partner_with_invoices_cannot_be_deleted() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let partner_repo = PartnerRepository::new(db.connection());
    let invoice_repo = InvoiceRepository::new(db.connection());

    let pid = partner_repo.create(&sample_partner("Acme GmbH"))?;
    invoice_repo.create(&InvoiceDraft {
        partner_id: pid,
        invoice_date: "2025-01-15".into(),
        due_date: None,
        status: InvoiceStatus::Draft,
    })?;

    assert!(matches!(
        partner_repo.delete(pid),
        Err(PartnerError::Referenced)
    ));
    // The partner is still there
    assert!(partner_repo.find(pid)?.is_some());
    Ok(())
}

#[test]
fn test_product_repository_crud_and_duplicate_sku() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = ProductRepository::new(db.connection());

    let id = repo.create(&sample_product("SKU-1", 4.5))?;
    assert!(matches!(
        repo.create(&sample_product("SKU-1", 9.0)),
        Err(ProductError::DuplicateSku(_))
    ));

    let mut draft = repo.find(id)?.unwrap().draft();
    draft.price = 5.0;
    draft.stock = 42;
    repo.update(id, &draft)?;
    let found = repo.find(id)?.unwrap();
    assert_eq!(found.price, 5.0);
    assert_eq!(found.stock, 42);

    repo.delete(id)?;
    assert!(repo.list_all()?.is_empty());
    Ok(())
}

#[test]
fn test_referenced_product_cannot_be_deleted() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let partner_repo = PartnerRepository::new(db.connection());
    let product_repo = ProductRepository::new(db.connection());
    let invoice_repo = InvoiceRepository::new(db.connection());

    let pid = partner_repo.create(&sample_partner("Acme GmbH"))?;
    let prod = product_repo.create(&sample_product("SKU-1", 4.5))?;
    let inv = invoice_repo.create(&InvoiceDraft {
        partner_id: pid,
        invoice_date: "2025-01-15".into(),
        due_date: None,
        status: InvoiceStatus::Draft,
    })?;
    invoice_repo.add_item(inv, prod, 2, None)?;

    assert!(matches!(
        product_repo.delete(prod),
        Err(ProductError::Referenced)
    ));
    Ok(())
}

#[test]
fn test_invoice_totals_follow_item_mutations() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let partner_repo = PartnerRepository::new(db.connection());
    let product_repo = ProductRepository::new(db.connection());
    let invoice_repo = InvoiceRepository::new(db.connection());

    let pid = partner_repo.create(&sample_partner("Acme GmbH"))?;
    let widget = product_repo.create(&sample_product("WIDGET", 4.5))?;
    let gadget = product_repo.create(&sample_product("GADGET", 10.0))?;

    let inv = invoice_repo.create(&InvoiceDraft {
        partner_id: pid,
        invoice_date: "2025-01-15".into(),
        due_date: Some("2025-02-15".into()),
        status: InvoiceStatus::Draft,
    })?;
    assert_eq!(invoice_repo.find(inv)?.unwrap().total_amount, 0.0);

    // Default unit price comes from the product
    let item1 = invoice_repo.add_item(inv, widget, 2, None)?;
    let items = invoice_repo.items_for_invoice(inv)?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].unit_price, 4.5);
    assert_eq!(items[0].line_total, 9.0);
    assert_eq!(invoice_repo.find(inv)?.unwrap().total_amount, 9.0);

    // Explicit unit price overrides the product price
    invoice_repo.add_item(inv, gadget, 3, Some(8.0))?;
    assert_eq!(invoice_repo.find(inv)?.unwrap().total_amount, 33.0);

    invoice_repo.delete_item(item1)?;
    assert_eq!(invoice_repo.find(inv)?.unwrap().total_amount, 24.0);

    assert!(matches!(
        invoice_repo.delete_item(item1),
        Err(InvoiceError::ItemNotFound(_))
    ));
    Ok(())
}

#[test]
fn test_deleting_invoice_cascades_to_items() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let partner_repo = PartnerRepository::new(db.connection());
    let product_repo = ProductRepository::new(db.connection());
    let invoice_repo = InvoiceRepository::new(db.connection());

    let pid = partner_repo.create(&sample_partner("Acme GmbH"))?;
    let prod = product_repo.create(&sample_product("SKU-1", 4.5))?;
    let inv = invoice_repo.create(&InvoiceDraft {
        partner_id: pid,
        invoice_date: "2025-01-15".into(),
        due_date: None,
        status: InvoiceStatus::Draft,
    })?;
    invoice_repo.add_item(inv, prod, 1, None)?;

    invoice_repo.delete(inv)?;
    assert!(invoice_repo.items_for_product(prod)?.is_empty());
    // And the product became deletable again
    product_repo.delete(prod)?;
    Ok(())
}

#[test]
fn test_invoice_status_round_trips_through_storage() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let partner_repo = PartnerRepository::new(db.connection());
    let invoice_repo = InvoiceRepository::new(db.connection());

    let pid = partner_repo.create(&sample_partner("Acme GmbH"))?;
    let inv = invoice_repo.create(&InvoiceDraft {
        partner_id: pid,
        invoice_date: "2025-01-15".into(),
        due_date: None,
        status: InvoiceStatus::Sent,
    })?;

    // Any status is settable at any time, including moving backwards
    for status in InvoiceStatus::ALL {
        let mut draft = invoice_repo.find(inv)?.unwrap().draft();
        draft.status = status;
        invoice_repo.update(inv, &draft)?;
        assert_eq!(invoice_repo.find(inv)?.unwrap().status, status);
    }
    Ok(())
}

#[test]
fn test_invoices_for_partner() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let partner_repo = PartnerRepository::new(db.connection());
    let invoice_repo = InvoiceRepository::new(db.connection());

    let a = partner_repo.create(&sample_partner("Partner A"))?;
    let b = partner_repo.create(&sample_partner("Partner B"))?;
    for (partner_id, date) in [(a, "2025-01-01"), (a, "2025-01-02"), (b, "2025-01-03")] {
        invoice_repo.create(&InvoiceDraft {
            partner_id,
            invoice_date: date.into(),
            due_date: None,
            status: InvoiceStatus::Draft,
        })?;
    }

    assert_eq!(invoice_repo.list_for_partner(a)?.len(), 2);
    assert_eq!(invoice_repo.list_for_partner(b)?.len(), 1);
    assert_eq!(invoice_repo.list_all()?.len(), 3);
    Ok(())
}
