//! Inserts realistic sample data so the app has something to show.

use billow::domain::{InvoiceDraft, InvoiceStatus, PartnerDraft, ProductDraft};
use billow::infra::db::Database;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let db = Database::open()?;
    println!("Connecting to database at: {}", db.path().display());

    let partner_repo = db.partner_repo();
    let product_repo = db.product_repo();
    let invoice_repo = db.invoice_repo();

    let partners = vec![
        PartnerDraft {
            name: "Acme Fabrication GmbH".into(),
            tax_id: "DE811234567".into(),
            email: "accounts@acme-fab.example".into(),
            phone: "+49 30 2094 8100".into(),
            address: "Invalidenstr. 117, 10115 Berlin".into(),
        },
        PartnerDraft {
            name: "Globex Retail Oy".into(),
            tax_id: "FI26154522".into(),
            email: "ap@globex-retail.example".into(),
            phone: "+358 9 4272 0500".into(),
            address: "Mannerheimintie 12, 00100 Helsinki".into(),
        },
        PartnerDraft {
            name: "Initech Solutions s.r.o.".into(),
            tax_id: "CZ27082440".into(),
            email: "billing@initech.example".into(),
            phone: "+420 234 094 111".into(),
            address: "Karolinská 654/2, 186 00 Praha".into(),
        },
    ];

    let mut partner_ids = Vec::new();
    for partner in &partners {
        let id = partner_repo.create(partner)?;
        partner_ids.push(id);
        println!("Inserted partner: {} (id {id})", partner.name);
    }

    let products = vec![
        ProductDraft {
            sku: "CBL-HDMI-2M".into(),
            name: "HDMI cable 2m".into(),
            description: "Braided HDMI 2.1 cable, 2 meters".into(),
            price: 9.9,
            stock: 240,
        },
        ProductDraft {
            sku: "MON-27-4K".into(),
            name: "27\" 4K monitor".into(),
            description: "27 inch IPS panel, 3840x2160".into(),
            price: 379.0,
            stock: 18,
        },
        ProductDraft {
            sku: "DOCK-USBC".into(),
            name: "USB-C docking station".into(),
            description: "Dual display dock, 96W power delivery".into(),
            price: 189.5,
            stock: 42,
        },
        ProductDraft {
            sku: "KBD-TKL-DE".into(),
            name: "Mechanical keyboard TKL".into(),
            description: "Tenkeyless, DE layout, brown switches".into(),
            price: 89.0,
            stock: 65,
        },
    ];

    let mut product_ids = Vec::new();
    for product in &products {
        let id = product_repo.create(product)?;
        product_ids.push(id);
        println!("Inserted product: {} (id {id})", product.name);
    }

    // A few invoices in different lifecycle stages. Items capture the
    // product price, so totals come out of the repository computation.
    let invoices: Vec<(usize, &str, Option<&str>, InvoiceStatus, Vec<(usize, i64)>)> = vec![
        (
            0,
            "2025-06-02",
            Some("2025-07-02"),
            InvoiceStatus::Paid,
            vec![(1, 4), (2, 4), (0, 10)],
        ),
        (
            1,
            "2025-06-17",
            Some("2025-07-17"),
            InvoiceStatus::Sent,
            vec![(3, 12), (0, 24)],
        ),
        (
            2,
            "2025-07-01",
            None,
            InvoiceStatus::Draft,
            vec![(2, 2)],
        ),
        (
            0,
            "2025-07-08",
            Some("2025-08-07"),
            InvoiceStatus::Cancelled,
            vec![(1, 1)],
        ),
    ];

    for (partner_idx, date, due, status, items) in invoices {
        let invoice_id = invoice_repo.create(&InvoiceDraft {
            partner_id: partner_ids[partner_idx],
            invoice_date: date.into(),
            due_date: due.map(Into::into),
            status,
        })?;
        for (product_idx, quantity) in items {
            invoice_repo.add_item(invoice_id, product_ids[product_idx], quantity, None)?;
        }
        let total = invoice_repo
            .find(invoice_id)?
            .map(|inv| inv.total_amount)
            .unwrap_or_default();
        println!("Inserted invoice {invoice_id} ({status}, total {total:.2})");
    }

    println!("\nSample data successfully added to database!");
    println!("Database location: {}", db.path().display());
    println!("Run the application with `cargo run` to browse the seeded records.");

    Ok(())
}
