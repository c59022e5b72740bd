//! Input validation for forms and CSV rows.
//!
//! Validators collect every problem in a row instead of stopping at the
//! first one, so forms and import reports can show the full list at once.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{InvoiceDraft, PartnerDraft};

/// Accepted email shape: something, an `@`, something, a dot, something.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

/// True if `email` matches the accepted shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// True if `s` parses as a calendar date in `YYYY-MM-DD` format.
pub fn is_valid_date(s: &str) -> bool {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn required(field: &'static str, value: &str, errors: &mut Vec<String>) -> bool {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
        false
    } else {
        true
    }
}

/// Validate a partner draft. Every field is required; the email must have
/// a plausible shape.
pub fn validate_partner(draft: &PartnerDraft) -> Vec<String> {
    let mut errors = Vec::new();
    required("name", &draft.name, &mut errors);
    required("tax_id", &draft.tax_id, &mut errors);
    if required("email", &draft.email, &mut errors) && !is_valid_email(draft.email.trim()) {
        errors.push("email format is invalid".to_string());
    }
    required("phone", &draft.phone, &mut errors);
    required("address", &draft.address, &mut errors);
    errors
}

/// Validate a raw product row as entered in a form or read from CSV.
/// `price` and `stock` arrive as text and must parse as a non-negative
/// number and a non-negative integer respectively.
pub fn validate_product_fields(
    sku: &str,
    name: &str,
    description: &str,
    price: &str,
    stock: &str,
) -> Vec<String> {
    let mut errors = Vec::new();
    required("sku", sku, &mut errors);
    required("name", name, &mut errors);
    required("description", description, &mut errors);
    if required("price", price, &mut errors) {
        match price.trim().parse::<f64>() {
            Ok(p) if p >= 0.0 => {}
            Ok(_) => errors.push("price must not be negative".to_string()),
            Err(_) => errors.push("price must be a valid number".to_string()),
        }
    }
    if required("stock", stock, &mut errors) {
        match stock.trim().parse::<i64>() {
            Ok(s) if s >= 0 => {}
            Ok(_) => errors.push("stock must not be negative".to_string()),
            Err(_) => errors.push("stock must be a valid integer".to_string()),
        }
    }
    errors
}

/// Validate an invoice draft. The partner reference and the issue date are
/// required; dates must be `YYYY-MM-DD`.
pub fn validate_invoice(draft: &InvoiceDraft) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.partner_id <= 0 {
        errors.push("partner is required".to_string());
    }
    if required("invoice_date", &draft.invoice_date, &mut errors)
        && !is_valid_date(draft.invoice_date.trim())
    {
        errors.push("invoice_date must be YYYY-MM-DD format".to_string());
    }
    if let Some(due) = &draft.due_date
        && !due.trim().is_empty()
        && !is_valid_date(due.trim())
    {
        errors.push("due_date must be YYYY-MM-DD format".to_string());
    }
    errors
}

/// Validate an invoice item before it is attached.
pub fn validate_invoice_item(product_id: i64, quantity: i64) -> Vec<String> {
    let mut errors = Vec::new();
    if product_id <= 0 {
        errors.push("product is required".to_string());
    }
    if quantity <= 0 {
        errors.push("quantity must be a positive integer".to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner_draft() -> PartnerDraft {
        PartnerDraft {
            name: "Acme GmbH".into(),
            tax_id: "DE123456789".into(),
            email: "billing@acme.example".into(),
            phone: "+49 30 1234567".into(),
            address: "Invalidenstr. 1, Berlin".into(),
        }
    }

    #[test]
    fn test_valid_partner_passes() {
        assert!(validate_partner(&partner_draft()).is_empty());
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let mut draft = partner_draft();
        draft.email = "not-an-email".into();
        let errors = validate_partner(&draft);
        assert_eq!(errors, vec!["email format is invalid".to_string()]);
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let errors = validate_partner(&PartnerDraft::default());
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| e == "name is required"));
        assert!(errors.iter().any(|e| e == "address is required"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("@b.co"));
    }

    #[test]
    fn test_product_numeric_fields() {
        let errors = validate_product_fields("SKU-1", "Widget", "A widget", "abc", "1.5");
        assert!(errors.iter().any(|e| e == "price must be a valid number"));
        assert!(errors.iter().any(|e| e == "stock must be a valid integer"));

        let ok = validate_product_fields("SKU-1", "Widget", "A widget", "4.50", "12");
        assert!(ok.is_empty());
    }

    #[test]
    fn test_invoice_dates() {
        let mut draft = InvoiceDraft {
            partner_id: 1,
            invoice_date: "2025-02-30".into(),
            due_date: None,
            status: Default::default(),
        };
        assert!(
            validate_invoice(&draft)
                .iter()
                .any(|e| e == "invoice_date must be YYYY-MM-DD format")
        );

        draft.invoice_date = "2025-02-28".into();
        draft.due_date = Some("28.02.2025".into());
        assert!(
            validate_invoice(&draft)
                .iter()
                .any(|e| e == "due_date must be YYYY-MM-DD format")
        );

        draft.due_date = Some("2025-03-14".into());
        assert!(validate_invoice(&draft).is_empty());
    }

    #[test]
    fn test_item_quantity_must_be_positive() {
        assert!(!validate_invoice_item(1, 0).is_empty());
        assert!(!validate_invoice_item(1, -2).is_empty());
        assert!(validate_invoice_item(1, 3).is_empty());
    }
}
