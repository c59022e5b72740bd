//! Domain error types for the Billow application.
//!
//! These errors represent domain-level failures that can occur during
//! business operations. They are more specific than infrastructure errors
//! and can be handled appropriately at the application layer.

use thiserror::Error;

/// Domain errors related to partner operations.
#[derive(Debug, Error)]
pub enum PartnerError {
    #[error("Partner not found: {0}")]
    NotFound(i64),

    #[error("Partner is referenced by existing invoices")]
    Referenced,

    #[error("Partner operation failed: {0}")]
    OperationFailed(#[from] anyhow::Error),
}

/// Domain errors related to product operations.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Duplicate SKU: {0}")]
    DuplicateSku(String),

    #[error("Product is referenced by existing invoice items")]
    Referenced,

    #[error("Product operation failed: {0}")]
    OperationFailed(#[from] anyhow::Error),
}

/// Domain errors related to invoice operations.
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("Invoice not found: {0}")]
    NotFound(i64),

    #[error("Invoice item not found: {0}")]
    ItemNotFound(i64),

    #[error("Invoice operation failed: {0}")]
    OperationFailed(#[from] anyhow::Error),
}

/// Domain errors related to CSV import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File columns must be exactly: {expected} (optionally preceded by \"id\")")]
    HeaderMismatch { expected: String },

    #[error("CSV import failed: {0}")]
    OperationFailed(#[from] anyhow::Error),
}

/// Unified domain error type for application-level error handling.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Partner error: {0}")]
    Partner(#[from] PartnerError),

    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    #[error("Invoice error: {0}")]
    Invoice(#[from] InvoiceError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Unknown domain error: {0}")]
    Unknown(String),
}

impl From<String> for DomainError {
    fn from(s: String) -> Self {
        DomainError::Unknown(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_wraps_aggregate_errors() {
        let err: DomainError = PartnerError::Referenced.into();
        assert_eq!(
            err.to_string(),
            "Partner error: Partner is referenced by existing invoices"
        );

        let err: DomainError = InvoiceError::NotFound(7).into();
        assert!(err.to_string().contains("Invoice not found: 7"));

        let err: DomainError = "something odd".to_string().into();
        assert!(matches!(err, DomainError::Unknown(_)));
    }
}
