use serde::{Deserialize, Serialize};

/// Unique identifier for a partner (SQLite rowid).
pub type PartnerId = i64;

/// A business partner: the customer side of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    /// Unique identifier for the partner.
    pub id: PartnerId,
    /// Display name of the partner.
    pub name: String,
    /// Tax identification number.
    pub tax_id: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
}

/// Field values for a partner that has not been persisted yet
/// (or an edit about to be applied to an existing one).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerDraft {
    pub name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Partner {
    pub fn draft(&self) -> PartnerDraft {
        PartnerDraft {
            name: self.name.clone(),
            tax_id: self.tax_id.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }
}
