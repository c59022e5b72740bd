pub mod invoices;
pub mod partners;
pub mod products;
pub mod reports;
