//! Application-level operations that sit between the GUI and the
//! repositories: CSV exchange and report aggregation.

pub mod export;
pub mod import;
pub mod reports;
