//! Domain types for the Billow application
//! Defines the core data structures and business objects used throughout the application.

pub mod error;
pub mod invoice;
pub mod partner;
pub mod product;
pub mod validate;

pub use error::*;
pub use invoice::*;
pub use partner::*;
pub use product::*;
pub use validate::*;
