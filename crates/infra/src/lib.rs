//! Infrastructure layer: record storage and the invoice manager.

pub mod manager;
pub mod store;

pub use manager::InvoiceManager;
pub use store::{InMemoryInvoiceStore, InvoiceStore};
