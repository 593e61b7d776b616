//! `ledgerline-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod numeric;

pub use error::{DomainError, DomainResult};
pub use id::{InvoiceId, UserId};
pub use numeric::RawNumeric;
