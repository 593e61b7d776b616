//! `ledgerline-assist`
//!
//! **Responsibility:** boundary for model-assisted invoice workflows.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It never calls a model provider; callers bring the response text.
//! - It must not mutate domain state.
//! - It interprets model output into typed payloads and prepares the
//!   deterministic context that prompts are built from.

pub mod draft;
pub mod extract;
pub mod insights;
pub mod reminder;

pub use draft::{ParsedInvoicePayload, ParsedItem};
pub use extract::{extract_json, parse_payload, AssistError};
pub use insights::{DashboardSummary, InsightsPayload, RecentInvoice, RECENT_WINDOW};
pub use reminder::ReminderContext;
