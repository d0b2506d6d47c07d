//! `auditdesk-checklist`: daily audit checklist engine.
//!
//! Pure engine crate: reads counts and audit outcomes through the
//! [`AuditSource`] trait, returns checklist rows, merges them into a history
//! ledger. No file or database IO.

pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod model;
pub mod source;

pub use calendar::previous_business_day;
pub use config::{ChecklistConfig, Company};
pub use engine::{build_checklist, RunDates};
pub use error::ChecklistError;
pub use history::merge_day;
pub use model::{ChecklistRow, ComparisonOutcome, DailyAuditEntry, Status};
pub use source::{AuditSource, LatestEntryQuery, MemorySource};
