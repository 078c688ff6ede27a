//! Audit trail for persisted budget changes
//!
//! Every category, transfer and month-level mutation appends one JSON line
//! to `audit.log`. Entries carry before/after snapshots so a user can see
//! what a reset or copy overwrote.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
