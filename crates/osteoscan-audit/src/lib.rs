//! osteoscan-audit
//!
//! Application-level audit events, emitted as structured `tracing` records.

pub mod events;

pub use events::{AuditAction, AuditEvent, ResourceType};
