//! Core types shared by the scanners, rules, and guards.

mod event;
mod violation;

pub use event::{MutationEvent, OperationKind};
pub use violation::ViolationReport;
