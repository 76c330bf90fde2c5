//! Guards that ship with hookify and need no descriptor.

mod go_errors;

pub use go_errors::{violation_message as go_errors_message, GoErrorsGuard};
