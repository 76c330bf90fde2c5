//! Project-scoped context consulted by built-in guards.
//!
//! Detection touches the filesystem, so results are kept per directory in a
//! [`TtlCache`] and reused until they expire.

mod cache;
mod resolver;

pub use cache::{Clock, ManualClock, SystemClock, TtlCache, DEFAULT_TTL};
pub use resolver::{
    Convention, ProjectContext, ProjectContextResolver, FALLBACK_ERRORS_PACKAGE,
};
