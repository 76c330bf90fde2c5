//! Host-facing guard interface.
//!
//! A host holds one or more [`MutationGuard`]s and asks each of them about a
//! mutation before committing it, and again after it has landed. Guards
//! answer with an [`Outcome`]:
//!
//! - [`Outcome::Proceed`]: nothing matched.
//! - [`Outcome::Warn`]: something matched a warning rule; the mutation goes ahead.
//! - [`Outcome::Block`]: the mutation must be rejected and the reason shown.
//!
//! After a mutation has landed nothing can be rejected any more, so guards
//! never block from [`MutationGuard::after_mutation`].

mod chain;
mod rules;

pub use chain::HookDispatcher;
pub use rules::RuleDispatcher;
pub(crate) use rules::relative_to;

use async_trait::async_trait;
use serde::Serialize;

use crate::types::MutationEvent;

/// Decision returned by a guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum Outcome {
    /// Allow the mutation.
    Proceed,
    /// Allow the mutation and surface these messages.
    Warn {
        /// Rendered warning messages, in evaluation order.
        messages: Vec<String>,
    },
    /// Reject the mutation.
    Block {
        /// Human-readable reason shown to the caller.
        reason: String,
    },
}

impl Outcome {
    /// A single-message warning.
    pub fn warn(message: impl Into<String>) -> Self {
        Self::Warn {
            messages: vec![message.into()],
        }
    }

    /// A block with the given reason.
    pub fn block(reason: impl Into<String>) -> Self {
        Self::Block {
            reason: reason.into(),
        }
    }

    /// Whether the mutation must be rejected.
    pub fn is_block(&self) -> bool {
        matches!(self, Self::Block { .. })
    }

    /// Warning messages carried by this outcome.
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Warn { messages } => messages,
            _ => &[],
        }
    }

    /// Fold two non-blocking outcomes, concatenating warnings.
    ///
    /// A block on either side wins, the left one first.
    pub fn merge(self, other: Outcome) -> Outcome {
        match (self, other) {
            (block @ Self::Block { .. }, _) | (_, block @ Self::Block { .. }) => block,
            (Self::Proceed, other) => other,
            (this, Self::Proceed) => this,
            (Self::Warn { mut messages }, Self::Warn { messages: more }) => {
                messages.extend(more);
                Self::Warn { messages }
            }
        }
    }

    /// Downgrade a block to a warning, for mutations that already happened.
    pub fn retroactive(self) -> Outcome {
        match self {
            Self::Block { reason } => Self::warn(reason),
            other => other,
        }
    }
}

/// Something a host consults around file mutations.
#[async_trait]
pub trait MutationGuard: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Inspect a mutation before it is committed.
    async fn before_mutation(&self, event: &MutationEvent) -> Outcome;

    /// Observe a mutation after it was committed. Never blocks.
    async fn after_mutation(&self, _event: &MutationEvent) -> Outcome {
        Outcome::Proceed
    }
}
