//! Composition of several guards behind one entry point.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::builtin::GoErrorsGuard;
use crate::config::HookifySettings;
use crate::error::Result;
use crate::project::{Convention, ProjectContextResolver};
use crate::rule::{HookPoint, LoadDiagnostic, RuleLoader, RuleRegistry};
use crate::types::MutationEvent;

use super::{MutationGuard, Outcome, RuleDispatcher};

/// Runs registered guards in order.
///
/// The first guard to block wins and later guards are not consulted.
/// Warnings from every guard that ran are concatenated.
pub struct HookDispatcher {
    guards: Vec<Box<dyn MutationGuard>>,
}

impl HookDispatcher {
    /// Create a dispatcher with no guards.
    pub fn new() -> Self {
        Self { guards: Vec::new() }
    }

    /// Build the standard guard set for a project.
    ///
    /// Loads the global and project rules roots concurrently, then registers
    /// the rule dispatcher followed by the enabled built-in guards. Loader
    /// diagnostics are returned alongside; they never prevent construction.
    pub async fn from_settings(
        settings: &HookifySettings,
        project_root: &Path,
    ) -> (Self, Vec<LoadDiagnostic>) {
        let loader = RuleLoader::with_descriptor_file(&settings.descriptor_file);
        let (global, project) = loader
            .load_pair(
                settings.global_hooks_dir.as_deref(),
                &settings.project_hooks_root(project_root),
            )
            .await;

        let diagnostics = global
            .diagnostics
            .into_iter()
            .chain(project.diagnostics)
            .collect::<Vec<_>>();
        let registry = RuleRegistry::build([global.rules, project.rules]);

        let mut dispatcher = Self::new();
        dispatcher.register(RuleDispatcher::new(Arc::new(registry), project_root));
        if settings.builtin_go_errors {
            let resolver =
                ProjectContextResolver::new(Convention::go_errors(), settings.context_cache_ttl());
            dispatcher.register(GoErrorsGuard::new(project_root, Arc::new(resolver)));
        }

        tracing::debug!(
            "Hook dispatcher ready with {} guard(s), {} diagnostic(s)",
            dispatcher.len(),
            diagnostics.len()
        );
        (dispatcher, diagnostics)
    }

    /// Register a guard after the existing ones.
    pub fn register<G: MutationGuard + 'static>(&mut self, guard: G) {
        self.guards.push(Box::new(guard));
    }

    /// Normalize a raw tool call and run the guards for `hook_point`.
    ///
    /// Tools that do not mutate files proceed without consulting any guard.
    pub async fn dispatch_tool_call(
        &self,
        hook_point: HookPoint,
        tool: &str,
        args: &serde_json::Value,
    ) -> Result<Outcome> {
        let Some(event) = MutationEvent::from_tool_call(tool, args)? else {
            tracing::debug!("Tool '{}' is not a file mutation", tool);
            return Ok(Outcome::Proceed);
        };
        Ok(match hook_point {
            HookPoint::Before => self.before_mutation(&event).await,
            HookPoint::After => self.after_mutation(&event).await,
        })
    }

    /// Number of registered guards.
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// True when no guard is registered.
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl Default for HookDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MutationGuard for HookDispatcher {
    fn name(&self) -> &str {
        "dispatcher"
    }

    async fn before_mutation(&self, event: &MutationEvent) -> Outcome {
        let mut outcome = Outcome::Proceed;
        for guard in &self.guards {
            outcome = outcome.merge(guard.before_mutation(event).await);
            if outcome.is_block() {
                tracing::debug!("Guard '{}' blocked {}", guard.name(), event.kind());
                break;
            }
        }
        outcome
    }

    async fn after_mutation(&self, event: &MutationEvent) -> Outcome {
        let mut outcome = Outcome::Proceed;
        for guard in &self.guards {
            outcome = outcome.merge(guard.after_mutation(event).await.retroactive());
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        outcome: Outcome,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MutationGuard for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn before_mutation(&self, _event: &MutationEvent) -> Outcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }

        async fn after_mutation(&self, _event: &MutationEvent) -> Outcome {
            self.outcome.clone()
        }
    }

    fn fixed(outcome: Outcome, calls: &Arc<AtomicUsize>) -> Fixed {
        Fixed {
            outcome,
            calls: Arc::clone(calls),
        }
    }

    #[tokio::test]
    async fn test_empty_dispatcher_proceeds() {
        let dispatcher = HookDispatcher::new();
        assert!(dispatcher.is_empty());
        let event = MutationEvent::write("a", "b");
        assert_eq!(dispatcher.before_mutation(&event).await, Outcome::Proceed);
    }

    #[tokio::test]
    async fn test_block_stops_later_guards() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = HookDispatcher::new();
        dispatcher.register(fixed(Outcome::warn("w"), &calls));
        dispatcher.register(fixed(Outcome::block("b"), &calls));
        dispatcher.register(fixed(Outcome::warn("never"), &calls));

        let outcome = dispatcher
            .before_mutation(&MutationEvent::write("a", "b"))
            .await;

        assert_eq!(outcome, Outcome::block("b"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_after_mutation_downgrades_blocks() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = HookDispatcher::new();
        dispatcher.register(fixed(Outcome::block("late"), &calls));
        dispatcher.register(fixed(Outcome::warn("w"), &calls));

        let outcome = dispatcher
            .after_mutation(&MutationEvent::write("a", "b"))
            .await;
        assert_eq!(outcome.messages(), &["late".to_string(), "w".to_string()]);
    }

    #[tokio::test]
    async fn test_non_mutating_tool_skips_guards() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = HookDispatcher::new();
        dispatcher.register(fixed(Outcome::block("b"), &calls));

        let outcome = dispatcher
            .dispatch_tool_call(HookPoint::Before, "read", &serde_json::json!({"filePath": "a"}))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Proceed);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
