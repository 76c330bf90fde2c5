//! The ordered, read-only set of rules in effect.

use std::sync::Arc;

use crate::types::OperationKind;

use super::types::{HookPoint, Rule};

/// Rules from all sources in evaluation order.
///
/// Sources are concatenated as given (global before project). There is no
/// deduplication: two rules with the same name both apply.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<Rule>>,
}

impl RuleRegistry {
    /// Concatenate rule sources in order.
    pub fn build<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Vec<Rule>>,
    {
        let rules = sources
            .into_iter()
            .flatten()
            .map(Arc::new)
            .collect::<Vec<_>>();
        tracing::debug!("Rule registry built with {} rule(s)", rules.len());
        Self { rules }
    }

    /// Whether `rule` governs an operation of `kind` on `file_path`.
    ///
    /// True iff the tool scope is empty or names `kind`, and the extension
    /// scope is empty or `file_path` ends with one of its suffixes. Patches
    /// can touch several files, so the extension scope never filters them;
    /// their added lines are judged as a whole.
    pub fn applicable(rule: &Rule, kind: OperationKind, file_path: Option<&str>) -> bool {
        rule.applies_to_tool(kind)
            && (kind == OperationKind::Patch || rule.applies_to_path(file_path))
    }

    /// All rules in evaluation order.
    pub fn rules(&self) -> &[Arc<Rule>] {
        &self.rules
    }

    /// Rules wired to `hook_point`, in evaluation order.
    pub fn for_hook(&self, hook_point: HookPoint) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules
            .iter()
            .filter(move |rule| rule.hook_point() == hook_point)
    }

    /// Whether any rule is wired to `hook_point`.
    pub fn has_hook(&self, hook_point: HookPoint) -> bool {
        self.for_hook(hook_point).next().is_some()
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleFrontmatter;

    fn rule(name: &str, hook: &str) -> Rule {
        Rule::compile(
            RuleFrontmatter {
                name: Some(name.to_string()),
                hook: Some(hook.to_string()),
                action: Some("warn".to_string()),
                pattern: vec!["x".to_string()],
                ..Default::default()
            },
            "msg",
            format!("{name}/HOOK.md"),
        )
        .unwrap()
    }

    #[test]
    fn test_sources_are_concatenated_in_order() {
        let registry = RuleRegistry::build([
            vec![rule("g1", "before"), rule("same", "before")],
            vec![rule("same", "before"), rule("p1", "after")],
        ]);

        let names: Vec<_> = registry.rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["g1", "same", "same", "p1"]);
    }

    #[test]
    fn test_for_hook_filters_and_keeps_order() {
        let registry = RuleRegistry::build([vec![
            rule("a", "before"),
            rule("b", "after"),
            rule("c", "before"),
        ]]);

        let before: Vec<_> = registry
            .for_hook(HookPoint::Before)
            .map(|r| r.name())
            .collect();
        assert_eq!(before, vec!["a", "c"]);
        assert!(registry.has_hook(HookPoint::After));
    }

    #[test]
    fn test_empty_registry() {
        let registry = RuleRegistry::build(Vec::<Vec<Rule>>::new());
        assert!(registry.is_empty());
        assert!(!registry.has_hook(HookPoint::Before));
    }

    #[test]
    fn test_applicable_combines_scopes() {
        let scoped = Rule::compile(
            RuleFrontmatter {
                name: Some("go".to_string()),
                hook: Some("before".to_string()),
                action: Some("block".to_string()),
                tools: vec!["write".to_string()],
                extensions: vec![".go".to_string()],
                pattern: vec!["x".to_string()],
                ..Default::default()
            },
            "msg",
            "go/HOOK.md",
        )
        .unwrap();

        assert!(RuleRegistry::applicable(&scoped, OperationKind::Write, Some("a.go")));
        assert!(!RuleRegistry::applicable(&scoped, OperationKind::Edit, Some("a.go")));
        assert!(!RuleRegistry::applicable(&scoped, OperationKind::Write, Some("a.ts")));
    }

    #[test]
    fn test_extension_scope_does_not_filter_patches() {
        let scoped = Rule::compile(
            RuleFrontmatter {
                name: Some("rs-only".to_string()),
                hook: Some("before".to_string()),
                action: Some("block".to_string()),
                extensions: vec![".rs".to_string()],
                pattern: vec!["x".to_string()],
                ..Default::default()
            },
            "msg",
            "rs-only/HOOK.md",
        )
        .unwrap();

        assert!(RuleRegistry::applicable(&scoped, OperationKind::Patch, Some("README.md")));
        assert!(RuleRegistry::applicable(&scoped, OperationKind::Patch, None));
        assert!(!RuleRegistry::applicable(&scoped, OperationKind::Edit, Some("README.md")));
    }
}
