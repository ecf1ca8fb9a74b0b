//! Ordered first-match routing from file paths to transformer chains.

use super::rule::{Chain, PipelineRule, Step};
use crate::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Routes file paths to transformer chains.
///
/// The rule list is shared behind an `Arc` and only ever swapped whole, so a
/// lookup that started before a swap finishes against the table it saw.
#[derive(Debug)]
pub struct PresetRouter {
    name: String,
    extensions: Vec<String>,
    rules: RwLock<Arc<Vec<PipelineRule>>>,
    generation: AtomicU64,
}

impl PresetRouter {
    /// Create a router with no rules.
    pub fn new(name: impl Into<String>, extensions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            extensions,
            rules: RwLock::new(Arc::new(Vec::new())),
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `path` ends in one of the claimed extensions.
    #[must_use]
    pub fn claims(&self, path: &str) -> bool {
        self.extensions.iter().any(|ext| {
            path.strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }

    /// Append a rule. Call order is match order.
    pub fn register_chain(
        &self,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
        chain: Vec<Step>,
    ) {
        let rule = PipelineRule::new(predicate, chain);
        let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::with_capacity(rules.len() + 1);
        next.extend(rules.iter().cloned());
        next.push(rule);
        *rules = Arc::new(next);
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// Drop every rule.
    pub fn reset(&self) {
        self.replace(Vec::new());
    }

    /// Install a complete rule list in one step.
    pub fn replace(&self, rules: Vec<PipelineRule>) {
        *self.rules.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(rules);
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// Chain of the first rule matching `path`.
    ///
    /// A miss means the catch-all rule is gone; that is a configuration bug,
    /// not a per-file error.
    pub fn resolve(&self, path: &str) -> Result<Chain> {
        let rules = self.rules();
        rules
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| Arc::clone(rule.chain()))
            .ok_or_else(|| Error::NoMatchingRule {
                preset: self.name.clone(),
                path: path.to_string(),
            })
    }

    /// Snapshot of the installed rule list.
    #[must_use]
    pub fn rules(&self) -> Arc<Vec<PipelineRule>> {
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*rules)
    }

    /// Number of times the rule list was changed.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::TransformerId;

    fn router() -> PresetRouter {
        PresetRouter::new("test", vec!["js".to_string(), "web.js".to_string(), "json".to_string()])
    }

    #[test]
    fn test_first_match_wins() {
        let router = router();
        router.register_chain(|p| p.ends_with(".js"), vec![Step::new(TransformerId::Babel)]);
        router.register_chain(|p| p.ends_with(".js"), vec![Step::new(TransformerId::Raw)]);

        let chain = router.resolve("/src/index.js").unwrap();
        assert_eq!(chain[0].transformer, TransformerId::Babel);
    }

    #[test]
    fn test_falls_through_to_catch_all() {
        let router = router();
        router.register_chain(|p| p.ends_with(".js"), vec![Step::new(TransformerId::Babel)]);
        router.register_chain(|_| true, vec![Step::new(TransformerId::Raw)]);

        let chain = router.resolve("/public/logo.png").unwrap();
        assert_eq!(chain[0].transformer, TransformerId::Raw);
    }

    #[test]
    fn test_miss_is_configuration_error() {
        let router = router();
        router.register_chain(|p| p.ends_with(".js"), vec![Step::new(TransformerId::Babel)]);

        let err = router.resolve("/styles.css").unwrap_err();
        assert!(matches!(err, Error::NoMatchingRule { ref path, .. } if path == "/styles.css"));
    }

    #[test]
    fn test_reset_empties_rules() {
        let router = router();
        router.register_chain(|_| true, vec![Step::new(TransformerId::Raw)]);
        router.reset();
        assert!(router.rules().is_empty());
        assert!(router.resolve("/a.js").is_err());
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let router = router();
        router.register_chain(|_| true, vec![Step::new(TransformerId::Raw)]);
        let before = router.rules();
        let generation = router.generation();

        router.replace(vec![PipelineRule::catch_all(vec![Step::new(TransformerId::Json)])]);

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].chain()[0].transformer, TransformerId::Raw);
        assert!(!Arc::ptr_eq(&before, &router.rules()));
        assert_eq!(router.generation(), generation + 1);
    }

    #[test]
    fn test_claims_extensions() {
        let router = router();
        assert!(router.claims("/src/index.js"));
        assert!(router.claims("/src/index.web.js"));
        assert!(router.claims("/package.json"));
        assert!(!router.claims("/src/App.tsx"));
        assert!(!router.claims("/src/fakejs"));
    }
}
