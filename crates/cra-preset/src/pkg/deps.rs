//! Dependency set snapshots and the refresh-runtime augmenter.

use super::version::VersionGate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Package name → version or range, as read from the manifest.
///
/// Snapshots are never mutated after the host hands them over; transforms
/// produce new sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencySet(BTreeMap<String, String>);

impl DependencySet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Version or range requested for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of this set with `name` set to `version`.
    #[must_use]
    pub fn with(&self, name: impl Into<String>, version: impl Into<String>) -> Self {
        let mut next = self.0.clone();
        next.insert(name.into(), version.into());
        Self(next)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DependencySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Adds the refresh runtime to projects whose framework can use it.
#[derive(Debug, Clone)]
pub struct DependencyAugmenter {
    gate: VersionGate,
    package: String,
    version: String,
}

impl DependencyAugmenter {
    /// Add `package@version` whenever `gate` passes.
    pub fn new(gate: VersionGate, package: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            gate,
            package: package.into(),
            version: version.into(),
        }
    }

    /// Return `deps` plus the runtime entry when the gate passes, otherwise
    /// an equal copy of `deps`.
    ///
    /// An existing entry for the runtime package is replaced by the pinned version.
    #[must_use]
    pub fn augment(&self, deps: &DependencySet) -> DependencySet {
        if self.gate.detect(deps) {
            debug!(
                package = %self.package,
                version = %self.version,
                "adding refresh runtime dependency"
            );
            deps.with(self.package.clone(), self.version.clone())
        } else {
            deps.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn augmenter() -> DependencyAugmenter {
        DependencyAugmenter::new(
            VersionGate::new("react-dom", "16.9.0"),
            "react-refresh",
            "0.7.1",
        )
    }

    #[test]
    fn test_augment_adds_runtime() {
        let deps: DependencySet = [("react", "^16.12.0"), ("react-dom", "^16.12.0")]
            .into_iter()
            .collect();
        let out = augmenter().augment(&deps);
        assert_eq!(out.get("react-refresh"), Some("0.7.1"));
        assert_eq!(out.len(), 3);
        // input untouched
        assert!(!deps.contains("react-refresh"));
    }

    #[test]
    fn test_augment_without_framework_is_unchanged() {
        let deps: DependencySet = [("lodash", "4.17.15")].into_iter().collect();
        assert_eq!(augmenter().augment(&deps), deps);
    }

    #[test]
    fn test_augment_old_framework_is_unchanged() {
        let deps: DependencySet = [("react-dom", "16.8.6")].into_iter().collect();
        assert_eq!(augmenter().augment(&deps), deps);
    }

    #[test]
    fn test_augment_keeps_existing_entries() {
        let deps: DependencySet = [
            ("react-dom", "16.9.0"),
            ("react-refresh", "0.4.0"),
            ("axios", "0.19.0"),
        ]
        .into_iter()
        .collect();
        let out = augmenter().augment(&deps);
        assert_eq!(out.get("axios"), Some("0.19.0"));
        assert_eq!(out.get("react-dom"), Some("16.9.0"));
        assert_eq!(out.get("react-refresh"), Some("0.7.1"));
    }

    #[test]
    fn test_deserialize_manifest_dependencies() {
        let deps: DependencySet =
            serde_json::from_str(r#"{"react":"16.12.0","react-dom":"16.12.0"}"#).unwrap();
        assert_eq!(deps.get("react-dom"), Some("16.12.0"));
        assert_eq!(deps.iter().count(), 2);
    }
}
