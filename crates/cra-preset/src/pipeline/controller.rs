//! Reconfiguration state machine for the preset router.

use super::chains::build_rules;
use super::router::PresetRouter;
use crate::pkg::{DependencySet, VersionGate};
use crate::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Feature flags the rule set depends on. Compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureFlags {
    pub refresh_enabled: bool,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Uninitialized,
    Configured(FeatureFlags),
}

/// Rebuilds the router's rule set only when the feature flags change.
///
/// `ensure_configured` is single-flight: concurrent setup calls queue on the
/// state lock, and the rule swap itself is one write-locked store on the
/// router.
#[derive(Debug)]
pub struct PipelineController {
    router: Arc<PresetRouter>,
    refresh_gate: VersionGate,
    dependency_prefix: String,
    state: Mutex<ControllerState>,
}

impl PipelineController {
    pub fn new(
        router: Arc<PresetRouter>,
        refresh_gate: VersionGate,
        dependency_prefix: impl Into<String>,
    ) -> Self {
        Self {
            router,
            refresh_gate,
            dependency_prefix: dependency_prefix.into(),
            state: Mutex::new(ControllerState::Uninitialized),
        }
    }

    /// Flags implied by a dependency snapshot.
    #[must_use]
    pub fn flags_for(&self, deps: &DependencySet) -> FeatureFlags {
        FeatureFlags {
            refresh_enabled: self.refresh_gate.detect(deps),
        }
    }

    /// Make sure the router holds the rule set for `deps`.
    ///
    /// Returns `true` if the rule set was rebuilt. The new rule set is built
    /// in full before it is swapped in, so the router never holds a partial one.
    pub async fn ensure_configured(&self, deps: &DependencySet) -> Result<bool> {
        let flags = self.flags_for(deps);
        let mut state = self.state.lock().await;

        if *state == ControllerState::Configured(flags) {
            return Ok(false);
        }

        if flags.refresh_enabled {
            debug!(
                preset = %self.router.name(),
                "refresh is enabled, registering additional transpiler"
            );
        } else {
            debug!(preset = %self.router.name(), "refresh is disabled");
        }

        let rules = build_rules(flags, &self.dependency_prefix)?;
        self.router.replace(rules);
        *state = ControllerState::Configured(flags);

        Ok(true)
    }

    /// Current state.
    pub async fn state(&self) -> ControllerState {
        *self.state.lock().await
    }

    #[must_use]
    pub fn router(&self) -> &Arc<PresetRouter> {
        &self.router
    }
}
