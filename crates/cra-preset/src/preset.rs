//! The Create React App v3 preset as seen by the host.

use crate::bootstrap::BootstrapInjector;
use crate::config::PresetConfig;
use crate::host::HostEnv;
use crate::pipeline::{Chain, ControllerState, PipelineController, PresetRouter};
use crate::pkg::{satisfies_minimum, DependencyAugmenter, DependencySet, VersionGate};
use crate::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// What [`Preset::pre_evaluate`] did for this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreEvaluateReport {
    /// The refresh bootstrap module was injected and evaluated.
    pub refresh_injected: bool,
    /// The host was told to remount instead of hot patching.
    pub remount_forced: bool,
}

/// Transpiler routing and setup hooks for one sandbox.
#[derive(Debug)]
pub struct Preset {
    config: PresetConfig,
    router: Arc<PresetRouter>,
    controller: PipelineController,
    augmenter: DependencyAugmenter,
    injector: BootstrapInjector,
}

impl Default for Preset {
    fn default() -> Self {
        Self::new(PresetConfig::default())
    }
}

impl Preset {
    pub fn new(config: PresetConfig) -> Self {
        let router = Arc::new(PresetRouter::new(
            config.name.clone(),
            config.extensions.clone(),
        ));
        let refresh_gate =
            VersionGate::new(config.framework_package.clone(), config.refresh_min_version.clone());
        let controller = PipelineController::new(
            Arc::clone(&router),
            refresh_gate.clone(),
            config.dependency_prefix.clone(),
        );
        let augmenter = DependencyAugmenter::new(
            VersionGate::new(config.framework_package.clone(), config.augment_min_version.clone()),
            config.refresh_runtime_package.clone(),
            config.refresh_runtime_version.clone(),
        );
        let injector = BootstrapInjector::new(refresh_gate, config.bootstrap_path.clone());

        Self {
            config,
            router,
            controller,
            augmenter,
            injector,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn config(&self) -> &PresetConfig {
        &self.config
    }

    #[must_use]
    pub fn router(&self) -> &Arc<PresetRouter> {
        &self.router
    }

    #[must_use]
    pub fn has_dot_env(&self) -> bool {
        self.config.has_dot_env
    }

    /// Whether the preset claims `path` by extension.
    #[must_use]
    pub fn claims(&self, path: &str) -> bool {
        self.router.claims(path)
    }

    /// Rewrite an import specifier through the alias table.
    ///
    /// Matches the aliased package itself and its subpaths, never packages
    /// that merely share a prefix.
    #[must_use]
    pub fn resolve_alias(&self, specifier: &str) -> Option<String> {
        self.config.aliases.iter().find_map(|(from, to)| {
            let rest = specifier.strip_prefix(from.as_str())?;
            if rest.is_empty() || rest.starts_with('/') {
                Some(format!("{to}{rest}"))
            } else {
                None
            }
        })
    }

    /// Dependencies to install, with the refresh runtime added when usable.
    #[must_use]
    pub fn process_dependencies(&self, deps: &DependencySet) -> DependencySet {
        self.augmenter.augment(deps)
    }

    /// Bring the routing table in line with the host's manifest.
    ///
    /// Must complete before files of this cycle are resolved.
    pub async fn setup<H>(&self, host: &H) -> Result<()>
    where
        H: HostEnv + ?Sized,
    {
        let rebuilt = self.controller.ensure_configured(host.dependencies()).await?;
        debug!(preset = %self.config.name, rebuilt, "preset setup complete");
        Ok(())
    }

    /// Run before any project module of the cycle is evaluated.
    ///
    /// Injects the refresh bootstrap when refresh is active, then asks the
    /// host to remount on change when it has no native hot reloading and the
    /// installed framework is too old to be hot patched.
    pub async fn pre_evaluate<H>(&self, host: &mut H) -> Result<PreEvaluateReport>
    where
        H: HostEnv + ?Sized,
    {
        let refresh_injected = self.injector.inject_if_needed(&mut *host).await?;

        let remount_forced = !host.webpack_hmr()
            && host
                .dependencies()
                .get(&self.config.framework_package)
                .is_some_and(|version| {
                    !satisfies_minimum(version, &self.config.remount_below_version)
                });

        if remount_forced {
            warn!(
                package = %self.config.framework_package,
                below = %self.config.remount_below_version,
                "framework too old for hot patching, remounting on change"
            );
            host.clean_using_unmount();
        }

        Ok(PreEvaluateReport {
            refresh_injected,
            remount_forced,
        })
    }

    /// Transformer chain for `path`.
    pub fn resolve(&self, path: &str) -> Result<Chain> {
        self.router.resolve(path)
    }

    /// Reconfiguration state of the routing table.
    pub async fn state(&self) -> ControllerState {
        self.controller.state().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_exact_and_subpath() {
        let preset = Preset::default();
        assert_eq!(preset.resolve_alias("react-native").as_deref(), Some("react-native-web"));
        assert_eq!(
            preset.resolve_alias("react-native/Libraries/Image").as_deref(),
            Some("react-native-web/Libraries/Image")
        );
    }

    #[test]
    fn test_alias_ignores_prefix_lookalikes() {
        let preset = Preset::default();
        assert_eq!(preset.resolve_alias("react-native-svg"), None);
        assert_eq!(preset.resolve_alias("react"), None);
    }

    #[test]
    fn test_claims_and_identity() {
        let preset = Preset::default();
        assert_eq!(preset.name(), "create-react-app-v3");
        assert!(preset.has_dot_env());
        assert!(preset.claims("/src/App.tsx"));
        assert!(preset.claims("/src/index.web.jsx"));
        assert!(!preset.claims("/src/App.css"));
    }

    #[test]
    fn test_process_dependencies() {
        let preset = Preset::default();
        let deps: DependencySet = [("react-dom", "^16.9.0")].into_iter().collect();
        assert_eq!(preset.process_dependencies(&deps).get("react-refresh"), Some("0.7.1"));

        let old: DependencySet = [("react-dom", "16.8.6")].into_iter().collect();
        assert_eq!(preset.process_dependencies(&old), old);
    }

    #[test]
    fn test_resolve_before_setup_is_configuration_error() {
        let preset = Preset::default();
        assert!(matches!(
            preset.resolve("/src/index.js"),
            Err(crate::Error::NoMatchingRule { .. })
        ));
    }
}
