//! Interface to the host evaluation environment.
//!
//! The preset never transpiles or evaluates anything itself. It registers
//! modules with the host and asks the host to run them.

use crate::bootstrap::VirtualModule;
use crate::error::HostError;
use crate::pkg::DependencySet;
use async_trait::async_trait;

/// Options for [`TranspiledModule::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluateOptions {
    /// Skip change detection and caching.
    pub force: bool,
}

impl EvaluateOptions {
    /// Evaluate regardless of cached state.
    #[must_use]
    pub fn forced() -> Self {
        Self { force: true }
    }
}

/// The host's evaluation environment for one sandbox.
pub trait HostEnv: Send {
    /// Dependencies of the current manifest.
    fn dependencies(&self) -> &DependencySet;

    /// Whether the host already provides webpack-style hot reloading.
    fn webpack_hmr(&self) -> bool;

    /// Register a virtual module, replacing any module at the same path.
    fn add_module(&mut self, module: VirtualModule);

    /// Handle for the module registered at `path`.
    fn transpiled_module(
        &mut self,
        path: &str,
    ) -> Result<Box<dyn TranspiledModule + '_>, HostError>;

    /// Switch the sandbox to full unmount/remount on change.
    fn clean_using_unmount(&mut self);
}

/// A module as tracked by the host's transpile/evaluate pipeline.
#[async_trait]
pub trait TranspiledModule: Send {
    /// Mark the module as evaluated eagerly, ahead of on-demand modules.
    fn set_is_entry(&mut self, is_entry: bool);

    /// Run the module's transformer chain.
    async fn transpile(&mut self) -> Result<(), HostError>;

    /// Evaluate the transpiled module.
    async fn evaluate(&mut self, options: EvaluateOptions) -> Result<(), HostError>;
}
