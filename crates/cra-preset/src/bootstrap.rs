//! React Refresh bootstrap injection.
//!
//! The refresh runtime has to hook into the page before `react-dom`
//! initializes, and the `react-refresh` transformer emits calls to
//! `$RefreshReg$`/`$RefreshSig$` that must exist globally. Both are set up by
//! a virtual entry module that is transpiled and force-evaluated before any
//! project module runs.

use crate::error::{Error, HostError, InjectionStage};
use crate::host::{EvaluateOptions, HostEnv};
use crate::pkg::VersionGate;
use crate::Result;
use tracing::debug;

/// Source of the refresh bootstrap module.
pub const REFRESH_BOOTSTRAP_CODE: &str = "\
if (process.env.NODE_ENV !== 'production' && typeof window !== 'undefined') {
const runtime = require('react-refresh/runtime');
runtime.injectIntoGlobalHook(window);
window.$RefreshReg$ = () => {};
window.$RefreshSig$ = () => type => type;
}
";

/// A synthetic module that does not exist in the project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualModule {
    pub path: String,
    pub code: String,
}

impl VirtualModule {
    pub fn new(path: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code: code.into(),
        }
    }
}

/// Injects the refresh bootstrap module when the project supports refresh.
#[derive(Debug, Clone)]
pub struct BootstrapInjector {
    gate: VersionGate,
    path: String,
}

impl BootstrapInjector {
    /// Inject at `path` whenever `gate` passes.
    pub fn new(gate: VersionGate, path: impl Into<String>) -> Self {
        Self {
            gate,
            path: path.into(),
        }
    }

    /// The module that gets injected.
    #[must_use]
    pub fn virtual_module(&self) -> VirtualModule {
        VirtualModule::new(self.path.clone(), REFRESH_BOOTSTRAP_CODE)
    }

    /// Register, transpile and force-evaluate the bootstrap module if the
    /// host's dependencies enable refresh. Returns whether it was injected.
    ///
    /// Completes only after evaluation has finished, so callers can start
    /// evaluating project modules right after. Re-injecting replaces the
    /// module at the reserved path.
    pub async fn inject_if_needed<H>(&self, host: &mut H) -> Result<bool>
    where
        H: HostEnv + ?Sized,
    {
        if !self.gate.detect(host.dependencies()) {
            return Ok(false);
        }

        debug!(path = %self.path, "injecting refresh bootstrap module");
        host.add_module(self.virtual_module());

        let mut module = host
            .transpiled_module(&self.path)
            .map_err(|source| self.failure(InjectionStage::Register, source))?;
        module.set_is_entry(true);
        module
            .transpile()
            .await
            .map_err(|source| self.failure(InjectionStage::Transpile, source))?;
        module
            .evaluate(EvaluateOptions::forced())
            .await
            .map_err(|source| self.failure(InjectionStage::Evaluate, source))?;

        Ok(true)
    }

    fn failure(&self, stage: InjectionStage, source: HostError) -> Error {
        Error::Injection {
            path: self.path.clone(),
            stage,
            source,
        }
    }
}
