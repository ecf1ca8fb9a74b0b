#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

//! Transpiler pipeline routing for the Create React App v3 sandbox preset.
//!
//! Given a project's dependency manifest, the preset decides which ordered
//! chain of transformers each source file goes through, keeps that routing
//! table stable across setup cycles, and injects the React Refresh bootstrap
//! module ahead of normal evaluation when the project supports it.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod host;
#[cfg(feature = "logging")]
pub mod logging;
pub mod pipeline;
pub mod pkg;
pub mod preset;

pub use bootstrap::{BootstrapInjector, VirtualModule};
pub use config::PresetConfig;
pub use error::{Error, HostError, InjectionStage, Result};
pub use host::{EvaluateOptions, HostEnv, TranspiledModule};
pub use pipeline::{
    Chain, ControllerState, FeatureFlags, PipelineController, PipelineRule, PresetRouter, Step,
    TransformerId,
};
pub use pkg::{DependencyAugmenter, DependencySet, VersionGate};
pub use preset::{PreEvaluateReport, Preset};
