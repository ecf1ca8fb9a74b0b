//! Dependency manifest inspection: version gating and dependency augmentation.

pub mod deps;
pub mod version;

pub use deps::{DependencyAugmenter, DependencySet};
pub use version::{coerce_version, satisfies_minimum, VersionGate, VersionParseError};
