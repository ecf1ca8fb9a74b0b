//! File routing: ordered `(predicate, chain)` rules and the controller that
//! rebuilds them when the project's feature flags change.
//!
//! ## Invariants
//!
//! 1. **First match wins** - rules are tried in registration order
//! 2. **Catch-all last** - every built rule set ends with a rule matching any path
//! 3. **Atomic swap** - a rule set is built in full before it replaces the old one
//! 4. **Idempotent setup** - unchanged flags never touch the installed rule set

pub mod chains;
pub mod controller;
pub mod router;
pub mod rule;

pub use controller::{ControllerState, FeatureFlags, PipelineController};
pub use router::PresetRouter;
pub use rule::{Chain, PipelineRule, Step, TransformerId};
