//! Routing rules and transformer steps.

use regex_lite::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Identity of a transformer the host knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformerId {
    /// Babel script transform.
    Babel,
    /// React Refresh registration, run after Babel.
    ReactRefresh,
    /// SVG to React component.
    Svgr,
    /// Sass/SCSS to CSS.
    Sass,
    /// CSS injection, optionally as CSS modules.
    Styles,
    /// JSON to module.
    Json,
    /// Raw passthrough.
    Raw,
}

impl TransformerId {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Babel => "babel",
            Self::ReactRefresh => "react-refresh",
            Self::Svgr => "svgr",
            Self::Sass => "sass",
            Self::Styles => "styles",
            Self::Json => "json",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for TransformerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transformer invocation within a chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub transformer: TransformerId,
    /// Transformer-specific options; `Null` when the transformer takes none.
    pub options: Value,
}

impl Step {
    /// A step without options.
    #[must_use]
    pub fn new(transformer: TransformerId) -> Self {
        Self {
            transformer,
            options: Value::Null,
        }
    }

    /// A step with options.
    #[must_use]
    pub fn with_options(transformer: TransformerId, options: Value) -> Self {
        Self {
            transformer,
            options,
        }
    }
}

/// Ordered transformer steps for one file; each consumes the previous output.
pub type Chain = Arc<[Step]>;

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A routing entry. Immutable once built.
#[derive(Clone)]
pub struct PipelineRule {
    predicate: Predicate,
    chain: Chain,
}

impl PipelineRule {
    /// Create a rule from a predicate and its chain.
    pub fn new(predicate: impl Fn(&str) -> bool + Send + Sync + 'static, chain: Vec<Step>) -> Self {
        Self {
            predicate: Arc::new(predicate),
            chain: chain.into(),
        }
    }

    /// Rule matching every path.
    #[must_use]
    pub fn catch_all(chain: Vec<Step>) -> Self {
        Self::new(|_| true, chain)
    }

    /// Rule matching paths the regex finds a match in.
    pub fn matching(pattern: &str, chain: Vec<Step>) -> crate::Result<Self> {
        let re = compile(pattern)?;
        Ok(Self::new(move |path| re.is_match(path), chain))
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        (self.predicate)(path)
    }

    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }
}

impl fmt::Debug for PipelineRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps: Vec<&str> = self.chain.iter().map(|s| s.transformer.as_str()).collect();
        f.debug_struct("PipelineRule")
            .field("chain", &steps)
            .finish_non_exhaustive()
    }
}

/// Compile a path pattern.
pub fn compile(pattern: &str) -> crate::Result<Regex> {
    Regex::new(pattern).map_err(|source| crate::Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
