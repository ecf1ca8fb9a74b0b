use thiserror::Error;

/// Result alias for preset operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for preset operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No rule matched a path. The catch-all rule was lost, so the whole
    /// configuration cycle is unusable.
    #[error("Preset {preset} has no transpiler rule for {path}")]
    NoMatchingRule { preset: String, path: String },

    #[error("Invalid path pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    /// The bootstrap module could not be brought up.
    #[error("Failed to {stage} virtual module {path}: {source}")]
    Injection {
        path: String,
        stage: InjectionStage,
        #[source]
        source: HostError,
    },

    #[error("Failed to parse preset config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Step of bootstrap injection that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionStage {
    Register,
    Transpile,
    Evaluate,
}

impl InjectionStage {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Transpile => "transpile",
            Self::Evaluate => "evaluate",
        }
    }
}

impl std::fmt::Display for InjectionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error reported by the host evaluation environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injection_error_names_module_and_stage() {
        let err = Error::Injection {
            path: "/node_modules/__csb/react-dom-entrypoint.js".to_string(),
            stage: InjectionStage::Evaluate,
            source: HostError::new("window is not defined"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to evaluate virtual module \
             /node_modules/__csb/react-dom-entrypoint.js: window is not defined"
        );
    }

    #[test]
    fn test_no_matching_rule_message() {
        let err = Error::NoMatchingRule {
            preset: "create-react-app-v3".to_string(),
            path: "/src/index.js".to_string(),
        };
        assert!(err.to_string().contains("/src/index.js"));
        assert!(err.to_string().contains("create-react-app-v3"));
    }
}
