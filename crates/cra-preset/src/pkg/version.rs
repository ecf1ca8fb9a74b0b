//! Minimum-version gates over manifest entries.
//!
//! Manifest entries may hold either an installed version (`16.9.0`) or a
//! requested range (`^16.9.0`). Both are coerced to a plain
//! `major.minor.patch` triple before comparison, the same way npm's
//! `semver.coerce` does.

use super::deps::DependencySet;
use semver::Version;
use thiserror::Error;
use tracing::debug;

/// A version string with no usable numeric component.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid version '{input}': {reason}")]
pub struct VersionParseError {
    pub input: String,
    pub reason: &'static str,
}

impl VersionParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Coerce a version or range string to a release version.
///
/// # Rules
/// - Only the first alternative of an `||` range is considered
/// - Leading comparators (`^`, `~`, `>=`, `=`, ...), `v` and whitespace are skipped
/// - Up to three dotted numeric components are read; missing ones are zero
/// - Pre-release and build suffixes are dropped
pub fn coerce_version(input: &str) -> Result<Version, VersionParseError> {
    let first = input.split("||").next().unwrap_or_default();
    let rest = first.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, '^' | '~' | '<' | '>' | '=' | 'v' | 'V')
    });

    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(VersionParseError::new(input, "no numeric version component"));
    }

    let run_end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());

    let mut parts = [0u64; 3];
    for (slot, component) in parts.iter_mut().zip(rest[..run_end].split('.')) {
        if component.is_empty() {
            break;
        }
        *slot = component
            .parse()
            .map_err(|_| VersionParseError::new(input, "version component out of range"))?;
    }

    Ok(Version::new(parts[0], parts[1], parts[2]))
}

/// Check whether `version` is equal to or above `minimum`.
///
/// Unparsable input on either side never satisfies the requirement.
#[must_use]
pub fn satisfies_minimum(version: &str, minimum: &str) -> bool {
    match (coerce_version(version), coerce_version(minimum)) {
        (Ok(version), Ok(minimum)) => version >= minimum,
        (Err(e), _) | (_, Err(e)) => {
            debug!(error = %e, "version requirement treated as unsatisfied");
            false
        }
    }
}

/// Gate on a package being present at or above a minimum version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGate {
    package: String,
    minimum: String,
}

impl VersionGate {
    /// Create a gate for `package >= minimum`.
    pub fn new(package: impl Into<String>, minimum: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            minimum: minimum.into(),
        }
    }

    /// True iff the gated package is in `deps` at or above the minimum.
    #[must_use]
    pub fn detect(&self, deps: &DependencySet) -> bool {
        deps.get(&self.package)
            .is_some_and(|version| satisfies_minimum(version, &self.minimum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_plain_version() {
        assert_eq!(coerce_version("16.9.0").unwrap(), Version::new(16, 9, 0));
    }

    #[test]
    fn test_coerce_ranges() {
        assert_eq!(coerce_version("^16.9.0").unwrap(), Version::new(16, 9, 0));
        assert_eq!(coerce_version("~16.8.6").unwrap(), Version::new(16, 8, 6));
        assert_eq!(coerce_version(">= 16.9").unwrap(), Version::new(16, 9, 0));
        assert_eq!(coerce_version("v17").unwrap(), Version::new(17, 0, 0));
        assert_eq!(coerce_version("16.x").unwrap(), Version::new(16, 0, 0));
    }

    #[test]
    fn test_coerce_drops_prerelease() {
        assert_eq!(
            coerce_version("16.9.0-alpha.1").unwrap(),
            Version::new(16, 9, 0)
        );
    }

    #[test]
    fn test_coerce_or_range_uses_first_alternative() {
        assert_eq!(
            coerce_version("^16.8.0 || ^17.0.0").unwrap(),
            Version::new(16, 8, 0)
        );
    }

    #[test]
    fn test_coerce_rejects_tags_and_urls() {
        assert!(coerce_version("latest").is_err());
        assert!(coerce_version("").is_err());
        assert!(coerce_version("github:facebook/react").is_err());
        assert!(coerce_version("99999999999999999999999.0.0").is_err());
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        assert!(satisfies_minimum("16.10.0", "16.9.0"));
        assert!(!satisfies_minimum("16.9.0", "16.10.0"));
    }

    #[test]
    fn test_minimum_boundary() {
        assert!(satisfies_minimum("16.9.0", "16.9.0"));
        assert!(!satisfies_minimum("16.8.6", "16.9.0"));
        assert!(satisfies_minimum("17.0.0", "16.9.0"));
    }

    #[test]
    fn test_unparsable_never_satisfies() {
        assert!(!satisfies_minimum("latest", "16.9.0"));
        assert!(!satisfies_minimum("16.9.0", "next"));
    }

    #[test]
    fn test_gate_detect() {
        let gate = VersionGate::new("react-dom", "16.9.0");
        let deps: DependencySet = [("react-dom", "^16.12.0")].into_iter().collect();
        assert!(gate.detect(&deps));

        let old: DependencySet = [("react-dom", "16.8.6")].into_iter().collect();
        assert!(!gate.detect(&old));

        let absent: DependencySet = [("react", "16.12.0")].into_iter().collect();
        assert!(!gate.detect(&absent));
    }
}
