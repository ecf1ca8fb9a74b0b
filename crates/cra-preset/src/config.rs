use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static configuration of the preset.
///
/// `Default` yields the Create React App v3 values. Hosts that need to tweak
/// a threshold can overlay a partial JSON document with [`PresetConfig::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetConfig {
    /// Preset identity reported to the host.
    pub name: String,

    /// File extensions the preset claims, without the leading dot.
    pub extensions: Vec<String>,

    /// Package aliases applied to bare import specifiers.
    pub aliases: BTreeMap<String, String>,

    /// Whether `.env` files are honored.
    pub has_dot_env: bool,

    /// Package whose version gates React Refresh.
    pub framework_package: String,

    /// Minimum framework version for refresh support.
    pub refresh_min_version: String,

    /// Minimum framework version for adding the refresh runtime dependency.
    pub augment_min_version: String,

    /// Installed framework versions below this are remounted instead of patched.
    pub remount_below_version: String,

    /// Runtime package added to the dependency set when refresh is possible.
    pub refresh_runtime_package: String,

    /// Pinned version of the refresh runtime package.
    pub refresh_runtime_version: String,

    /// Reserved path of the bootstrap virtual module.
    pub bootstrap_path: String,

    /// Path prefix of installed dependencies.
    pub dependency_prefix: String,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            name: "create-react-app-v3".to_string(),
            extensions: ["web.js", "js", "json", "web.jsx", "jsx", "ts", "tsx"]
                .into_iter()
                .map(String::from)
                .collect(),
            aliases: BTreeMap::from([(
                "react-native".to_string(),
                "react-native-web".to_string(),
            )]),
            has_dot_env: true,
            framework_package: "react-dom".to_string(),
            refresh_min_version: "16.9.0".to_string(),
            augment_min_version: "16.9.0".to_string(),
            remount_below_version: "16.8.0".to_string(),
            refresh_runtime_package: "react-refresh".to_string(),
            refresh_runtime_version: "0.7.1".to_string(),
            bootstrap_path: "/node_modules/__csb/react-dom-entrypoint.js".to_string(),
            dependency_prefix: "/node_modules".to_string(),
        }
    }
}

impl PresetConfig {
    /// Parse a config document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the preset name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the minimum framework version for refresh support.
    #[must_use]
    pub fn with_refresh_min_version(mut self, version: impl Into<String>) -> Self {
        self.refresh_min_version = version.into();
        self
    }

    /// Set the version below which a full remount is forced.
    #[must_use]
    pub fn with_remount_below_version(mut self, version: impl Into<String>) -> Self {
        self.remount_below_version = version.into();
        self
    }

    /// Set the reserved bootstrap module path.
    #[must_use]
    pub fn with_bootstrap_path(mut self, path: impl Into<String>) -> Self {
        self.bootstrap_path = path.into();
        self
    }
}
