//! Rule set of the Create React App v3 preset.
//!
//! Building is pure: the same flags always produce an equivalent rule list,
//! so it can be tested without a host.

use super::controller::FeatureFlags;
use super::rule::{compile, PipelineRule, Step, TransformerId};
use crate::Result;
use serde_json::{json, Value};

const SCRIPT: &str = r"\.(t|j)sx?$";
const SVG: &str = r"\.svg$";
const SASS_MODULE: &str = r"\.module\.s[ca]ss$";
const CSS_MODULE: &str = r"\.module\.css$";
const CSS: &str = r"\.css$";
const SASS: &str = r"\.s[ca]ss$";
const JSON: &str = r"\.json$";

const TYPE_DECLARATION: &str = ".d.ts";
const REFRESH_BABEL_PLUGIN: &str = "react-refresh/babel";

/// Babel 7 options used by Create React App.
#[must_use]
pub fn babel_config() -> Value {
    json!({
        "isV7": true,
        "compileNodeModulesWithEnv": true,
        "config": {
            "plugins": [
                ["proposal-decorators", { "legacy": true }],
                "@babel/plugin-transform-react-jsx-source",
                "@babel/plugin-proposal-optional-chaining",
                "@babel/plugin-proposal-nullish-coalescing-operator",
                "transform-flow-strip-types",
                "transform-destructuring",
                "babel-plugin-macros",
                ["proposal-class-properties", { "loose": true }],
                ["proposal-object-rest-spread", { "useBuiltIns": true }],
                ["transform-runtime", { "corejs": false, "helpers": true, "regenerator": true }],
                "syntax-dynamic-import"
            ],
            "presets": [
                ["env", {
                    "targets": { "ie": 9 },
                    "ignoreBrowserslistConfig": true,
                    "useBuiltIns": false,
                    "modules": false
                }],
                "react",
                "typescript"
            ]
        }
    })
}

/// Babel options with the React Refresh plugin appended.
#[must_use]
pub fn refresh_babel_config() -> Value {
    let mut config = babel_config();
    if let Some(plugins) = config["config"]["plugins"].as_array_mut() {
        plugins.push(Value::from(REFRESH_BABEL_PLUGIN));
    }
    config
}

fn style_options(module: bool, hmr_enabled: bool) -> Value {
    if module {
        json!({ "module": true, "hmrEnabled": hmr_enabled })
    } else {
        json!({ "hmrEnabled": hmr_enabled })
    }
}

/// Build the full rule list for `flags`. Earlier rules take priority and the
/// last rule always matches.
///
/// `dependency_prefix` marks installed packages, which never get refresh handling.
pub fn build_rules(flags: FeatureFlags, dependency_prefix: &str) -> Result<Vec<PipelineRule>> {
    let hmr = flags.refresh_enabled;
    let babel = || Step::with_options(TransformerId::Babel, babel_config());
    let mut rules = Vec::with_capacity(9);

    if flags.refresh_enabled {
        let script = compile(SCRIPT)?;
        let prefix = dependency_prefix.to_string();
        rules.push(PipelineRule::new(
            move |path| {
                !path.starts_with(&prefix)
                    && script.is_match(path)
                    && !path.ends_with(TYPE_DECLARATION)
            },
            vec![
                Step::with_options(TransformerId::Babel, refresh_babel_config()),
                Step::new(TransformerId::ReactRefresh),
            ],
        ));
    }

    let script = compile(SCRIPT)?;
    rules.push(PipelineRule::new(
        move |path| script.is_match(path) && !path.ends_with(TYPE_DECLARATION),
        vec![babel()],
    ));

    rules.push(PipelineRule::matching(
        SVG,
        vec![Step::new(TransformerId::Svgr), babel()],
    )?);

    rules.push(PipelineRule::matching(
        SASS_MODULE,
        vec![
            Step::new(TransformerId::Sass),
            Step::with_options(TransformerId::Styles, style_options(true, hmr)),
        ],
    )?);
    rules.push(PipelineRule::matching(
        CSS_MODULE,
        vec![Step::with_options(TransformerId::Styles, style_options(true, hmr))],
    )?);
    rules.push(PipelineRule::matching(
        CSS,
        vec![Step::with_options(TransformerId::Styles, style_options(false, hmr))],
    )?);
    rules.push(PipelineRule::matching(
        SASS,
        vec![
            Step::new(TransformerId::Sass),
            Step::with_options(TransformerId::Styles, style_options(false, hmr)),
        ],
    )?);

    rules.push(PipelineRule::matching(JSON, vec![Step::new(TransformerId::Json)])?);

    rules.push(PipelineRule::catch_all(vec![Step::new(TransformerId::Raw)]));

    Ok(rules)
}
