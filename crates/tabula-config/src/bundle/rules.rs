//! Module rules: which files go through which loader chain.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use regex::Regex;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// A compiled regular expression.
///
/// Serializes as `{"regexp": "<source>"}`. A bare string in a webpack rule
/// condition is an absolute path prefix, so consumers must rebuild a
/// `RegExp` from the tagged source.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self> {
        Regex::new(source)
            .map(Pattern)
            .map_err(|source_err| ConfigError::InvalidPattern {
                pattern: source.to_string(),
                source: source_err,
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl FromStr for Pattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::new(s)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Pattern", 1)?;
        state.serialize_field("regexp", self.as_str())?;
        state.end()
    }
}

/// One step of a loader chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoaderEntry {
    pub loader: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl LoaderEntry {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleRule {
    pub test: Pattern,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Pattern>,

    /// Loaders as listed; the last one runs first
    #[serde(rename = "use")]
    pub loaders: Vec<LoaderEntry>,
}

impl ModuleRule {
    pub fn new(test: Pattern, loaders: Vec<LoaderEntry>) -> Self {
        Self {
            test,
            exclude: None,
            loaders,
        }
    }

    pub fn excluding(mut self, exclude: Pattern) -> Self {
        self.exclude = Some(exclude);
        self
    }

    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref().to_string_lossy();
        self.test.is_match(&path)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(&path))
    }

    /// Loaders in the order they transform a file (right to left).
    pub fn execution_order(&self) -> impl Iterator<Item = &LoaderEntry> {
        self.loaders.iter().rev()
    }

    pub fn loader_names(&self) -> Vec<&str> {
        self.loaders.iter().map(|l| l.loader.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleOptions {
    pub rules: Vec<ModuleRule>,
}

impl ModuleOptions {
    /// First rule that matches `path`.
    pub fn rule_for(&self, path: impl AsRef<Path>) -> Option<&ModuleRule> {
        let path = path.as_ref();
        self.rules.iter().find(|rule| rule.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style_rule() -> ModuleRule {
        ModuleRule::new(
            Pattern::new(r"\.(sa|c)ss$").unwrap(),
            vec![
                LoaderEntry::new("style-loader"),
                LoaderEntry::new("css-loader"),
                LoaderEntry::new("sass-loader"),
            ],
        )
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = Pattern::new(r"\.(js").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == r"\.(js"));
    }

    #[test]
    fn pattern_serializes_as_tagged_source() {
        let pattern = Pattern::new(r"\.js$").unwrap();
        assert_eq!(
            serde_json::to_string(&pattern).unwrap(),
            r#"{"regexp":"\\.js$"}"#
        );
        assert_eq!(pattern.to_string(), r"/\.js$/");
    }

    #[test]
    fn exclude_wins_over_test() {
        let rule = ModuleRule::new(
            Pattern::new(r"\.js$").unwrap(),
            vec![LoaderEntry::new("babel-loader")],
        )
        .excluding(Pattern::new("node_modules").unwrap());

        assert!(rule.matches("/app/src/main.js"));
        assert!(!rule.matches("/app/node_modules/react/index.js"));
        assert!(!rule.matches("/app/src/main.ts"));
    }

    #[test]
    fn loaders_execute_right_to_left() {
        let rule = style_rule();
        let order: Vec<_> = rule.execution_order().map(|l| l.loader.as_str()).collect();
        assert_eq!(order, vec!["sass-loader", "css-loader", "style-loader"]);
        assert_eq!(rule.loader_names(), vec!["style-loader", "css-loader", "sass-loader"]);
    }

    #[test]
    fn first_matching_rule_applies() {
        let catch_all = ModuleRule::new(
            Pattern::new(r"\.s?css$").unwrap(),
            vec![LoaderEntry::new("raw-loader")],
        );
        let module = ModuleOptions {
            rules: vec![style_rule(), catch_all],
        };

        let rule = module.rule_for("theme.scss").unwrap();
        assert_eq!(rule.loaders[0].loader, "style-loader");
        assert!(module.rule_for("main.js").is_none());
    }
}
