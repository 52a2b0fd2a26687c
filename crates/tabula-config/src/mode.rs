//! Build mode and the strategies that detect it from an invocation.
//!
//! Two invocation styles exist. A raw argument list is scanned for the
//! production flag token ([`FlagScan`]); a structured invocation carries an
//! explicit `mode` field that defaults to development ([`ExplicitMode`]).
//! Both sit behind [`ModeDetector`] and are selected through [`Invocation`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::settings::DEFAULT_PRODUCTION_FLAG;

/// Build mode, decided once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Production,
    #[default]
    Development,
}

impl BuildMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Production => "production",
            BuildMode::Development => "development",
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, BuildMode::Production)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "production" => Ok(BuildMode::Production),
            "development" => Ok(BuildMode::Development),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

/// Strategy for resolving the build mode of one invocation.
pub trait ModeDetector {
    fn detect(&self) -> Result<BuildMode>;
}

/// Production iff the flag token appears anywhere in the argument list.
#[derive(Debug, Clone, Copy)]
pub struct FlagScan<'a> {
    args: &'a [String],
    flag: &'a str,
}

impl<'a> FlagScan<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self {
            args,
            flag: DEFAULT_PRODUCTION_FLAG,
        }
    }

    /// Scan for a different production flag token.
    pub fn with_flag(mut self, flag: &'a str) -> Self {
        self.flag = flag;
        self
    }
}

impl ModeDetector for FlagScan<'_> {
    fn detect(&self) -> Result<BuildMode> {
        if self.args.iter().any(|arg| arg == self.flag) {
            Ok(BuildMode::Production)
        } else {
            Ok(BuildMode::Development)
        }
    }
}

/// Environment descriptor handed to a structured invocation.
///
/// Entries are kept sorted so the descriptor never introduces ordering
/// differences between otherwise identical builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildEnv(BTreeMap<String, String>);

impl BuildEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `KEY=VALUE` pairs. A bare `KEY` is recorded as `"true"`.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut env = BTreeMap::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (pair.trim(), "true"),
            };
            if key.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "env".to_string(),
                    hint: Some(format!("'{pair}' has an empty key, expected KEY=VALUE")),
                });
            }
            env.insert(key.to_string(), value.to_string());
        }
        Ok(Self(env))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Argument object of a structured invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArgv {
    #[serde(default)]
    pub mode: Option<String>,
}

impl BuildArgv {
    pub fn with_mode(mode: impl Into<String>) -> Self {
        Self {
            mode: Some(mode.into()),
        }
    }
}

/// Uses `argv.mode` when present and non-empty, development otherwise.
///
/// Only `production` and `development` are accepted. Webpack's `none` mode
/// has no plugin set here and fails with [`ConfigError::InvalidMode`], as
/// does any other value.
#[derive(Debug, Clone, Copy)]
pub struct ExplicitMode<'a> {
    env: &'a BuildEnv,
    argv: &'a BuildArgv,
}

impl<'a> ExplicitMode<'a> {
    pub fn new(env: &'a BuildEnv, argv: &'a BuildArgv) -> Self {
        Self { env, argv }
    }
}

impl ModeDetector for ExplicitMode<'_> {
    fn detect(&self) -> Result<BuildMode> {
        if !self.env.is_empty() {
            tracing::debug!(env = ?self.env, "structured invocation environment");
        }

        match self.argv.mode.as_deref().map(str::trim) {
            None | Some("") => Ok(BuildMode::Development),
            Some(mode) => mode.parse(),
        }
    }
}

/// How the host build process invoked the configuration builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Raw argument list, scanned for the production flag token.
    RawArgs(Vec<String>),
    /// Environment descriptor plus an argument object with an optional mode.
    Explicit { env: BuildEnv, argv: BuildArgv },
}

impl Invocation {
    pub fn raw<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::RawArgs(args.into_iter().map(Into::into).collect())
    }

    pub fn explicit(env: BuildEnv, argv: BuildArgv) -> Self {
        Invocation::Explicit { env, argv }
    }

    /// Resolve the mode, scanning raw arguments for `production_flag`.
    pub fn detect(&self, production_flag: &str) -> Result<BuildMode> {
        match self {
            Invocation::RawArgs(args) => FlagScan::new(args).with_flag(production_flag).detect(),
            Invocation::Explicit { env, argv } => ExplicitMode::new(env, argv).detect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flag_scan_defaults_to_development() {
        let raw = args(&["--config", "webpack.config.js"]);
        assert_eq!(FlagScan::new(&raw).detect().unwrap(), BuildMode::Development);
        assert_eq!(FlagScan::new(&[]).detect().unwrap(), BuildMode::Development);
    }

    #[test]
    fn flag_scan_finds_flag_anywhere() {
        let raw = args(&["--progress", "-p", "--colors"]);
        assert_eq!(FlagScan::new(&raw).detect().unwrap(), BuildMode::Production);
    }

    #[test]
    fn flag_scan_requires_exact_token() {
        let raw = args(&["-progress", "--p", "-P"]);
        assert_eq!(FlagScan::new(&raw).detect().unwrap(), BuildMode::Development);
    }

    #[test]
    fn flag_scan_custom_flag() {
        let raw = args(&["--release"]);
        let detector = FlagScan::new(&raw).with_flag("--release");
        assert_eq!(detector.detect().unwrap(), BuildMode::Production);
    }

    #[test]
    fn explicit_mode_defaults_when_absent_or_empty() {
        let env = BuildEnv::new();
        let absent = BuildArgv::default();
        let empty = BuildArgv::with_mode("  ");
        assert_eq!(
            ExplicitMode::new(&env, &absent).detect().unwrap(),
            BuildMode::Development
        );
        assert_eq!(
            ExplicitMode::new(&env, &empty).detect().unwrap(),
            BuildMode::Development
        );
    }

    #[test]
    fn explicit_mode_reads_argv() {
        let env = BuildEnv::new();
        let argv = BuildArgv::with_mode("production");
        assert_eq!(
            ExplicitMode::new(&env, &argv).detect().unwrap(),
            BuildMode::Production
        );
    }

    #[test]
    fn explicit_mode_rejects_unknown_value() {
        let env = BuildEnv::new();
        let argv = BuildArgv::with_mode("staging");
        let err = ExplicitMode::new(&env, &argv).detect().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMode(ref m) if m == "staging"));
    }

    #[test]
    fn explicit_mode_rejects_webpack_none() {
        let env = BuildEnv::new();
        let argv = BuildArgv::with_mode("none");
        let err = ExplicitMode::new(&env, &argv).detect().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMode(ref m) if m == "none"));
    }

    #[test]
    fn argv_deserializes_from_empty_object() {
        let argv: BuildArgv = serde_json::from_str("{}").unwrap();
        assert_eq!(argv, BuildArgv::default());
    }

    #[test]
    fn env_pairs_parse() {
        let env = BuildEnv::from_pairs(["API=remote", "analyze"]).unwrap();
        assert_eq!(env.get("API"), Some("remote"));
        assert_eq!(env.get("analyze"), Some("true"));
        assert!(BuildEnv::from_pairs(["=value"]).is_err());
    }

    #[test]
    fn invocation_selects_strategy() {
        let raw = Invocation::raw(["-p"]);
        assert_eq!(raw.detect("-p").unwrap(), BuildMode::Production);
        assert_eq!(raw.detect("--prod").unwrap(), BuildMode::Development);

        let explicit = Invocation::explicit(BuildEnv::new(), BuildArgv::with_mode("production"));
        assert_eq!(explicit.detect("-p").unwrap(), BuildMode::Production);
    }
}
