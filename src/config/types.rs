//! Configuration Types
//!
//! Raw tsconfig document structures as read from disk, and the normalized
//! alias table the rewrite engine works from.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// Normalized Configuration
// =============================================================================

/// One path mapping with its trailing wildcards stripped.
///
/// `@lib/*: ["lib/*", "vendor/lib/*"]` becomes prefix `@lib/` with targets
/// `["lib/", "vendor/lib/"]`. Targets are tried in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasRule {
    pub prefix: String,
    pub targets: Vec<String>,
}

impl AliasRule {
    /// Build a rule from a raw `paths` entry. Returns `None` when the pattern
    /// has no literal prefix left after stripping the wildcard.
    pub fn from_pattern(pattern: &str, targets: &[String]) -> Option<Self> {
        let prefix = strip_glob(pattern);
        if prefix.is_empty() {
            return None;
        }
        Some(Self {
            prefix: prefix.to_string(),
            targets: targets.iter().map(|t| strip_glob(t).to_string()).collect(),
        })
    }

    /// The part of `module_path` after this rule's prefix, if it matches
    pub fn strip<'a>(&self, module_path: &'a str) -> Option<&'a str> {
        module_path.strip_prefix(self.prefix.as_str())
    }
}

/// Remove a single trailing `*`
pub fn strip_glob(pattern: &str) -> &str {
    pattern.strip_suffix('*').unwrap_or(pattern)
}

/// Fully resolved project configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Directory containing the configuration file passed to the loader
    pub project_root: PathBuf,
    /// Compiled output directory (`compilerOptions.outDir`)
    pub out_root: PathBuf,
    /// Base directory alias targets are resolved against (`compilerOptions.baseUrl`)
    pub alias_root: PathBuf,
    pub aliases: Vec<AliasRule>,
}

/// Where alias targets are probed on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveFrom {
    /// Probe under `aliasRoot`, then point the reference at the candidate's
    /// mirror inside the output tree
    #[default]
    Source,
    /// Probe under `outRoot` and point at the candidate directly
    Output,
}

impl std::str::FromStr for ResolveFrom {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" | "src" => Ok(Self::Source),
            "output" | "out" => Ok(Self::Output),
            _ => Err(format!(
                "Invalid resolution root '{}'. Valid values: source, output",
                s
            )),
        }
    }
}

impl std::fmt::Display for ResolveFrom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Everything a rewrite run needs, and what the run report echoes back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacerConfig {
    pub project_root: PathBuf,
    pub src_root: PathBuf,
    pub out_root: PathBuf,
    pub alias_root: PathBuf,
    pub aliases: Vec<AliasRule>,
    pub resolve_from: ResolveFrom,
    pub dry_run: bool,
    pub verbose: bool,
}

impl ReplacerConfig {
    /// Whether the run report should be handed to the sink
    pub fn emits_report(&self) -> bool {
        self.dry_run || self.verbose
    }
}

// =============================================================================
// Raw tsconfig Document
// =============================================================================

/// A tsconfig file as written. Every field is optional on its own; required
/// options are checked after the extends chain is merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTsConfig {
    #[serde(default)]
    pub extends: Option<ExtendsField>,
    #[serde(default)]
    pub compiler_options: Option<RawCompilerOptions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompilerOptions {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub out_dir: Option<String>,
    /// Kept as a JSON map so declaration order survives (`preserve_order`)
    #[serde(default)]
    pub paths: Option<serde_json::Map<String, serde_json::Value>>,
}

/// `extends` is a single path or, since TypeScript 5.0, a list of paths
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExtendsField {
    Single(String),
    Many(Vec<String>),
}

impl ExtendsField {
    /// Parents in application order: later entries override earlier ones
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Self::Single(path) => vec![path.as_str()],
            Self::Many(paths) => paths.iter().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_glob() {
        assert_eq!(strip_glob("@lib/*"), "@lib/");
        assert_eq!(strip_glob("lib/*"), "lib/");
        assert_eq!(strip_glob("exact"), "exact");
        assert_eq!(strip_glob("*"), "");
        assert_eq!(strip_glob("a**"), "a*");
    }

    #[test]
    fn test_rule_from_pattern() {
        let rule =
            AliasRule::from_pattern("@lib/*", &["lib/*".to_string(), "vendor/*".to_string()])
                .unwrap();
        assert_eq!(rule.prefix, "@lib/");
        assert_eq!(rule.targets, vec!["lib/", "vendor/"]);
        assert_eq!(rule.strip("@lib/foo/bar"), Some("foo/bar"));
        assert_eq!(rule.strip("@other/foo"), None);
    }

    #[test]
    fn test_catch_all_pattern_is_discarded() {
        assert!(AliasRule::from_pattern("*", &["src/*".to_string()]).is_none());
    }

    #[test]
    fn test_resolve_from_parse() {
        assert_eq!("source".parse::<ResolveFrom>(), Ok(ResolveFrom::Source));
        assert_eq!("OUTPUT".parse::<ResolveFrom>(), Ok(ResolveFrom::Output));
        assert!("elsewhere".parse::<ResolveFrom>().is_err());
        assert_eq!(ResolveFrom::default().to_string(), "source");
    }

    #[test]
    fn test_extends_field_forms() {
        let single: RawTsConfig = serde_json::from_str(r#"{"extends": "./base.json"}"#).unwrap();
        assert_eq!(
            single.extends.unwrap().entries(),
            vec!["./base.json"]
        );

        let many: RawTsConfig =
            serde_json::from_str(r#"{"extends": ["./a.json", "./b.json"]}"#).unwrap();
        assert_eq!(many.extends.unwrap().entries(), vec!["./a.json", "./b.json"]);
    }

    #[test]
    fn test_paths_keep_declaration_order() {
        let raw: RawTsConfig = serde_json::from_str(
            r#"{"compilerOptions": {"paths": {"@z/*": ["z/*"], "@a/*": ["a/*"]}}}"#,
        )
        .unwrap();
        let keys: Vec<_> = raw
            .compiler_options
            .unwrap()
            .paths
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["@z/*", "@a/*"]);
    }
}
