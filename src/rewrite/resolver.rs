//! Alias resolution
//!
//! Maps an alias-prefixed module path to a relative reference by probing the
//! rule's targets on disk, first existing candidate wins.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::paths;
use crate::config::{AliasRule, ReplacerConfig, ResolveFrom};
use crate::constants::resolve::MODULE_SUFFIXES;

/// Outcome of resolving one module path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No alias prefix matched; leave the literal alone
    NotAliased,
    /// Prefix matched and a candidate exists
    Resolved(String),
    /// Prefix matched but no candidate exists under any target
    Unresolved,
}

#[derive(Debug, Clone)]
pub struct AliasResolver {
    aliases: Vec<AliasRule>,
    policy: ResolveFrom,
    alias_root: PathBuf,
    src_root: PathBuf,
    out_root: PathBuf,
}

impl AliasResolver {
    pub fn new(config: &ReplacerConfig) -> Self {
        Self {
            aliases: config.aliases.clone(),
            policy: config.resolve_from,
            alias_root: config.alias_root.clone(),
            src_root: config.src_root.clone(),
            out_root: config.out_root.clone(),
        }
    }

    /// First rule, in declaration order, whose prefix `module_path` starts with
    pub fn matching_rule(&self, module_path: &str) -> Option<&AliasRule> {
        self.aliases
            .iter()
            .find(|rule| module_path.starts_with(rule.prefix.as_str()))
    }

    /// Resolve `module_path` as referenced from the file at `out_file`
    pub fn resolve(&self, module_path: &str, out_file: &Path) -> Resolution {
        let Some(rule) = self.matching_rule(module_path) else {
            return Resolution::NotAliased;
        };
        let rest = rule.strip(module_path).unwrap_or_default();

        let probe_root = match self.policy {
            ResolveFrom::Source => &self.alias_root,
            ResolveFrom::Output => &self.out_root,
        };

        for target in &rule.targets {
            let candidate = paths::resolve(probe_root, &[target.as_str(), rest]);
            if !module_exists(&candidate) {
                continue;
            }

            let from_dir = out_file.parent().unwrap_or(&self.out_root);
            let destination = self.destination(candidate);
            return Resolution::Resolved(paths::module_reference(from_dir, &destination));
        }

        Resolution::Unresolved
    }

    /// Where the reference should point once a candidate is accepted
    fn destination(&self, candidate: PathBuf) -> PathBuf {
        match self.policy {
            ResolveFrom::Output => candidate,
            ResolveFrom::Source => match candidate.strip_prefix(&self.src_root) {
                Ok(inside_src) => self.out_root.join(inside_src),
                Err(_) => candidate,
            },
        }
    }
}

/// A candidate is accepted if it exists as written or with a module suffix
pub fn module_exists(candidate: &Path) -> bool {
    if candidate.exists() {
        return true;
    }

    MODULE_SUFFIXES.iter().any(|suffix| {
        let mut with_suffix = OsString::from(candidate.as_os_str());
        with_suffix.push(suffix);
        Path::new(&with_suffix).exists()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn config(root: &Path, policy: ResolveFrom, aliases: Vec<AliasRule>) -> ReplacerConfig {
        let root = paths::normalize(root);
        ReplacerConfig {
            project_root: root.clone(),
            src_root: root.join("src"),
            out_root: root.join("dist"),
            alias_root: root.join("src"),
            aliases,
            resolve_from: policy,
            dry_run: false,
            verbose: false,
        }
    }

    fn rule(prefix: &str, targets: &[&str]) -> AliasRule {
        AliasRule {
            prefix: prefix.to_string(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_module_exists_with_suffixes() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.d.ts");
        touch(temp.path(), "b.json");
        fs::create_dir_all(temp.path().join("dir")).unwrap();

        assert!(module_exists(&temp.path().join("a")));
        assert!(module_exists(&temp.path().join("b")));
        assert!(module_exists(&temp.path().join("dir")));
        assert!(!module_exists(&temp.path().join("c")));
    }

    #[test]
    fn test_source_policy_points_into_output_tree() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/lib/foo.ts");
        let cfg = config(temp.path(), ResolveFrom::Source, vec![rule("@lib/", &["lib/"])]);
        let resolver = AliasResolver::new(&cfg);

        let out_file = cfg.out_root.join("a.js");
        assert_eq!(
            resolver.resolve("@lib/foo", &out_file),
            Resolution::Resolved("./lib/foo".to_string())
        );

        let nested = cfg.out_root.join("pages/admin/index.js");
        assert_eq!(
            resolver.resolve("@lib/foo", &nested),
            Resolution::Resolved("../../lib/foo".to_string())
        );
    }

    #[test]
    fn test_output_policy_probes_output_tree() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "dist/lib/foo.js");
        let cfg = config(temp.path(), ResolveFrom::Output, vec![rule("@lib/", &["lib/"])]);
        let resolver = AliasResolver::new(&cfg);

        let out_file = cfg.out_root.join("x/a.js");
        assert_eq!(
            resolver.resolve("@lib/foo", &out_file),
            Resolution::Resolved("../lib/foo".to_string())
        );
        assert_eq!(
            resolver.resolve("@lib/bar", &out_file),
            Resolution::Unresolved
        );
    }

    #[test]
    fn test_first_existing_target_wins() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/second/util.ts");
        touch(temp.path(), "src/third/util.ts");
        let cfg = config(
            temp.path(),
            ResolveFrom::Source,
            vec![rule("@u/", &["first/", "second/", "third/"])],
        );
        let resolver = AliasResolver::new(&cfg);

        assert_eq!(
            resolver.resolve("@u/util", &cfg.out_root.join("a.js")),
            Resolution::Resolved("./second/util".to_string())
        );
    }

    #[test]
    fn test_only_first_matching_rule_is_consulted() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/other/x.ts");
        let cfg = config(
            temp.path(),
            ResolveFrom::Source,
            vec![rule("@a", &["missing/"]), rule("@ab/", &["other/"])],
        );
        let resolver = AliasResolver::new(&cfg);

        assert_eq!(resolver.matching_rule("@ab/x").unwrap().prefix, "@a");
        assert_eq!(
            resolver.resolve("@ab/x", &cfg.out_root.join("a.js")),
            Resolution::Unresolved
        );
    }

    #[test]
    fn test_unaliased_paths() {
        let temp = TempDir::new().unwrap();
        let cfg = config(temp.path(), ResolveFrom::Source, vec![rule("@lib/", &["lib/"])]);
        let resolver = AliasResolver::new(&cfg);

        let out_file = cfg.out_root.join("a.js");
        assert_eq!(resolver.resolve("react", &out_file), Resolution::NotAliased);
        assert_eq!(resolver.resolve("./local", &out_file), Resolution::NotAliased);
    }

    #[test]
    fn test_target_outside_src_root_is_referenced_directly() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "shared/consts.js");
        let cfg = config(
            temp.path(),
            ResolveFrom::Source,
            vec![rule("@shared/", &["../shared/"])],
        );
        let resolver = AliasResolver::new(&cfg);

        assert_eq!(
            resolver.resolve("@shared/consts", &cfg.out_root.join("a.js")),
            Resolution::Resolved("../shared/consts".to_string())
        );
    }
}
