//! tsconfig Loader
//!
//! Resolves a tsconfig file and its `extends` chain into a [`ProjectConfig`]:
//! 1. Parent configurations, in `extends` order (later entries win)
//! 2. The file's own compiler options (always win over inherited ones)
//!
//! Relative options are resolved against the directory of the file that
//! declares them. `baseUrl`, `paths` and `outDir` are only required to be
//! present once the whole chain has been merged.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::jsonc;
use super::types::{AliasRule, ProjectConfig, RawCompilerOptions, RawTsConfig};
use crate::constants::resolve::CONFIG_SUFFIX;
use crate::rewrite::paths;
use crate::types::{AliasError, Result, ResultExt};

/// Options contributed by one file of the chain, already resolved to paths
#[derive(Debug, Default)]
struct Layer {
    out_root: Option<PathBuf>,
    alias_root: Option<PathBuf>,
    aliases: Option<Vec<AliasRule>>,
}

impl Layer {
    /// Fields defined by `child` replace ours
    fn overlay(self, child: Layer) -> Layer {
        Layer {
            out_root: child.out_root.or(self.out_root),
            alias_root: child.alias_root.or(self.alias_root),
            aliases: child.aliases.or(self.aliases),
        }
    }
}

/// tsconfig loader
pub struct TsConfigLoader;

impl TsConfigLoader {
    /// Load a tsconfig file, following its `extends` chain
    pub fn load(config_file: impl AsRef<Path>) -> Result<ProjectConfig> {
        let config_file = config_file.as_ref();
        let config_file = paths::absolutize(config_file).with_path(config_file)?;

        let mut chain = Vec::new();
        let merged = Self::load_layer(&config_file, &mut chain)?;

        let project_root = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let alias_root = merged
            .alias_root
            .ok_or_else(|| AliasError::missing_option("baseUrl"))?;
        let aliases = merged
            .aliases
            .ok_or_else(|| AliasError::missing_option("paths"))?;
        let out_root = merged
            .out_root
            .ok_or_else(|| AliasError::missing_option("outDir"))?;

        debug!(
            "Resolved {}: {} alias rules, outDir {}",
            config_file.display(),
            aliases.len(),
            out_root.display()
        );

        Ok(ProjectConfig {
            project_root,
            out_root,
            alias_root,
            aliases,
        })
    }

    /// Parse and strip a tsconfig file without following `extends`
    pub fn read_raw(path: &Path) -> Result<RawTsConfig> {
        let content = fs::read_to_string(path).with_path(path)?;
        serde_json::from_str(&jsonc::to_strict_json(&content)).map_err(|source| AliasError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Normalize a `paths` map into alias rules, keeping declaration order.
    ///
    /// Patterns with no literal prefix are dropped. Two patterns collapsing to
    /// the same prefix keep the first position and the last targets.
    pub fn normalize_paths(
        paths: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Vec<AliasRule>> {
        let mut rules: Vec<AliasRule> = Vec::with_capacity(paths.len());

        for (pattern, targets) in paths {
            let targets: Vec<String> = serde_json::from_value(targets.clone()).map_err(|_| {
                AliasError::config(format!(
                    "compilerOptions.paths['{}'] must be an array of strings",
                    pattern
                ))
            })?;

            let Some(rule) = AliasRule::from_pattern(pattern, &targets) else {
                debug!("Skipping alias '{}' without a literal prefix", pattern);
                continue;
            };

            match rules.iter_mut().find(|r| r.prefix == rule.prefix) {
                Some(existing) => *existing = rule,
                None => rules.push(rule),
            }
        }

        Ok(rules)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn load_layer(file: &Path, chain: &mut Vec<PathBuf>) -> Result<Layer> {
        if chain.iter().any(|seen| seen == file) {
            let cycle = chain
                .iter()
                .chain(std::iter::once(&file.to_path_buf()))
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(AliasError::config(format!(
                "circular extends chain: {}",
                cycle
            )));
        }

        debug!("Loading tsconfig from: {}", file.display());
        let raw = Self::read_raw(file)?;
        let dir = file.parent().unwrap_or_else(|| Path::new("/"));

        chain.push(file.to_path_buf());

        let mut inherited = Layer::default();
        if let Some(extends) = &raw.extends {
            for entry in extends.entries() {
                let parent = Self::locate_parent(dir, entry, file)?;
                inherited = inherited.overlay(Self::load_layer(&parent, chain)?);
            }
        }

        chain.pop();

        let own = Self::own_layer(dir, raw.compiler_options.as_ref())?;
        Ok(inherited.overlay(own))
    }

    fn own_layer(dir: &Path, options: Option<&RawCompilerOptions>) -> Result<Layer> {
        let Some(options) = options else {
            return Ok(Layer::default());
        };

        let resolve_dir = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| paths::resolve(dir, &[v]))
        };

        let aliases = match &options.paths {
            Some(map) => Some(Self::normalize_paths(map)?),
            None => None,
        };

        Ok(Layer {
            out_root: resolve_dir(&options.out_dir),
            alias_root: resolve_dir(&options.base_url),
            aliases,
        })
    }

    /// Locate an `extends` target relative to the extending file's directory,
    /// retrying with `.json` appended the way the compiler does.
    fn locate_parent(dir: &Path, entry: &str, from: &Path) -> Result<PathBuf> {
        let candidate = paths::resolve(dir, &[entry]);
        if candidate.is_file() {
            return Ok(candidate);
        }

        if !entry.ends_with(CONFIG_SUFFIX) {
            let mut with_suffix = OsString::from(candidate.as_os_str());
            with_suffix.push(CONFIG_SUFFIX);
            let with_suffix = PathBuf::from(with_suffix);
            if with_suffix.is_file() {
                return Ok(with_suffix);
            }
        }

        Err(AliasError::config(format!(
            "cannot find extends target '{}' referenced from {}",
            entry,
            from.display()
        )))
    }
}
