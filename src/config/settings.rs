//! Run settings (Figment-based)
//!
//! Merges run behaviour from:
//! 1. Built-in defaults (Serialized)
//! 2. Environment variables (`ALIAS_REWRITE_*` prefix)
//! 3. Flags given explicitly on the command line

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use super::types::ResolveFrom;
use crate::constants::run::{DEFAULT_CONCURRENCY, ENV_PREFIX};
use crate::types::{AliasError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Compute and report without writing files
    pub dry_run: bool,
    /// Report even when files are written
    pub verbose: bool,
    /// Use the single-threaded execution mode
    pub sync: bool,
    /// Files processed concurrently in async mode
    pub concurrency: usize,
    pub resolve_from: ResolveFrom,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            dry_run: false,
            verbose: false,
            sync: false,
            concurrency: DEFAULT_CONCURRENCY,
            resolve_from: ResolveFrom::default(),
        }
    }
}

/// Values given explicitly on the command line. Unset fields leave the
/// lower layers untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_from: Option<ResolveFrom>,
}

impl RunSettings {
    /// Resolve settings: defaults → env vars → explicit overrides
    pub fn load(overrides: SettingsOverrides) -> Result<Self> {
        let settings: RunSettings = Figment::new()
            .merge(Serialized::defaults(RunSettings::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(|e| AliasError::config(format!("Configuration error: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(AliasError::config(
                "concurrency must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Dry runs always surface the report
    pub fn emits_report(&self) -> bool {
        self.dry_run || self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let settings = RunSettings::load(SettingsOverrides::default()).unwrap();
            assert_eq!(settings, RunSettings::default());
            assert!(!settings.emits_report());
            Ok(())
        });
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            jail.set_env("ALIAS_REWRITE_CONCURRENCY", "4");
            jail.set_env("ALIAS_REWRITE_RESOLVE_FROM", "output");
            let settings = RunSettings::load(SettingsOverrides::default()).unwrap();
            assert_eq!(settings.concurrency, 4);
            assert_eq!(settings.resolve_from, ResolveFrom::Output);
            Ok(())
        });
    }

    #[test]
    fn test_flags_win_over_env() {
        Jail::expect_with(|jail| {
            jail.set_env("ALIAS_REWRITE_CONCURRENCY", "4");
            let settings = RunSettings::load(SettingsOverrides {
                concurrency: Some(2),
                dry_run: Some(true),
                ..Default::default()
            })
            .unwrap();
            assert_eq!(settings.concurrency, 2);
            assert!(settings.dry_run);
            assert!(settings.emits_report());
            Ok(())
        });
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        Jail::expect_with(|_jail| {
            let err = RunSettings::load(SettingsOverrides {
                concurrency: Some(0),
                ..Default::default()
            })
            .unwrap_err();
            assert!(err.to_string().contains("concurrency"));
            Ok(())
        });
    }
}
