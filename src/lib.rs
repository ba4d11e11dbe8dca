//! alias-rewrite - tsconfig path alias rewriting for compiled output
//!
//! Rewrites module references such as `require('@lib/foo')` in compiled
//! JavaScript/TypeScript output into relative references such as
//! `require('./lib/foo')`, so the output runs under loaders that know
//! nothing about `compilerOptions.paths`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use alias_rewrite::{Replacer, RunSettings};
//!
//! let settings = RunSettings::default();
//! let replacer = Replacer::from_tsconfig("tsconfig.json", "src", None, &settings)?;
//! let report = replacer.run().await?;
//! println!("{} references rewritten", report.report.replacement_count());
//! ```
//!
//! ## Modules
//!
//! - [`config`]: tsconfig loading with `extends` chains, run settings
//! - [`scanner`]: enumeration of compiled files
//! - [`rewrite`]: alias resolution and the rewrite engine
//! - [`report`]: run report sinks

pub mod cli;
pub mod config;
pub mod constants;
pub mod report;
pub mod rewrite;
pub mod scanner;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{
    AliasRule, ProjectConfig, ReplacerConfig, ResolveFrom, RunSettings, TsConfigLoader,
};

// Error Types
pub use types::error::{AliasError, ErrorKind, Result, ResultExt};

// Reports
pub use report::{JsonReporter, ReportSink};
pub use types::{FileOutcome, ReplacementReport, RunReport};

// =============================================================================
// Engine Re-exports
// =============================================================================

pub use rewrite::{AliasResolver, Replacer, Resolution, rewrite_references};
pub use scanner::OutputScanner;
