//! Configuration Management
//!
//! Two independent sources:
//! - The project's tsconfig file and its `extends` chain, which yield the
//!   alias table and root directories
//! - Run settings layered from defaults, `ALIAS_REWRITE_*` environment
//!   variables and CLI flags

mod jsonc;
mod loader;
mod settings;
mod types;

pub use loader::TsConfigLoader;
pub use settings::{RunSettings, SettingsOverrides};
pub use types::*;
