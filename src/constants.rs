//! Global Constants
//!
//! Centralized constants for scanning, resolution and tuning.

/// Output tree scanning constants
pub mod scan {
    /// Extensions of compiled files whose module references get rewritten
    pub const OUTPUT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];
}

/// Alias resolution constants
pub mod resolve {
    /// Suffixes probed after a candidate path that does not exist verbatim.
    ///
    /// Order matches how the compiler emits declarations next to sources.
    pub const MODULE_SUFFIXES: &[&str] = &[".js", ".jsx", ".ts", ".tsx", ".d.ts", ".json"];

    /// Suffix appended to an `extends` target that does not exist as written
    pub const CONFIG_SUFFIX: &str = ".json";
}

/// Run engine constants
pub mod run {
    /// Default number of files processed concurrently in async mode
    pub const DEFAULT_CONCURRENCY: usize = 16;

    /// Prefix of environment variables overriding run settings
    pub const ENV_PREFIX: &str = "ALIAS_REWRITE_";

    /// Indentation used when the run report is printed as JSON
    pub const REPORT_INDENT: &[u8] = b"    ";
}
