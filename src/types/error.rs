//! Unified Error Type System
//!
//! Centralized error type for the library and the CLI.
//!
//! ## Error Kinds
//!
//! - **Config**: a required compiler option is missing somewhere in the
//!   extends chain, or a configuration file cannot be located or parsed.
//!   Fatal, raised before any output file is touched.
//! - **Reentrancy**: a run was started while another run on the same engine
//!   instance is still in flight.
//! - **Io**: an output file could not be read or written. Fatal for the run.
//!
//! Unresolved alias references are not errors; they are recorded in the run
//! report and the literal is left untouched.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Error Kinds
// =============================================================================

/// Coarse classification used by callers deciding how to present a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration could not be resolved
    Config,
    /// Run invoked while another run is in flight
    Reentrancy,
    /// File system failure during the run
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "CONFIG"),
            Self::Reentrancy => write!(f, "REENTRANCY"),
            Self::Io => write!(f, "IO"),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum AliasError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O failure tied to a specific file
    #[error("IO error at {}: {source}", path.display())]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Config(String),

    #[error("Replacer already running")]
    AlreadyRunning,

    #[error("Report error: {0}")]
    Report(String),
}

pub type Result<T> = std::result::Result<T, AliasError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl AliasError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Error for a compiler option absent from the whole extends chain
    pub fn missing_option(name: &str) -> Self {
        Self::Config(format!("compilerOptions.{} is not set", name))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::Json { .. } => ErrorKind::Config,
            Self::AlreadyRunning => ErrorKind::Reentrancy,
            Self::Io(_) | Self::IoAt { .. } | Self::Report(_) => ErrorKind::Io,
        }
    }
}

/// Context extension trait for attaching the offending path to I/O errors
pub trait ResultExt<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| AliasError::IoAt {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
