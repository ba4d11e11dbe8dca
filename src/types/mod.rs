pub mod error;
pub mod report;

pub use error::{AliasError, ErrorKind, Result, ResultExt};
pub use report::{FileOutcome, ReplacementReport, RunReport};
