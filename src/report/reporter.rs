use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::constants::run::REPORT_INDENT;
use crate::types::{AliasError, Result, RunReport};

/// Receives the run report when a run is in dry-run or verbose mode
pub trait ReportSink: Send + Sync {
    fn emit(&self, report: &RunReport) -> Result<()>;
}

/// Prints the run report to stdout as indented JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(report: &RunReport) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(REPORT_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        report
            .serialize(&mut serializer)
            .map_err(|e| AliasError::Report(format!("Failed to serialize report: {}", e)))?;
        String::from_utf8(buf)
            .map_err(|e| AliasError::Report(format!("Failed to serialize report: {}", e)))
    }
}

impl ReportSink for JsonReporter {
    fn emit(&self, report: &RunReport) -> Result<()> {
        println!("{}", Self::render(report)?);
        Ok(())
    }
}
