//! Run report types
//!
//! A [`ReplacementReport`] is built fresh for every run and handed to the
//! report sink at the end of it. Maps are keyed by output file path relative
//! to the output root, with forward slashes.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::ReplacerConfig;

/// Result of rewriting a single output file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOutcome {
    /// Rewritten text
    pub text: String,
    /// `(original, replacement)` pairs in the order they were encountered
    pub replacements: Vec<(String, String)>,
    /// Alias-prefixed literals no candidate target could satisfy
    pub unresolved: Vec<String>,
    /// Whether `text` differs from the input
    pub changed: bool,
}

impl FileOutcome {
    pub fn is_untouched(&self) -> bool {
        self.replacements.is_empty() && self.unresolved.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementReport {
    pub replacements: BTreeMap<String, Vec<(String, String)>>,
    pub errors: BTreeMap<String, Vec<String>>,
    /// Files whose text changed (written, or would be written in dry-run mode)
    pub changed_files: BTreeSet<String>,
    pub files_scanned: usize,
}

impl ReplacementReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's outcome into the report. Files without any alias
    /// reference leave no entry in either map.
    pub fn record(&mut self, out_path: impl Into<String>, outcome: &FileOutcome) {
        let out_path = out_path.into();

        if outcome.changed {
            self.changed_files.insert(out_path.clone());
        }
        if !outcome.replacements.is_empty() {
            self.replacements
                .entry(out_path.clone())
                .or_default()
                .extend(outcome.replacements.iter().cloned());
        }
        if !outcome.unresolved.is_empty() {
            self.errors
                .entry(out_path)
                .or_default()
                .extend(outcome.unresolved.iter().cloned());
        }
    }

    pub fn replacement_count(&self) -> usize {
        self.replacements.values().map(Vec::len).sum()
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Report as surfaced to the user: resolved configuration plus results
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    #[serde(flatten)]
    pub config: ReplacerConfig,
    #[serde(flatten)]
    pub report: ReplacementReport,
}
