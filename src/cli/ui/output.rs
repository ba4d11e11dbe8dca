use console::style;

use crate::types::RunReport;

/// Styled console lines on stderr; stdout is reserved for the JSON report
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("✓").green(), message);
        }
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// One-line run summary followed by any unresolved references
    pub fn summary(&self, run: &RunReport) {
        let report = &run.report;
        let verb = if run.config.dry_run {
            "would change"
        } else {
            "changed"
        };

        self.success(&format!(
            "{} files scanned, {} {}, {} references rewritten",
            report.files_scanned,
            report.changed_files.len(),
            verb,
            report.replacement_count()
        ));

        if report.has_errors() {
            self.warning(&format!(
                "{} unresolved alias references:",
                report.error_count()
            ));
            if !self.quiet {
                for (file, refs) in &report.errors {
                    for module_path in refs {
                        eprintln!("  {} {}", style(file).dim(), module_path);
                    }
                }
            }
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
