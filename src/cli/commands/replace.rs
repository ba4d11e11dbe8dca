//! Replace Command
//!
//! Rewrites alias imports under the output root of a tsconfig project.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::cli::ui::output::Output;
use crate::config::{RunSettings, SettingsOverrides};
use crate::report::JsonReporter;
use crate::rewrite::Replacer;
use crate::types::{Result, RunReport};

pub struct ReplaceOptions {
    /// tsconfig file
    pub project: PathBuf,
    /// Source root the output tree mirrors
    pub src: PathBuf,
    /// Overrides the configured outDir
    pub out: Option<PathBuf>,
    pub overrides: SettingsOverrides,
    pub quiet: bool,
}

pub fn run(options: ReplaceOptions) -> Result<RunReport> {
    let output = Output::quiet(options.quiet);
    let settings = RunSettings::load(options.overrides)?;

    let replacer = Replacer::from_tsconfig(
        &options.project,
        &options.src,
        options.out.as_deref(),
        &settings,
    )?
    .with_sink(Arc::new(JsonReporter::new()));

    let report = if settings.sync {
        replacer.run_sync()?
    } else {
        let rt = Runtime::new()?;
        rt.block_on(replacer.run())?
    };

    output.summary(&report);
    if settings.dry_run {
        output.warning("Dry run: no files were written");
    }

    Ok(report)
}
