//! Rewrite Engine
//!
//! Walks the compiled output tree and rewrites alias references file by file.
//!
//! ## Execution modes
//!
//! - [`Replacer::run`]: concurrent fan-out over files with tokio file I/O
//! - [`Replacer::run_sync`]: single-threaded, blocking I/O
//!
//! Both produce identical file contents and equivalent reports. Only one run
//! may be in flight per engine instance; the guard is released on every exit
//! path, including errors.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use futures::StreamExt;
use tracing::{debug, info, warn};

use super::resolver::AliasResolver;
use super::rewriter::rewrite_references;
use crate::config::{ReplacerConfig, RunSettings, TsConfigLoader};
use crate::constants::run::DEFAULT_CONCURRENCY;
use crate::report::ReportSink;
use crate::rewrite::paths;
use crate::scanner::{OutputScanner, ScannedFile};
use crate::types::{AliasError, FileOutcome, ReplacementReport, Result, ResultExt, RunReport};

/// Clears the running flag when dropped
struct RunGuard<'a> {
    running: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(running: &'a AtomicBool) -> Result<Self> {
        running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AliasError::AlreadyRunning)?;
        Ok(Self { running })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

/// Run-scoped accumulator. Safe for concurrent insertion from the fan-out;
/// materialized into an ordered [`ReplacementReport`] once the run ends.
#[derive(Default)]
struct RunState {
    outcomes: DashMap<String, FileOutcome>,
}

impl RunState {
    fn record(&self, relative: String, mut outcome: FileOutcome) {
        // text has been written (or discarded) by now
        outcome.text = String::new();
        self.outcomes.insert(relative, outcome);
    }

    fn into_report(self, files_scanned: usize) -> ReplacementReport {
        let mut report = ReplacementReport::new();
        report.files_scanned = files_scanned;
        for (relative, outcome) in self.outcomes {
            report.record(relative, &outcome);
        }
        report
    }
}

pub struct Replacer {
    config: ReplacerConfig,
    resolver: AliasResolver,
    concurrency: usize,
    sink: Option<Arc<dyn ReportSink>>,
    running: AtomicBool,
}

impl Replacer {
    pub fn new(config: ReplacerConfig) -> Self {
        let resolver = AliasResolver::new(&config);
        Self {
            config,
            resolver,
            concurrency: DEFAULT_CONCURRENCY,
            sink: None,
            running: AtomicBool::new(false),
        }
    }

    /// Build an engine from a tsconfig file.
    ///
    /// `out` overrides the configured `outDir` when given.
    pub fn from_tsconfig(
        tsconfig: impl AsRef<Path>,
        src: impl AsRef<Path>,
        out: Option<&Path>,
        settings: &RunSettings,
    ) -> Result<Self> {
        let project = TsConfigLoader::load(tsconfig)?;

        let src = src.as_ref();
        let src_root = paths::absolutize(src).with_path(src)?;
        let out_root = match out {
            Some(out) => paths::absolutize(out).with_path(out)?,
            None => project.out_root,
        };

        let config = ReplacerConfig {
            project_root: project.project_root,
            src_root,
            out_root,
            alias_root: project.alias_root,
            aliases: project.aliases,
            resolve_from: settings.resolve_from,
            dry_run: settings.dry_run,
            verbose: settings.emits_report(),
        };

        Ok(Self::new(config).with_concurrency(settings.concurrency))
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Where the run report goes when `dry_run` or `verbose` is set
    pub fn with_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &ReplacerConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Rewrite all output files concurrently
    pub async fn run(&self) -> Result<RunReport> {
        let _guard = RunGuard::acquire(&self.running)?;

        let files = OutputScanner::new(&self.config.out_root).scan()?;
        let files_scanned = files.len();
        info!(
            "Rewriting {} files under {}",
            files_scanned,
            self.config.out_root.display()
        );

        let state = RunState::default();
        let processed = self.process_all(files, &state).await;
        self.complete(state, files_scanned, processed)
    }

    /// Rewrite all output files one after another on the calling thread
    pub fn run_sync(&self) -> Result<RunReport> {
        let _guard = RunGuard::acquire(&self.running)?;

        let files = OutputScanner::new(&self.config.out_root).scan()?;
        let files_scanned = files.len();
        info!(
            "Rewriting {} files under {} (sync)",
            files_scanned,
            self.config.out_root.display()
        );

        let state = RunState::default();
        let processed = files
            .into_iter()
            .try_for_each(|file| self.process_file_sync(file, &state));
        self.complete(state, files_scanned, processed)
    }

    /// Fan out over `files`, stopping at the first failure
    async fn process_all(&self, files: Vec<ScannedFile>, state: &RunState) -> Result<()> {
        let mut stream = futures::stream::iter(files)
            .map(|file| self.process_file(file, state))
            .buffer_unordered(self.concurrency);

        while let Some(result) = stream.next().await {
            result?;
        }
        Ok(())
    }

    fn process_file_sync(&self, file: ScannedFile, state: &RunState) -> Result<()> {
        let text = std::fs::read_to_string(&file.path).with_path(&file.path)?;
        let outcome = rewrite_references(&text, &file.path, &self.resolver);
        if outcome.changed && !self.config.dry_run {
            std::fs::write(&file.path, &outcome.text).with_path(&file.path)?;
            debug!("Wrote {}", file.path.display());
        }
        state.record(file.relative, outcome);
        Ok(())
    }

    async fn process_file(&self, file: ScannedFile, state: &RunState) -> Result<()> {
        let text = tokio::fs::read_to_string(&file.path)
            .await
            .with_path(&file.path)?;

        let outcome = rewrite_references(&text, &file.path, &self.resolver);

        if outcome.changed && !self.config.dry_run {
            tokio::fs::write(&file.path, &outcome.text)
                .await
                .with_path(&file.path)?;
            debug!("Wrote {}", file.path.display());
        }

        state.record(file.relative, outcome);
        Ok(())
    }

    /// Materialize the accumulated state and flush it to the sink. The report
    /// is flushed on failure too; the run error takes precedence over a sink
    /// error in that case.
    fn complete(
        &self,
        state: RunState,
        files_scanned: usize,
        processed: Result<()>,
    ) -> Result<RunReport> {
        let run_report = RunReport {
            config: self.config.clone(),
            report: state.into_report(files_scanned),
        };

        match processed {
            Ok(()) => {
                info!(
                    "Replaced {} references in {} files ({} unresolved)",
                    run_report.report.replacement_count(),
                    run_report.report.changed_files.len(),
                    run_report.report.error_count()
                );
                self.emit(&run_report)?;
                Ok(run_report)
            }
            Err(e) => {
                warn!("Run aborted: {}", e);
                if let Err(sink_err) = self.emit(&run_report) {
                    warn!("Failed to emit partial report: {}", sink_err);
                }
                Err(e)
            }
        }
    }

    fn emit(&self, run_report: &RunReport) -> Result<()> {
        if self.config.emits_report()
            && let Some(sink) = &self.sink
        {
            sink.emit(run_report)?;
        }
        Ok(())
    }
}
