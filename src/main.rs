use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alias_rewrite::cli::ReplaceOptions;
use alias_rewrite::config::{ResolveFrom, SettingsOverrides};

#[derive(Parser)]
#[command(name = "alias-rewrite")]
#[command(
    version,
    about = "Rewrite tsconfig path aliases in compiled output into relative imports"
)]
struct Cli {
    #[arg(long, short = 'p', visible_alias = "tsconfig", help = "Path to tsconfig.json")]
    project: PathBuf,

    #[arg(long, short, help = "Source root path")]
    src: PathBuf,

    #[arg(long, short, help = "Output root path (overrides compilerOptions.outDir)")]
    out: Option<PathBuf>,

    #[arg(long = "dry-run", short = 'd', help = "Only print replacements, don't write files")]
    dry_run: bool,

    #[arg(long, short, help = "Print the run report even when writing files")]
    verbose: bool,

    #[arg(long, short, conflicts_with = "verbose", help = "Only print errors")]
    quiet: bool,

    #[arg(long, help = "Process files one at a time on a single thread")]
    sync: bool,

    #[arg(long, help = "Number of files processed concurrently")]
    concurrency: Option<usize>,

    #[arg(long, help = "Where alias targets are looked up: source, output")]
    resolve_from: Option<ResolveFrom>,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let flag = |set: bool| set.then_some(true);

    alias_rewrite::cli::commands::replace::run(ReplaceOptions {
        project: cli.project,
        src: cli.src,
        out: cli.out,
        overrides: SettingsOverrides {
            dry_run: flag(cli.dry_run),
            verbose: flag(cli.verbose),
            sync: flag(cli.sync),
            concurrency: cli.concurrency,
            resolve_from: cli.resolve_from,
        },
        quiet: cli.quiet,
    })?;

    Ok(())
}
