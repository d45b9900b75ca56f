use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use projgraph::formatters::{JsonFormatter, SummaryFormatter};
use projgraph::{Report, ScanOptions, ScanSession};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "projgraph",
    version,
    about = "Static import graph and file criticality map for a source tree"
)]
struct Cli {
    /// Root directory to analyze
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    input: PathBuf,

    /// TOML file with scan options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Comma-separated extension allow-list (dot optional)
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    include: Vec<String>,

    /// Comma-separated folder names to skip wherever they appear
    #[arg(long, value_name = "DIRS", value_delimiter = ',')]
    exclude: Vec<String>,

    /// Root-relative path of the entry point
    #[arg(long, value_name = "PATH")]
    main_file: Option<String>,

    /// Reader threads (0 = one per core)
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Per-file read timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Folder levels shown in the summary tree before collapsing
    #[arg(long, value_name = "N", default_value_t = 4)]
    tree_depth: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Write output here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Summary,
    Json,
    JsonCompact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_options(cli: &Cli) -> Result<ScanOptions> {
    let mut options = match &cli.config {
        Some(path) => ScanOptions::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScanOptions::default(),
    };

    if !cli.include.is_empty() {
        options.include_extensions = cli.include.clone();
    }
    if !cli.exclude.is_empty() {
        options.exclude_folders = cli.exclude.clone();
    }
    if let Some(main_file) = &cli.main_file {
        options.main_file = Some(main_file.clone());
    }
    if let Some(workers) = cli.workers {
        options.workers = workers;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        options.read_timeout_ms = timeout_ms;
    }

    Ok(options)
}

fn render(report: &Report, cli: &Cli) -> Result<String> {
    match cli.format {
        OutputFormat::Summary => SummaryFormatter::new()
            .with_max_tree_depth(cli.tree_depth)
            .format_report(report),
        OutputFormat::Json => JsonFormatter::new().format_report(report),
        OutputFormat::JsonCompact => JsonFormatter::compact().format_report(report),
    }
}

fn run(cli: Cli) -> Result<()> {
    let start_time = Instant::now();
    let options = build_options(&cli)?;

    let mut session = ScanSession::new(cli.input.clone(), options);
    tracing::info!("Analyzing {}", session.root().display());
    let report = session.refresh()?;
    let rendered = render(report, &cli)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }

    tracing::info!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
