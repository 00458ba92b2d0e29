#![warn(missing_docs)]
//! SweepBench CLI Library
//!
//! This module provides the CLI for size sweeps over registered strategies.
//! Use `sweepbench::run()` (or `sweepbench_cli::run()`) in your main function to get the
//! full sweepbench CLI with the built-in strategies and any you register.
//!
//! # Example
//!
//! ```ignore
//! use sweepbench::StrategyDef;
//!
//! fn count_digits(text: &str) -> usize {
//!     text.bytes().filter(u8::is_ascii_digit).count()
//! }
//!
//! inventory::submit! {
//!     StrategyDef {
//!         id: "digits",
//!         group: "digits",
//!         order: 0,
//!         isolate: false,
//!         description: "Count ASCII digits",
//!         run: count_digits,
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     sweepbench_cli::run()
//! }
//! ```

mod builtin;
mod config;
mod execution;
mod input;
mod metadata;
mod planner;

pub use builtin::{count_capitals_iterative, count_capitals_recursive};
pub use config::*;
pub use execution::{
    ProgressObserver, SweepExecution, SweepSettings, execute_sweep, strategies_from_defs,
};
pub use input::{ALPHABET, TextGenerator};
pub use metadata::build_report_meta;
pub use planner::{SweepPlan, build_plan};

use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sweepbench_core::{ExecutorConfig, StrategyDef};
use sweepbench_report::{
    ChartOptions, OutputFormat, Report, generate_csv_report, generate_human_report,
    generate_json_report, generate_svg_chart, generate_text_table,
};
use tracing_subscriber::EnvFilter;

/// SweepBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "sweepbench")]
#[command(
    author,
    version,
    about = "SweepBench - latency vs input size, with crashing runs contained"
)]
pub struct Cli {
    /// Optional subcommand (List, Run, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter strategies by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Run strategies of this group only
    #[arg(long)]
    pub group: Option<String>,

    /// Comma-separated input sizes (e.g. 3000,8000,131000)
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<usize>>,

    /// Seed of the random text generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format: human, csv, json
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Results table file (defaults to target/sweepbench/results.txt)
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Chart file (defaults to target/sweepbench/chart.svg)
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Stack size of isolated threads in bytes
    #[arg(long)]
    pub stack_size: Option<usize>,

    /// Red zone at the bottom of isolated stacks in bytes
    #[arg(long)]
    pub red_zone: Option<usize>,

    /// Stop waiting for an isolated run after this long (e.g. "30s")
    #[arg(long)]
    pub timeout: Option<String>,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all discovered strategies
    List,
    /// Run the sweep (default)
    Run,
    /// Write a default sweep.toml to the current directory
    Init {
        /// Overwrite an existing sweep.toml
        #[arg(long)]
        force: bool,
    },
}

/// Run the SweepBench CLI with the process arguments.
/// This is the main entry point for sweep binaries.
///
/// # Returns
/// Returns `Ok(())` on success, including sweeps where points failed.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the SweepBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose);

    // Discover sweep.toml configuration (CLI flags override)
    let config = SweepConfig::discover()?.unwrap_or_default();

    match cli.command {
        Some(Commands::List) => list_strategies(&cli, &config),
        Some(Commands::Init { force }) => init_config(Path::new("sweep.toml"), force),
        Some(Commands::Run) | None => run_sweep_command(&cli, &config),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "sweepbench=debug"
    } else {
        "sweepbench=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded or under test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Select registered strategies based on CLI and config options.
///
/// Returns strategies in declared order.
fn plan_strategies(cli: &Cli, config: &SweepConfig) -> anyhow::Result<SweepPlan> {
    let filter_re = Regex::new(&cli.filter)
        .with_context(|| format!("Invalid filter pattern: {}", cli.filter))?;
    let group = cli.group.as_deref().or(config.sweep.group.as_deref());

    Ok(build_plan(
        inventory::iter::<StrategyDef>,
        Some(&filter_re),
        group,
    ))
}

fn list_strategies(cli: &Cli, config: &SweepConfig) -> anyhow::Result<()> {
    println!("SweepBench Plan:");

    let plan = plan_strategies(cli, config)?;

    let mut groups: std::collections::BTreeMap<&str, Vec<&StrategyDef>> =
        std::collections::BTreeMap::new();
    for strategy in &plan.strategies {
        groups.entry(strategy.group).or_default().push(strategy);
    }

    for (group, strategies) in &groups {
        println!("├── group: {}", group);
        for strategy in strategies {
            let mode = if strategy.isolate {
                "isolated"
            } else {
                "direct"
            };
            println!(
                "│   ├── {} [{}] {}",
                strategy.id, mode, strategy.description
            );
        }
    }

    println!("{} strategies found.", plan.strategies.len());
    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    std::fs::write(path, SweepConfig::default_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Build the executor config by layering: sweep.toml values → CLI overrides.
fn build_executor_config(cli: &Cli, config: &SweepConfig) -> anyhow::Result<ExecutorConfig> {
    let mut executor = config.executor_config()?;

    if let Some(stack_size) = cli.stack_size {
        executor.stack_size = stack_size;
    }
    if let Some(red_zone) = cli.red_zone {
        executor.red_zone = red_zone;
    }
    if let Some(ref timeout) = cli.timeout {
        executor.timeout = Some(Duration::from_nanos(SweepConfig::parse_duration(timeout)?));
    }

    if executor.red_zone >= executor.stack_size {
        return Err(anyhow::anyhow!(
            "Red zone ({} bytes) must be smaller than the stack size ({} bytes)",
            executor.red_zone,
            executor.stack_size
        ));
    }

    Ok(executor)
}

fn run_sweep_command(cli: &Cli, config: &SweepConfig) -> anyhow::Result<()> {
    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(anyhow::Error::msg)?;

    let plan = plan_strategies(cli, config)?;
    if plan.is_empty() {
        println!("No strategies found.");
        return Ok(());
    }

    let settings = SweepSettings {
        sizes: cli
            .sizes
            .clone()
            .unwrap_or_else(|| config.sweep.sizes.clone()),
        seed: cli.seed.unwrap_or(config.sweep.seed),
        executor: build_executor_config(cli, config)?,
        show_progress: !cli.no_progress,
    };

    eprintln!(
        "Running {} strategies over {} sizes (seed {})...\n",
        plan.strategies.len(),
        settings.sizes.len(),
        settings.seed
    );

    let execution = execute_sweep(&plan.strategies, &settings)?;

    let meta = build_report_meta(
        &config.sweep.title,
        Some(settings.seed),
        &settings.executor,
    );
    let report = Report::from_table(&execution.table, meta, execution.total_duration_ms);

    // Artifacts
    let table_path = cli
        .table
        .clone()
        .unwrap_or_else(|| config.output.table_path());
    write_artifact(&table_path, &generate_text_table(&report))?;
    eprintln!("Table written to: {}", table_path.display());

    let chart_path = cli
        .chart
        .clone()
        .unwrap_or_else(|| config.output.chart_path());
    let chart_options = ChartOptions {
        title: config.chart.title.clone(),
        width: config.chart.width,
        height: config.chart.height,
        ..ChartOptions::default()
    };
    write_artifact(&chart_path, &generate_svg_chart(&report, &chart_options))?;
    eprintln!("Chart written to: {}", chart_path.display());

    // Generate output
    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Csv => generate_csv_report(&report),
        OutputFormat::Human => generate_human_report(&report),
    };

    // Write output
    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    // Failed points are results, not errors
    if report.summary.failed > 0 {
        tracing::info!(
            failed = report.summary.failed,
            "{} point(s) failed inside their isolated context",
            report.summary.failed
        );
    }

    Ok(())
}

/// Write a report artifact, creating parent directories as needed
fn write_artifact(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sweepbench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.filter, ".*");
        assert!(cli.sizes.is_none());
        assert!(!cli.no_progress);
    }

    #[test]
    fn test_parse_sizes_and_subcommand() {
        let cli = parse(&["--sizes", "10,100,1000", "--seed", "7", "list"]);
        assert_eq!(cli.sizes, Some(vec![10, 100, 1000]));
        assert_eq!(cli.seed, Some(7));
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_executor_overrides() {
        let cli = parse(&["--stack-size", "1048576", "--timeout", "500ms"]);
        let executor = build_executor_config(&cli, &SweepConfig::default()).unwrap();

        assert_eq!(executor.stack_size, 1_048_576);
        assert_eq!(executor.red_zone, sweepbench_core::DEFAULT_RED_ZONE);
        assert_eq!(executor.timeout, Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_red_zone_must_fit_stack() {
        let cli = parse(&["--stack-size", "4096", "--red-zone", "8192"]);
        assert!(build_executor_config(&cli, &SweepConfig::default()).is_err());
    }

    #[test]
    fn test_plan_uses_config_group() {
        let mut config = SweepConfig::default();
        config.sweep.group = Some("capitals".to_string());

        let plan = plan_strategies(&parse(&[]), &config).unwrap();
        let ids: Vec<_> = plan.strategies.iter().map(|s| s.id).collect();
        assert_eq!(ids, ["iterative", "recursive"]);
    }

    #[test]
    fn test_invalid_filter() {
        let cli = parse(&["("]);
        assert!(plan_strategies(&cli, &SweepConfig::default()).is_err());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.toml");

        init_config(&path, false).unwrap();
        assert!(SweepConfig::load(&path).is_ok());
        assert!(init_config(&path, false).is_err());
        init_config(&path, true).unwrap();
    }

    #[test]
    fn test_write_artifact_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/results.txt");

        write_artifact(&path, "ok").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ok");
    }
}
