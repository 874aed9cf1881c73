//! Command-line front end for the step-emitting sorting engine.
//!
//! `stepsort run <algorithm>` sorts a given or generated integer sequence,
//! optionally paced, capped and traced, and prints the result with per-kind
//! step counts. `stepsort list` shows the available algorithms.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use stepsort::core::algorithm::Algorithm;
use stepsort::exit_codes;
use stepsort::io::config::{SortConfig, load_config, write_config};
use stepsort::io::input::parse_values;
use stepsort::logging;
use stepsort::session::{SessionReport, SessionSettings, SessionStop, run_session};

const DEFAULT_CONFIG: &str = "stepsort.toml";

#[derive(Parser)]
#[command(
    name = "stepsort",
    version,
    about = "Run sorting algorithms step by step"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every algorithm identifier and its display name.
    List {
        /// Include a description with typical complexity.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Sort one sequence and print the outcome.
    Run(RunArgs),
    /// Write a config file holding the defaults.
    Init {
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Algorithm identifier (e.g. `merge`) or display name.
    algorithm: String,
    /// Comma-separated integers to sort instead of generated input.
    #[arg(long, allow_hyphen_values = true)]
    values: Option<String>,
    /// Number of generated elements.
    #[arg(long)]
    size: Option<usize>,
    /// Generate evenly spaced values instead of random ones.
    #[arg(long)]
    uniform: bool,
    /// Seed for input generation and bogo sort.
    #[arg(long)]
    seed: Option<u64>,
    /// Cancel after this many steps (0 = unlimited).
    #[arg(long)]
    max_steps: Option<u64>,
    /// Pause after every step, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Write every step as a JSON line to this file.
    #[arg(long)]
    trace: Option<PathBuf>,
    /// Config file; defaults to `stepsort.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::List { verbose } => {
            cmd_list(verbose);
            Ok(exit_codes::OK)
        }
        Command::Run(args) => cmd_run(args),
        Command::Init { config, force } => {
            cmd_init(&config, force)?;
            Ok(exit_codes::OK)
        }
    }
}

fn cmd_list(verbose: bool) {
    for algorithm in Algorithm::ALL {
        println!("{}\t{}", algorithm.id(), algorithm.display_name());
        if verbose {
            println!("\t{}", algorithm.description());
        }
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (pass --force to overwrite)", path.display());
    }
    write_config(path, &SortConfig::default())?;
    println!("wrote {}", path.display());
    Ok(())
}

fn cmd_run(args: RunArgs) -> Result<i32> {
    let algorithm: Algorithm = args.algorithm.parse()?;
    let cfg = resolve_config(&args)?;
    let values = args.values.as_deref().map(parse_values).transpose()?;

    let mut settings = SessionSettings::from_config(algorithm, &cfg, values);
    settings.trace = args.trace;
    let report = run_session(&settings)?;
    print_report(&report);

    Ok(match report.stop {
        SessionStop::Completed => exit_codes::OK,
        SessionStop::StepLimit { .. } => exit_codes::CANCELLED,
    })
}

/// Load the config file and fold CLI overrides into it.
fn resolve_config(args: &RunArgs) -> Result<SortConfig> {
    let mut cfg = match &args.config {
        Some(path) if !path.exists() => bail!("config {} not found", path.display()),
        Some(path) => load_config(path)?,
        None => load_config(Path::new(DEFAULT_CONFIG))?,
    };
    if let Some(size) = args.size {
        cfg.input.size = size;
    }
    if args.uniform {
        cfg.input.uniform = true;
    }
    if let Some(seed) = args.seed {
        cfg.run.seed = Some(seed);
    }
    if let Some(max_steps) = args.max_steps {
        cfg.run.max_steps = max_steps;
    }
    if let Some(delay_ms) = args.delay_ms {
        cfg.run.delay_ms = delay_ms;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn print_report(report: &SessionReport) {
    println!("algorithm: {}", report.algorithm.display_name());
    println!("input:     {}", join(&report.input));
    println!("result:    {}", join(&report.outcome.sequence));
    let counts: Vec<String> = report
        .tally
        .counts()
        .into_iter()
        .map(|(kind, count)| format!("{} {count}", kind.as_str()))
        .collect();
    println!(
        "steps:     {} ({})",
        report.outcome.steps,
        counts.join(", ")
    );
    match report.stop {
        SessionStop::Completed => println!("status:    completed"),
        SessionStop::StepLimit { max_steps } => println!(
            "status:    cancelled at step limit {max_steps} ({}/{} sorted)",
            report.tally.sorted_count(),
            report.input.len()
        ),
    }
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
