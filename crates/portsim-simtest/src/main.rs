//! PortSim Headless Simulation Harness
//!
//! Runs command files through the engine and checks the resulting reports.
//! Runs entirely in-process, with no networking or rendering.
//!
//! Usage:
//!   cargo run -p portsim-simtest -- run testcases/input_0.txt
//!   cargo run -p portsim-simtest -- check input_0.txt expected_output_0.txt
//!   cargo run -p portsim-simtest -- suite crates/portsim-simtest/testcases --verbose

mod harness;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use harness::{compare_reports, discover_cases, load_rules, print_mismatches, run_case, run_file};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Run PortSim command files and check their reports",
    long_about = None
)]
struct Cli {
    /// JSON rules file (heavy threshold, capacity mode)
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Log declined operations and per-case details
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Run a command file and print or write its report
    Run {
        input: PathBuf,
        /// Write the report here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Print run statistics as JSON after the report
        #[arg(long)]
        stats: bool,
    },
    /// Run a command file and compare its report with an expected file
    Check { input: PathBuf, expected: PathBuf },
    /// Run every input_<i>.txt in a directory against expected_output_<i>.txt
    Suite { dir: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rules = load_rules(cli.rules.as_deref())?;
    let ok = match cli.command {
        Mode::Run {
            input,
            output,
            stats,
        } => {
            let run = run_file(&input, &rules)?;
            match output {
                Some(path) => fs::write(&path, &run.report)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => print!("{}", run.report),
            }
            if stats {
                println!("{}", serde_json::to_string_pretty(&run.stats)?);
            }
            true
        }
        Mode::Check { input, expected } => {
            let run = run_file(&input, &rules)?;
            let want = fs::read_to_string(&expected)
                .with_context(|| format!("reading {}", expected.display()))?;
            let mismatches = compare_reports(&run.report, &want);
            print_mismatches(&input, &expected, &mismatches);
            if mismatches.is_empty() {
                println!("Report matches {}", expected.display());
            }
            mismatches.is_empty()
        }
        Mode::Suite { dir } => run_suite(&dir, &rules, cli.verbose)?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_suite(dir: &std::path::Path, rules: &portsim_logic::Rules, verbose: bool) -> Result<bool> {
    println!("=== PortSim Fixture Suite ===\n");

    let cases = discover_cases(dir)?;
    let mut results = Vec::with_capacity(cases.len());
    for (index, input) in &cases {
        println!("--- Case {} ---", index);
        results.push(run_case(dir, *index, input, rules)?);
    }

    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} case {}: {}", icon, r.index, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );
    Ok(failed == 0)
}
