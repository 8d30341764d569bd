mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::branch::{BranchArgs, CompareArgs};
use commands::simulate::SimulateArgs;

/// Deterministic personal-finance trajectory simulation
#[derive(Parser)]
#[command(
    name = "fintraj",
    version,
    about = "Deterministic personal-finance trajectory simulation",
    long_about = "Projects a personal financial trajectory day by day with exact \
                  decimal arithmetic and a seeded random stream. Supports Monte \
                  Carlo fan-out, what-if branching, and branch comparison."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full simulation (single run or Monte Carlo)
    Simulate(SimulateArgs),
    /// Run a baseline plus a what-if branch
    Branch(BranchArgs),
    /// Run a what-if branch and report per-metric deltas
    Compare(CompareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Branch(args) => commands::branch::run_branch(args),
        Commands::Compare(args) => commands::branch::run_compare(args),
        Commands::Version => {
            println!("fintraj {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
