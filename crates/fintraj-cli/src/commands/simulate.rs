use clap::Args;
use serde_json::Value;

use fintraj_core::engine;
use fintraj_core::types::SimulationInput;

use crate::input;

/// Arguments for a full simulation run
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON input file (piped stdin if omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Override the input's seed for a single deterministic run
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: SimulationInput = input::read_input(args.input.as_deref(), "simulate")?;
    let output = if args.seed.is_some() {
        engine::simulate_single_run(&sim_input, args.seed)?
    } else {
        engine::simulate(&sim_input)?
    };
    Ok(serde_json::to_value(output)?)
}
