use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use fintraj_core::engine::branch::{compare_branches, simulate_branch, SimulationPatch};
use fintraj_core::types::{SimulationInput, SimulationOutput};

use crate::input;

/// Wire shape of a branching request.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRequest {
    pub base_input: SimulationInput,
    pub branch_at_day: u32,
    #[serde(default)]
    pub modified_input: SimulationPatch,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BranchResponse {
    baseline: SimulationOutput,
    branch: SimulationOutput,
    branch_at_day: u32,
}

/// Arguments for a what-if branch run
#[derive(Args)]
pub struct BranchArgs {
    /// Path to a JSON branch request (piped stdin if omitted)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a branch comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to a JSON branch request (piped stdin if omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_branch(args: BranchArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: BranchRequest = input::read_input(args.input.as_deref(), "branch")?;
    let result = simulate_branch(
        &request.base_input,
        request.branch_at_day,
        &request.modified_input,
    )?;
    Ok(serde_json::to_value(BranchResponse {
        baseline: result.baseline,
        branch: result.branch,
        branch_at_day: request.branch_at_day,
    })?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: BranchRequest = input::read_input(args.input.as_deref(), "compare")?;
    let result = simulate_branch(
        &request.base_input,
        request.branch_at_day,
        &request.modified_input,
    )?;
    let comparison = compare_branches(result.baseline, result.branch, request.branch_at_day);
    Ok(serde_json::to_value(comparison)?)
}
