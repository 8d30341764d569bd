use napi::Result as NapiResult;
use napi_derive::napi;
use serde::{Deserialize, Serialize};

use fintraj_core::engine::branch::{self, SimulationPatch};
use fintraj_core::types::{SimulationInput, SimulationOutput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Wire shape of a branching request.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BranchRequest {
    base_input: SimulationInput,
    branch_at_day: u32,
    #[serde(default)]
    modified_input: SimulationPatch,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BranchResponse {
    baseline: SimulationOutput,
    branch: SimulationOutput,
    branch_at_day: u32,
}

#[napi]
pub fn simulate(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fintraj_core::engine::simulate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simulate_branch(input_json: String) -> NapiResult<String> {
    let request: BranchRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let result = branch::simulate_branch(
        &request.base_input,
        request.branch_at_day,
        &request.modified_input,
    )
    .map_err(to_napi_error)?;
    let response = BranchResponse {
        baseline: result.baseline,
        branch: result.branch,
        branch_at_day: request.branch_at_day,
    };
    serde_json::to_string(&response).map_err(to_napi_error)
}

#[napi]
pub fn compare_branches(input_json: String) -> NapiResult<String> {
    let request: BranchRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let result = branch::simulate_branch(
        &request.base_input,
        request.branch_at_day,
        &request.modified_input,
    )
    .map_err(to_napi_error)?;
    let comparison =
        branch::compare_branches(result.baseline, result.branch, request.branch_at_day);
    serde_json::to_string(&comparison).map_err(to_napi_error)
}
