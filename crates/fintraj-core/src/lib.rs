pub mod config;
pub mod dag;
pub mod engine;
pub mod error;
pub mod fx;
pub mod rng;
pub mod tax;
pub mod types;

pub use config::EngineConfig;
pub use error::FinTrajError;
pub use types::*;

pub use engine::branch::{compare_branches, merge_patch, simulate_branch};
pub use engine::{simulate, simulate_single_run, simulate_with_config};

/// Standard result type for all engine operations
pub type FinTrajResult<T> = Result<T, FinTrajError>;
