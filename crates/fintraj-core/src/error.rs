use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinTrajError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("No exchange rate for {from}->{to} (neither direct nor inverse)")]
    NoExchangeRate { from: String, to: String },

    #[error("Unknown dependency '{0}' in component graph")]
    UnknownDependency(String),

    #[error("Dependency cycle in component graph")]
    DependencyCycle,

    #[error("Non-finite value produced in {context}")]
    NonFinite { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinTrajError {
    fn from(e: serde_json::Error) -> Self {
        FinTrajError::SerializationError(e.to_string())
    }
}
