use thiserror::Error;

/// Canonical result for the harness.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Synthetic platforms and operators never run anything.
    #[error("execution not supported: {0}")]
    UnsupportedExecution(String),

    #[error(
        "conversion graph density unsatisfiable: {requested} random conversions requested, \
         only {available} distinct cross-platform channel pairs exist"
    )]
    DensityUnsatisfiable { requested: usize, available: usize },

    #[error("loop-head {role} slot {index} has no copy (operator has {slots} slots)")]
    SlotIndexMismatch {
        role: &'static str,
        index: usize,
        slots: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Planning error: {0}")]
    Plan(String),

    #[error("Hashing error: {0}")]
    Hash(String),

    #[error("Internal invariant failed: {0}")]
    Invariant(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Hash(e.to_string())
    }
}
