//! Typed errors for the scoring library
//!
//! IO-facing code (loading, configuration, binaries) wraps these in `anyhow` with context.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    #[error("Degenerate weight vector: total weight is {total}")]
    DegenerateWeights { total: f64 },

    #[error("Negative weight {weight} for criterion '{criterion}'")]
    NegativeWeight { criterion: String, weight: f64 },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Unknown procedure: {0}")]
    UnknownProcedure(String),

    #[error("Unknown criterion: {0}")]
    UnknownCriterion(String),
}
