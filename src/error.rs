//! Error types for chemlab
//!
//! Only construction and parsing can fail. Lab actions never error: they
//! report an [`ActionOutcome`](crate::lab::ActionOutcome) instead.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// chemlab error types
#[derive(Error, Debug)]
pub enum Error {
    /// Experiment name outside the closed set
    #[error("Unknown experiment: {0}\nExpected one of: pH Testing, Flame Tests, Gas Tests, Displacement Reactions, Paper Chromatography, Filtration, Evaporation, Decanting")]
    UnknownExperiment(String),

    /// Test tool identifier outside the closed set
    #[error("Unknown test tool: {0}\nExpected one of: lit-splint, glowing-splint, limewater, damp-litmus")]
    UnknownTestTool(String),

    /// Lab configuration or fixture catalog rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fixture JSON could not be parsed
    #[error("Fixture parse error: {0}")]
    Fixture(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
