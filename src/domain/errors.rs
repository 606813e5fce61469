// Engine errors - contract violations detected by the window engine
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("series set mismatch (missing: {missing:?}, unexpected: {unexpected:?})")]
    SeriesMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("series '{id}' carries {actual} values for {expected} timestamps")]
    LengthMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("timestamps not strictly increasing at index {index}: {previous} then {current}")]
    NonIncreasingTime {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("timestamp at index {index} is not finite: {value}")]
    NonFiniteTime { index: usize, value: f64 },

    #[error("series '{0}' appears more than once in the batch")]
    DuplicateSeries(String),

    #[error("seed batch carries no timestamps")]
    EmptySeed,

    #[error("invalid window settings: {0}")]
    InvalidSettings(String),
}
