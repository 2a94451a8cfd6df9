use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Why a simulation was refused. Raised before any simulated time passes,
/// so a failed call never yields a partial trace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("invalid workload: {0}")]
    InvalidWorkload(String),

    #[error("missing parameter: {0} must be a positive integer")]
    MissingParameter(&'static str),

    #[error("unsupported algorithm: {0:?}")]
    UnsupportedAlgorithm(String),
}
