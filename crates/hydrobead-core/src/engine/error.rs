use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid steric radius {value} for bead {index}: radii must be finite and positive")]
    InvalidRadius { index: usize, value: f64 },

    #[error("Cannot estimate from an empty ensemble")]
    EmptyEnsemble,

    #[error("Mobility trace matrix of size {size}x{size} is singular")]
    SingularMatrix { size: usize },

    #[error("Mobility oracle returned a {found}x{found} matrix for {expected} beads")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Chain generation gave up after {rejections} rejected placements")]
    RetryLimitExceeded { rejections: u64 },

    #[error("Computation was cancelled")]
    Cancelled,

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
