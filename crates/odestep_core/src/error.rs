use thiserror::Error;

/// Caller contract violations detected before any stepping begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OdeError {
    #[error("Unknown ODE scheme \"{0}\" (expected Euler, Heun or RK4).")]
    UnknownScheme(String),

    #[error("State dimension must be greater than zero.")]
    ZeroDimension,

    #[error("Trajectory buffer size mismatch. Expected {expected} elements, got {actual}.")]
    BufferSize { expected: usize, actual: usize },

    #[error("Vector field dimension {field} does not match trajectory dimension {trajectory}.")]
    DimensionMismatch { field: usize, trajectory: usize },

    #[error("Vector field requires dimension of at least {required}, got {actual}.")]
    DimensionTooSmall { required: usize, actual: usize },

    #[error("Initial state dimension mismatch. Expected {expected}, got {actual}.")]
    InitialState { expected: usize, actual: usize },

    #[error("Step size must be finite, got {0}.")]
    InvalidStepSize(f64),

    #[error("Step count must be at least 1.")]
    NoSteps,
}
