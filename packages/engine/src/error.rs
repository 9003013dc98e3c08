use thiserror::Error;

/// Failures raised by profile construction and the simulation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid area profile: {0}")]
    InvalidProfile(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A step produced a non-finite height, velocity or time delta.
    #[error("simulation diverged (height={height}, velocity={velocity}, dt={dt})")]
    SimulationDiverged { height: f64, velocity: f64, dt: f64 },

    #[error("engine was stopped; construct a new engine to simulate again")]
    AlreadyStopped,
}
