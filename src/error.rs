//! Error type shared by the kinetics, the integrators and the task loader.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PyrolysisError {
    /// non-physical kinetic or numerical parameter (A, E, T, dt, tolerances, fractions)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// adaptive stepper gave up: step fell below h_min, step budget exhausted or state blew up
    #[error("Integration failure at t = {t:.6e} (h = {h:.3e}): {reason}")]
    IntegrationFailure { t: f64, h: f64, reason: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Failed to parse task: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PyrolysisError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        PyrolysisError::InvalidParameter(msg.into())
    }

    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        PyrolysisError::InvalidConfiguration(msg.into())
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, PyrolysisError::InvalidParameter(_))
    }

    pub fn is_integration_failure(&self) -> bool {
        matches!(self, PyrolysisError::IntegrationFailure { .. })
    }
}
