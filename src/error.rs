//! Error types for simulation configuration and emitter construction.

use std::fmt;

/// Errors raised when wind or launch-angle configuration falls outside its
/// validated range. Always recoverable: the previous valid state is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Wind velocity outside [-20, 20] km/h.
    WindOutOfRange(f64),
    /// Launch angle outside [-15, 15] degrees.
    LaunchAngleOutOfRange(f64),
    /// An emitter rejected its construction parameters.
    Emitter(EmitterError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::WindOutOfRange(v) => {
                write!(f, "wind velocity {} km/h outside [-20, 20]", v)
            }
            ConfigError::LaunchAngleOutOfRange(v) => {
                write!(f, "launch angle {} degrees outside [-15, 15]", v)
            }
            ConfigError::Emitter(e) => write!(f, "emitter configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Emitter(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EmitterError> for ConfigError {
    fn from(e: EmitterError) -> Self {
        ConfigError::Emitter(e)
    }
}

/// Errors raised when an emitter is given illegal launch parameters.
/// These are construction-time invariant violations, not runtime conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmitterError {
    /// Firing angle outside [-180, 180] degrees at construction, or outside
    /// the steerable [-15, 15] range when mutated on a running emitter.
    FiringAngleOutOfRange(f64),
    /// Angle variation outside [0, 180] degrees.
    VariationOutOfRange(f64),
    /// Emitters must launch at least one particle per call.
    NothingToLaunch,
}

impl fmt::Display for EmitterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitterError::FiringAngleOutOfRange(v) => {
                write!(f, "firing angle {} degrees out of range", v)
            }
            EmitterError::VariationOutOfRange(v) => {
                write!(f, "angle variation {} degrees outside [0, 180]", v)
            }
            EmitterError::NothingToLaunch => {
                write!(f, "emitter must launch at least one particle")
            }
        }
    }
}

impl std::error::Error for EmitterError {}
