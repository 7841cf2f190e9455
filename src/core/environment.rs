//! Wind and physical constants for the simulation run.

use crate::error::ConfigError;

const KMH_TO_MS: f64 = 1.0 / 3.6;

/// The environment the candle is fired in: a wind velocity along the x axis
/// plus process-wide physical constants. One instance per simulation run;
/// the wind is mutable while the run is live.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Wind velocity in m/s, signed, along the x axis only.
    wind_velocity: f64,
}

impl Environment {
    /// Air density close to sea level, kg/m^3.
    pub const DENSITY_AIR: f64 = 1.2;
    /// Acceleration due to Earth's gravity, m/s^2.
    pub const G: f64 = 9.807;
    /// Largest wind magnitude the simulation accepts, km/h.
    pub const MAX_WIND_KMH: f64 = 20.0;

    /// Create an environment from a wind velocity in km/h.
    pub fn new(wind_kmh: f64) -> Result<Self, ConfigError> {
        let mut env = Environment { wind_velocity: 0.0 };
        env.set_wind_velocity(wind_kmh)?;
        Ok(env)
    }

    /// Change the wind velocity, given in km/h. Out-of-range values are
    /// rejected and the previous wind is kept.
    pub fn set_wind_velocity(&mut self, wind_kmh: f64) -> Result<(), ConfigError> {
        if !wind_kmh.is_finite() || wind_kmh.abs() > Self::MAX_WIND_KMH {
            return Err(ConfigError::WindOutOfRange(wind_kmh));
        }
        self.wind_velocity = wind_kmh * KMH_TO_MS;
        Ok(())
    }

    /// The wind velocity in m/s.
    pub fn wind_velocity(&self) -> f64 {
        self.wind_velocity
    }
}
