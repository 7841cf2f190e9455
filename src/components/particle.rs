//! The live particle data model.

use glam::DVec2;

use crate::api::types::ParticleId;
use crate::components::color::Color;

/// How a particle behaves beyond basic point kinematics.
///
/// One tagged variant instead of a type hierarchy: cloning any particle is a
/// plain value copy, and the renderer can match on the kind to pick point
/// versus line drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    /// A simple spark, constant mass and radius.
    Plain,
    /// A star whose mass burns away at a constant rate. The radius follows
    /// from the remaining mass at constant density (spherical shape).
    Burning {
        /// Mass loss rate, kg/s.
        burn_rate: f64,
        /// Material density, kg/m^3.
        density: f64,
        /// Mass at creation, kg.
        starting_mass: f64,
    },
    /// A launch streak, drawn as a line from a fixed origin to the current
    /// position. The origin is never touched by physics.
    Streak { origin: DVec2 },
}

/// One live particle. Spawned into a [`ParticleSet`](crate::ParticleSet),
/// which assigns the id; removed when its lifetime runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Unique id within the live set. [`ParticleId::UNASSIGNED`] until spawned.
    pub id: ParticleId,
    /// Position in metres.
    pub pos: DVec2,
    /// Velocity in m/s.
    pub vel: DVec2,
    /// Absolute creation time in seconds.
    pub creation_time: f64,
    /// Lifetime in seconds.
    pub lifetime: f64,
    /// Mass in kg. Strictly positive while the drag model is evaluated.
    pub mass: f64,
    /// Radius in metres.
    pub radius: f64,
    pub color: Color,
    pub kind: ParticleKind,
}

impl Particle {
    /// Whether the particle is still within its lifetime at `time`.
    pub fn is_alive(&self, time: f64) -> bool {
        time - self.creation_time <= self.lifetime
    }

    /// Radius of a constant-density sphere with the given mass.
    pub fn sphere_radius(mass: f64, density: f64) -> f64 {
        (3.0 * (mass / density) / (4.0 * std::f64::consts::PI)).cbrt()
    }
}
