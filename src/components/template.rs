//! Particle templates: immutable physical-parameter prototypes.

use glam::DVec2;

use crate::api::types::ParticleId;
use crate::components::color::Color;
use crate::components::particle::{Particle, ParticleKind};

/// A parameter prototype held by an emitter. A template has no meaningful
/// position, velocity or creation time; live particles are produced with
/// [`ParticleTemplate::instantiate`]. Emitters never mutate their template
/// during a launch.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleTemplate {
    lifetime: f64,
    mass: f64,
    radius: f64,
    color: Color,
    kind: ParticleKind,
}

impl ParticleTemplate {
    /// A plain spark template.
    pub fn plain(lifetime: f64, mass: f64, radius: f64, color: Color) -> Self {
        assert!(mass > 0.0 && radius > 0.0, "template needs positive mass and radius");
        ParticleTemplate {
            lifetime,
            mass,
            radius,
            color,
            kind: ParticleKind::Plain,
        }
    }

    /// A burning star template. The lifetime is the time to fully consume
    /// the mass; the radius follows from the density assuming a sphere.
    pub fn burning(mass: f64, color: Color, burn_rate: f64, density: f64) -> Self {
        assert!(mass > 0.0 && burn_rate > 0.0 && density > 0.0, "burning template needs positive mass, burn rate and density");
        ParticleTemplate {
            lifetime: mass / burn_rate,
            mass,
            radius: Particle::sphere_radius(mass, density),
            color,
            kind: ParticleKind::Burning {
                burn_rate,
                density,
                starting_mass: mass,
            },
        }
    }

    /// A launch streak template. `origin` is the fixed end of the rendered
    /// line, normally the launcher tip.
    pub fn streak(origin: DVec2, lifetime: f64, mass: f64, radius: f64, color: Color) -> Self {
        assert!(mass > 0.0 && radius > 0.0, "template needs positive mass and radius");
        ParticleTemplate {
            lifetime,
            mass,
            radius,
            color,
            kind: ParticleKind::Streak { origin },
        }
    }

    pub fn lifetime(&self) -> f64 {
        self.lifetime
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Retint particles produced from this template.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Move the streak origin. No effect on other template kinds.
    pub fn set_origin(&mut self, origin: DVec2) {
        if let ParticleKind::Streak { origin: o } = &mut self.kind {
            *o = origin;
        }
    }

    /// Produce a live particle from this template. The id is assigned when
    /// the particle enters a live set.
    pub fn instantiate(&self, pos: DVec2, vel: DVec2, creation_time: f64) -> Particle {
        Particle {
            id: ParticleId::UNASSIGNED,
            pos,
            vel,
            creation_time,
            lifetime: self.lifetime,
            mass: self.mass,
            radius: self.radius,
            color: self.color,
            kind: self.kind,
        }
    }
}
