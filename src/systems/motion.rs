//! Per-particle equations of motion: gravity, wind-relative drag and burn.

use glam::DVec2;

use crate::components::particle::{Particle, ParticleKind};
use crate::core::environment::Environment;
use crate::core::integrator::{rk4_step, OdeSystem};
use crate::core::particle_set::ParticleSet;

/// Drag coefficient for a spherical particle, unitless.
const DRAG_COEFF: f64 = 0.4;

/// Remaining mass fraction below which a burning particle counts as spent.
/// The final live tick leaves a floating-point residue of the starting mass,
/// and the drag scale grows as mass^(-1/3) as the mass approaches zero.
const BURNOUT_MASS_FRACTION: f64 = 1e-9;

/// The two-equation velocity system for one particle. Wind is sampled once
/// per step; drag acts against the apparent (wind-relative) velocity.
struct DragSystem {
    mass: f64,
    radius: f64,
    wind: f64,
    vel: DVec2,
}

impl OdeSystem<2> for DragSystem {
    fn state(&self) -> [f64; 2] {
        [self.vel.x, self.vel.y]
    }

    fn derivative(&self, _time: f64, state: [f64; 2]) -> [f64; 2] {
        let apparent = DVec2::new(state[0] - self.wind, state[1]);
        let speed = apparent.length();
        // Zero relative airflow or a fully burned-out mass produces no drag.
        let scale = if speed > 0.0 && self.mass > 0.0 {
            let area = std::f64::consts::PI * self.radius * self.radius;
            let drag_force = 0.5 * Environment::DENSITY_AIR * speed * speed * area * DRAG_COEFF;
            drag_force / (self.mass * speed)
        } else {
            0.0
        };
        [-scale * apparent.x, -Environment::G - scale * apparent.y]
    }
}

/// Advance one particle by `dt` seconds at absolute time `time`.
///
/// Burning particles consume mass first so the drag derivative sees the
/// current mass and radius. Velocity is integrated with RK4 over the
/// particle's local elapsed time; position then advances by forward Euler
/// using the freshly integrated velocity. Not symplectic, but accurate
/// enough at render-rate steps.
pub fn update_position(particle: &mut Particle, time: f64, dt: f64, env: &Environment) {
    if let ParticleKind::Burning {
        burn_rate,
        density,
        starting_mass,
    } = particle.kind
    {
        let mut mass = starting_mass - (time - particle.creation_time) * burn_rate;
        if mass < starting_mass * BURNOUT_MASS_FRACTION {
            mass = 0.0;
        }
        particle.mass = mass;
        particle.radius = Particle::sphere_radius(mass, density);
    }

    let system = DragSystem {
        mass: particle.mass,
        radius: particle.radius,
        wind: env.wind_velocity(),
        vel: particle.vel,
    };
    let local_time = time - particle.creation_time;
    let next = rk4_step(&system, local_time, dt);
    particle.vel = DVec2::new(next[0], next[1]);
    particle.pos += particle.vel * dt;
}

/// Advance every particle in the live set.
pub fn update_particles(particles: &mut ParticleSet, time: f64, dt: f64, env: &Environment) {
    for particle in particles.iter_mut() {
        update_position(particle, time, dt, env);
    }
}
