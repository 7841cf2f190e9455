pub mod api;
pub mod components;
pub mod core;
pub mod error;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::simulation::{CandleConfig, Simulation};
pub use api::types::{pack_render_points, ParticleId, ParticleView, RenderKind, RenderPoint};
pub use components::color::Color;
pub use components::emitter::{Emitter, MobileEmitter};
pub use components::particle::{Particle, ParticleKind};
pub use components::template::ParticleTemplate;
pub use core::environment::Environment;
pub use core::integrator::{rk4_step, OdeSystem};
pub use core::particle_set::ParticleSet;
pub use error::{ConfigError, EmitterError};
pub use systems::motion::{update_particles, update_position};
pub use systems::rng::Rng;
