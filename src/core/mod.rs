pub mod environment;
pub mod integrator;
pub mod particle_set;
