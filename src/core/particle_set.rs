//! Live-particle storage.

use crate::api::types::ParticleId;
use crate::components::particle::Particle;

/// The live set: every not-yet-expired particle, in a flat Vec.
/// Designed for small-to-medium counts (hundreds, not millions).
/// Ids are assigned on spawn and stay valid until the particle expires,
/// so emitters can observe a host particle without owning it.
pub struct ParticleSet {
    particles: Vec<Particle>,
    next_id: u32,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a set with a specific particle capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            next_id: 1,
        }
    }

    /// Add a particle, assigning it a fresh id. Returns the id.
    pub fn spawn(&mut self, mut particle: Particle) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        particle.id = id;
        self.particles.push(particle);
        id
    }

    /// Add a whole launch batch.
    pub fn spawn_batch(&mut self, batch: Vec<Particle>) {
        for particle in batch {
            self.spawn(particle);
        }
    }

    /// Drop every particle whose lifetime has run out at `time`.
    /// Removal order is not stable and does not need to be.
    pub fn retain_alive(&mut self, time: f64) {
        self.particles.retain(|p| p.is_alive(time));
    }

    /// Get a reference to a particle by id, if it is still live.
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    /// Get a mutable reference to a particle by id.
    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.iter_mut().find(|p| p.id == id)
    }

    /// Iterate over all live particles.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Iterate over all live particles mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Default for ParticleSet {
    fn default() -> Self {
        Self::new()
    }
}
