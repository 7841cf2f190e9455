//! Particle emitters: stationary launch tubes and star-tracking emitters.

use glam::DVec2;

use crate::api::types::ParticleId;
use crate::components::particle::Particle;
use crate::components::template::ParticleTemplate;
use crate::core::particle_set::ParticleSet;
use crate::error::EmitterError;
use crate::systems::rng::Rng;

/// The steerable launch-angle range while a run is active, degrees.
const STEERABLE_ANGLE_DEG: f64 = 15.0;
/// Fractional exit-velocity jitter applied to each launched particle.
const EXIT_VELOCITY_JITTER: f64 = 0.05;

/// A particle-spawning factory bound to a position, a firing angle and a
/// template. Each [`launch`](Emitter::launch) call clones the template
/// `num_to_launch` times with randomized angle and speed.
///
/// Angles are measured from the vertical, clockwise-positive, so the launch
/// velocity is `(speed * sin(angle), speed * cos(angle))`.
#[derive(Debug, Clone)]
pub struct Emitter {
    /// Launch origin in metres.
    pub pos: DVec2,
    /// Absolute creation time in seconds.
    pub creation_time: f64,
    /// Lifetime in seconds.
    pub lifetime: f64,
    /// Firing angle from the vertical, radians.
    launch_angle: f64,
    /// Random variation range around the firing angle, radians.
    launch_angle_variation: f64,
    /// Nominal exit speed, m/s.
    exit_velocity: f64,
    /// Particles per launch call.
    num_to_launch: usize,
    template: ParticleTemplate,
}

impl Emitter {
    /// Create an emitter. The firing angle must lie in [-180, 180] degrees,
    /// the variation in [0, 180] degrees, and at least one particle must be
    /// launched per call.
    pub fn new(
        pos: DVec2,
        creation_time: f64,
        lifetime: f64,
        exit_velocity: f64,
        firing_angle_deg: f64,
        variation_deg: f64,
        num_to_launch: usize,
        template: ParticleTemplate,
    ) -> Result<Self, EmitterError> {
        if !(-180.0..=180.0).contains(&firing_angle_deg) {
            return Err(EmitterError::FiringAngleOutOfRange(firing_angle_deg));
        }
        if !(0.0..=180.0).contains(&variation_deg) {
            return Err(EmitterError::VariationOutOfRange(variation_deg));
        }
        if num_to_launch < 1 {
            return Err(EmitterError::NothingToLaunch);
        }
        Ok(Emitter {
            pos,
            creation_time,
            lifetime,
            launch_angle: firing_angle_deg.to_radians(),
            launch_angle_variation: variation_deg.to_radians(),
            exit_velocity,
            num_to_launch,
            template,
        })
    }

    /// Whether the emitter is still within its lifetime at `time`.
    pub fn is_alive(&self, time: f64) -> bool {
        time - self.creation_time <= self.lifetime
    }

    /// The current firing angle in radians from the vertical.
    pub fn launch_angle(&self) -> f64 {
        self.launch_angle
    }

    /// Steer the firing angle at runtime. The runtime bound is the tighter
    /// [-15, 15] degree range, not the constructor's [-180, 180].
    pub fn set_launch_angle(&mut self, firing_angle_deg: f64) -> Result<(), EmitterError> {
        if !(-STEERABLE_ANGLE_DEG..=STEERABLE_ANGLE_DEG).contains(&firing_angle_deg) {
            return Err(EmitterError::FiringAngleOutOfRange(firing_angle_deg));
        }
        self.launch_angle = firing_angle_deg.to_radians();
        Ok(())
    }

    /// The template this emitter clones from.
    pub fn template(&self) -> &ParticleTemplate {
        &self.template
    }

    /// Mutable template access, for retinting or moving a streak origin.
    pub fn template_mut(&mut self) -> &mut ParticleTemplate {
        &mut self.template
    }

    fn random_launch_angle(&self, rng: &mut Rng) -> f64 {
        self.launch_angle + self.launch_angle_variation * rng.next_signed_unit()
    }

    fn random_exit_velocity(&self, rng: &mut Rng) -> f64 {
        self.exit_velocity * (1.0 - EXIT_VELOCITY_JITTER * rng.next_signed_unit())
    }

    /// Launch one batch of particles at absolute time `time`. The emitter
    /// itself is not mutated; ids are assigned when the batch enters a
    /// live set.
    pub fn launch(&self, time: f64, rng: &mut Rng) -> Vec<Particle> {
        let mut batch = Vec::with_capacity(self.num_to_launch);
        for _ in 0..self.num_to_launch {
            let angle = self.random_launch_angle(rng);
            let speed = self.random_exit_velocity(rng);
            let vel = DVec2::new(speed * angle.sin(), speed * angle.cos());
            batch.push(self.template.instantiate(self.pos, vel, time));
        }
        batch
    }
}

/// An emitter riding on a live particle: the launch origin tracks the host's
/// position and every spawned particle inherits the host's current velocity.
///
/// The host is observed through its id in the live set, never owned. Once the
/// host expires, launches produce nothing.
#[derive(Debug, Clone)]
pub struct MobileEmitter {
    emitter: Emitter,
    host: ParticleId,
}

impl MobileEmitter {
    /// Create an emitter attached to `host`. Position, creation time and
    /// lifetime are taken from the host particle.
    pub fn new(
        exit_velocity: f64,
        firing_angle_deg: f64,
        variation_deg: f64,
        num_to_launch: usize,
        template: ParticleTemplate,
        host: &Particle,
    ) -> Result<Self, EmitterError> {
        let emitter = Emitter::new(
            host.pos,
            host.creation_time,
            host.lifetime,
            exit_velocity,
            firing_angle_deg,
            variation_deg,
            num_to_launch,
            template,
        )?;
        Ok(MobileEmitter {
            emitter,
            host: host.id,
        })
    }

    /// The id of the particle this emitter rides on.
    pub fn host(&self) -> ParticleId {
        self.host
    }

    /// Launch one batch from the host's current position, with the host's
    /// current velocity added to every spawned particle. Returns an empty
    /// batch if the host has left the live set.
    pub fn launch(&mut self, time: f64, rng: &mut Rng, particles: &ParticleSet) -> Vec<Particle> {
        let Some(host) = particles.get(self.host) else {
            return Vec::new();
        };
        let host_vel = host.vel;
        self.emitter.pos = host.pos;
        let mut batch = self.emitter.launch(time, rng);
        for particle in &mut batch {
            particle.vel += host_vel;
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::color::Color;

    fn spark_template() -> ParticleTemplate {
        ParticleTemplate::plain(0.2, 2.0e-6, 0.0015, Color::ORANGE)
    }

    fn emitter(firing_angle_deg: f64, variation_deg: f64, num: usize) -> Emitter {
        Emitter::new(
            DVec2::ZERO,
            0.0,
            10.0,
            22.0,
            firing_angle_deg,
            variation_deg,
            num,
            spark_template(),
        )
        .unwrap()
    }

    #[test]
    fn constructor_bounds() {
        let t = spark_template;
        assert!(matches!(
            Emitter::new(DVec2::ZERO, 0.0, 1.0, 5.0, 181.0, 0.0, 1, t()),
            Err(EmitterError::FiringAngleOutOfRange(_))
        ));
        assert!(matches!(
            Emitter::new(DVec2::ZERO, 0.0, 1.0, 5.0, 0.0, -1.0, 1, t()),
            Err(EmitterError::VariationOutOfRange(_))
        ));
        assert!(matches!(
            Emitter::new(DVec2::ZERO, 0.0, 1.0, 5.0, 0.0, 0.0, 0, t()),
            Err(EmitterError::NothingToLaunch)
        ));
        // Full construction range is wider than the steerable range.
        assert!(Emitter::new(DVec2::ZERO, 0.0, 1.0, 5.0, 120.0, 180.0, 1, t()).is_ok());
    }

    #[test]
    fn emitter_liveness_matches_lifetime() {
        let e = Emitter::new(DVec2::ZERO, 1.0, 2.0, 5.0, 0.0, 0.0, 1, spark_template()).unwrap();
        assert!(e.is_alive(3.0));
        assert!(!e.is_alive(3.1));
    }

    #[test]
    fn runtime_steering_is_clamped_to_fifteen_degrees() {
        let mut e = emitter(0.0, 2.0, 1);
        assert!(e.set_launch_angle(15.0).is_ok());
        assert!(e.set_launch_angle(-15.0).is_ok());
        let before = e.launch_angle();
        assert!(matches!(
            e.set_launch_angle(15.5),
            Err(EmitterError::FiringAngleOutOfRange(_))
        ));
        assert_eq!(e.launch_angle(), before);
    }

    #[test]
    fn launch_batch_has_requested_size_and_creation_time() {
        let e = emitter(0.0, 2.0, 20);
        let mut rng = Rng::new(42);
        let batch = e.launch(3.5, &mut rng);
        assert_eq!(batch.len(), 20);
        for p in &batch {
            assert_eq!(p.creation_time, 3.5);
            assert_eq!(p.pos, DVec2::ZERO);
        }
    }

    #[test]
    fn launch_angles_stay_within_variation_band() {
        let firing = 10.0f64;
        let variation = 2.0f64;
        let e = emitter(firing, variation, 1);
        let mut rng = Rng::new(42);
        for _ in 0..10_000 {
            let p = &e.launch(0.0, &mut rng)[0];
            // Implied launch angle from the velocity direction.
            let angle = p.vel.x.atan2(p.vel.y).to_degrees();
            assert!(
                angle >= firing - variation - 1e-9 && angle <= firing + variation + 1e-9,
                "angle {} outside [{}, {}]",
                angle,
                firing - variation,
                firing + variation
            );
        }
    }

    #[test]
    fn exit_speed_jitter_is_within_five_percent() {
        let e = emitter(0.0, 0.0, 1);
        let mut rng = Rng::new(7);
        for _ in 0..10_000 {
            let p = &e.launch(0.0, &mut rng)[0];
            let speed = p.vel.length();
            assert!(speed >= 22.0 * 0.95 - 1e-9 && speed <= 22.0 * 1.05 + 1e-9);
        }
    }

    #[test]
    fn launch_does_not_mutate_the_template() {
        let e = emitter(0.0, 2.0, 5);
        let before = e.template().clone();
        let mut rng = Rng::new(42);
        e.launch(1.0, &mut rng);
        assert_eq!(*e.template(), before);
    }

    #[test]
    fn mobile_launch_adds_host_velocity() {
        let mut set = ParticleSet::new();
        let mut host = spark_template().instantiate(DVec2::new(10.0, 20.0), DVec2::new(3.0, 4.0), 0.0);
        host.lifetime = 10.0;
        let host_id = set.spawn(host);

        let host_ref = set.get(host_id).unwrap();
        let mut mobile =
            MobileEmitter::new(1.0, 90.0, 0.0, 1, spark_template(), host_ref).unwrap();

        // A stationary twin with the same seed isolates the composition term.
        let stationary = Emitter::new(
            DVec2::new(10.0, 20.0),
            0.0,
            10.0,
            1.0,
            90.0,
            0.0,
            1,
            spark_template(),
        )
        .unwrap();

        let base = stationary.launch(0.5, &mut Rng::new(42))[0].vel;
        let spark = &mobile.launch(0.5, &mut Rng::new(42), &set)[0];
        assert!((spark.vel - (base + DVec2::new(3.0, 4.0))).length() < 1e-12);
        assert_eq!(spark.pos, DVec2::new(10.0, 20.0));
    }

    #[test]
    fn mobile_launch_tracks_a_moving_host() {
        let mut set = ParticleSet::new();
        let mut host = spark_template().instantiate(DVec2::ZERO, DVec2::ZERO, 0.0);
        host.lifetime = 10.0;
        let host_id = set.spawn(host);
        let mut mobile =
            MobileEmitter::new(1.0, 0.0, 0.0, 1, spark_template(), set.get(host_id).unwrap())
                .unwrap();

        set.get_mut(host_id).unwrap().pos = DVec2::new(7.0, 9.0);
        let mut rng = Rng::new(1);
        let spark = &mobile.launch(1.0, &mut rng, &set)[0];
        assert_eq!(spark.pos, DVec2::new(7.0, 9.0));
    }

    #[test]
    fn mobile_launch_stops_once_host_expires() {
        let mut set = ParticleSet::new();
        let host = spark_template().instantiate(DVec2::ZERO, DVec2::ZERO, 0.0);
        let host_id = set.spawn(host);
        let mut mobile =
            MobileEmitter::new(1.0, 0.0, 0.0, 5, spark_template(), set.get(host_id).unwrap())
                .unwrap();

        // Host lifetime is 0.2 s; sweep it out and launch again.
        set.retain_alive(1.0);
        let mut rng = Rng::new(1);
        assert!(mobile.launch(1.0, &mut rng, &set).is_empty());
    }
}
