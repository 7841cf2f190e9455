//! The simulation orchestrator: staged star launches, spark emission and
//! per-tick advancement of the live particle set.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::api::types::ParticleView;
use crate::components::color::Color;
use crate::components::emitter::{Emitter, MobileEmitter};
use crate::components::template::ParticleTemplate;
use crate::core::environment::Environment;
use crate::core::particle_set::ParticleSet;
use crate::error::ConfigError;
use crate::systems::motion;
use crate::systems::rng::Rng;

/// Steerable launch-angle bound for the whole candle, degrees.
const MAX_LAUNCH_ANGLE_DEG: f64 = 15.0;
/// Default RNG seed when the caller does not supply one.
const DEFAULT_SEED: u64 = 42;

/// Tuning parameters for one Roman candle run. Defaults reproduce the
/// standard eight-star candle; individual fields can be overridden from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CandleConfig {
    /// Star muzzle velocity, m/s.
    pub star_velocity: f64,
    /// Random variation around the firing angle for stars, degrees.
    pub star_angle_variation: f64,
    /// Delay-charge burn time between consecutive stars, seconds.
    pub star_delay_time: f64,
    /// Total number of stars to launch.
    pub num_stars: usize,
    /// Colors assigned to stars in launch order (cycled if fewer than
    /// `num_stars`).
    pub star_colors: Vec<Color>,
    /// Star mass, kg.
    pub star_mass: f64,
    /// Star burn rate, kg/s.
    pub star_burn_rate: f64,
    /// Star compound density, kg/m^3.
    pub star_density: f64,

    /// Color shared by delay sparks and launch streaks.
    pub spark_color: Color,
    /// Spark radius, metres.
    pub spark_radius: f64,
    /// Spark mass, kg.
    pub spark_mass: f64,

    /// Exit speed of star-trail sparks, m/s.
    pub star_spark_velocity: f64,
    /// Angle variation of star-trail sparks, degrees (180 = full circle).
    pub star_spark_angle_variation: f64,
    /// Lifetime of star-trail sparks, seconds.
    pub star_spark_lifetime: f64,
    /// Star-trail sparks per batch.
    pub num_star_sparks: usize,

    /// Exit speed of launch streaks, m/s.
    pub streak_velocity: f64,
    /// Angle variation of launch streaks, degrees.
    pub streak_angle_variation: f64,
    /// Streak radius, metres.
    pub streak_radius: f64,
    /// Streak lifetime, seconds.
    pub streak_lifetime: f64,
    /// Streaks per launch.
    pub num_streaks: usize,

    /// Exit speed of delay-charge sparks, m/s.
    pub delay_spark_velocity: f64,
    /// Angle variation of delay-charge sparks, degrees.
    pub delay_spark_angle_variation: f64,
    /// Delay-spark lifetime, seconds.
    pub delay_spark_lifetime: f64,
    /// Delay sparks per batch.
    pub num_delay_sparks: usize,
}

impl Default for CandleConfig {
    fn default() -> Self {
        CandleConfig {
            star_velocity: 22.0,
            star_angle_variation: 2.0,
            star_delay_time: 2.8,
            num_stars: 8,
            star_colors: vec![
                Color::AQUAMARINE,
                Color::DARK_KHAKI,
                Color::ORANGE,
                Color::RED,
                Color::YELLOW,
                Color::WHITE,
                Color::CYAN,
                Color::MAGENTA,
            ],
            star_mass: 0.008,
            star_burn_rate: 0.003,
            star_density: 1900.0,

            spark_color: Color::ORANGE,
            spark_radius: 0.0015,
            spark_mass: 2.0e-6,

            star_spark_velocity: 3.0,
            star_spark_angle_variation: 180.0,
            star_spark_lifetime: 0.20,
            num_star_sparks: 20,

            streak_velocity: 20.0,
            streak_angle_variation: 3.0,
            streak_radius: 0.0005,
            streak_lifetime: 0.15,
            num_streaks: 20,

            delay_spark_velocity: 2.2,
            delay_spark_angle_variation: 90.0,
            delay_spark_lifetime: 0.60,
            num_delay_sparks: 5,
        }
    }
}

impl CandleConfig {
    /// Parse a config from a JSON string. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The simulation orchestrator. Owns the environment, the live particle set
/// and all emitters; driven by an external periodic tick through
/// [`snapshot`](Simulation::snapshot) or [`advance`](Simulation::advance).
pub struct Simulation {
    config: CandleConfig,
    env: Environment,
    particles: ParticleSet,
    rng: Rng,

    launch_tube: Emitter,
    delay_spark_emitter: Emitter,
    streak_emitter: Emitter,
    /// Trail emitter riding on the most recently launched star.
    star_spark_emitter: Option<MobileEmitter>,

    count_stars: usize,
    star_launch_time: f64,
    last_time: f64,
    launch_flag: bool,
}

impl Simulation {
    /// Create a simulation with the default candle tuning.
    /// Wind must lie in [-20, 20] km/h, the launch angle in [-15, 15]
    /// degrees off the vertical.
    pub fn new(wind_kmh: f64, launch_angle_deg: f64) -> Result<Self, ConfigError> {
        Self::with_config(CandleConfig::default(), wind_kmh, launch_angle_deg)
    }

    /// Create a simulation with custom tuning.
    pub fn with_config(
        config: CandleConfig,
        wind_kmh: f64,
        launch_angle_deg: f64,
    ) -> Result<Self, ConfigError> {
        Self::with_seed(config, wind_kmh, launch_angle_deg, DEFAULT_SEED)
    }

    /// Create a simulation with custom tuning and a pinned RNG seed, for
    /// reproducible runs.
    pub fn with_seed(
        config: CandleConfig,
        wind_kmh: f64,
        launch_angle_deg: f64,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let env = Environment::new(wind_kmh)?;
        if !(-MAX_LAUNCH_ANGLE_DEG..=MAX_LAUNCH_ANGLE_DEG).contains(&launch_angle_deg) {
            return Err(ConfigError::LaunchAngleOutOfRange(launch_angle_deg));
        }

        // The launcher tip sits at the end of a 1 m tube.
        let angle = launch_angle_deg.to_radians();
        let tip = DVec2::new(angle.sin(), angle.cos());
        let tube_lifetime = config.star_delay_time * config.num_stars as f64;

        let first_color = config.star_colors.first().copied().unwrap_or(Color::WHITE);
        let star_template = ParticleTemplate::burning(
            config.star_mass,
            first_color,
            config.star_burn_rate,
            config.star_density,
        );
        let delay_spark_template = ParticleTemplate::plain(
            config.delay_spark_lifetime,
            config.spark_mass,
            config.spark_radius,
            config.spark_color,
        );
        let streak_template = ParticleTemplate::streak(
            tip,
            config.streak_lifetime,
            config.spark_mass,
            config.streak_radius,
            config.spark_color,
        );

        let launch_tube = Emitter::new(
            tip,
            0.0,
            tube_lifetime,
            config.star_velocity,
            launch_angle_deg,
            config.star_angle_variation,
            1,
            star_template,
        )?;
        let delay_spark_emitter = Emitter::new(
            tip,
            0.0,
            tube_lifetime,
            config.delay_spark_velocity,
            launch_angle_deg,
            config.delay_spark_angle_variation,
            config.num_delay_sparks,
            delay_spark_template,
        )?;
        let streak_emitter = Emitter::new(
            tip,
            0.0,
            tube_lifetime,
            config.streak_velocity,
            launch_angle_deg,
            config.streak_angle_variation,
            config.num_streaks,
            streak_template,
        )?;

        // One full delay in the past, so the first advance launches star 1.
        let star_launch_time = -config.star_delay_time;

        Ok(Simulation {
            env,
            particles: ParticleSet::new(),
            rng: Rng::new(seed),
            launch_tube,
            delay_spark_emitter,
            streak_emitter,
            star_spark_emitter: None,
            count_stars: 0,
            star_launch_time,
            last_time: 0.0,
            launch_flag: false,
            config,
        })
    }

    /// Launch the next star: one shot from the tube in the next sequential
    /// color, a fresh trail emitter bound to it, and one batch of launch
    /// streaks.
    fn start(&mut self, time: f64) {
        let mut batch = self.launch_tube.launch(time, &mut self.rng);
        let mut star = batch.swap_remove(0);
        let color = if self.config.star_colors.is_empty() {
            Color::WHITE
        } else {
            self.config.star_colors[self.count_stars % self.config.star_colors.len()]
        };
        star.color = color;
        let star_id = self.particles.spawn(star);

        // Trail sparks are tinted to match their star.
        let spark_template = ParticleTemplate::plain(
            self.config.star_spark_lifetime,
            self.config.spark_mass,
            self.config.spark_radius,
            color,
        );
        if let Some(host) = self.particles.get(star_id) {
            match MobileEmitter::new(
                self.config.star_spark_velocity,
                0.0,
                self.config.star_spark_angle_variation,
                self.config.num_star_sparks,
                spark_template,
                host,
            ) {
                Ok(emitter) => self.star_spark_emitter = Some(emitter),
                Err(err) => {
                    log::warn!("star trail emitter disabled: {}", err);
                    self.star_spark_emitter = None;
                }
            }
        }

        self.count_stars += 1;
        self.star_launch_time = time;
        let streaks = self.streak_emitter.launch(time, &mut self.rng);
        self.particles.spawn_batch(streaks);
        self.launch_flag = true;
        log::debug!("star {} launched at t={:.2}s", self.count_stars, time);
    }

    /// Advance the simulation to absolute time `time` (monotonically
    /// increasing, one call per external tick). Expired particles are
    /// removed, survivors integrated, then delay sparks, the next star or
    /// nothing is emitted depending on the stage, plus one trail batch
    /// while the current star is alive. Infallible by design.
    pub fn advance(&mut self, time: f64) {
        let dt = time - self.last_time;
        self.last_time = time;

        self.particles.retain_alive(time);
        motion::update_particles(&mut self.particles, time, dt, &self.env);

        if time - self.star_launch_time < self.config.star_delay_time {
            let sparks = self.delay_spark_emitter.launch(time, &mut self.rng);
            self.particles.spawn_batch(sparks);
        } else if self.count_stars < self.config.num_stars {
            self.start(time);
        } else {
            // All stars launched and the last delay window has passed:
            // no further spawns, remaining particles just decay.
            return;
        }

        if let Some(emitter) = &mut self.star_spark_emitter {
            let sparks = emitter.launch(time, &mut self.rng, &self.particles);
            self.particles.spawn_batch(sparks);
        }
    }

    /// Advance to `time` and return a deep-copied view of every live
    /// particle. The returned views are owned by the caller and safe to
    /// hand to a renderer on another thread.
    pub fn snapshot(&mut self, time: f64) -> Vec<ParticleView> {
        self.advance(time);
        self.particles.iter().map(ParticleView::from_particle).collect()
    }

    /// One-shot flag set when a star launches, for external cues (audio).
    /// Observe with this accessor, clear with
    /// [`reset_launch_flag`](Simulation::reset_launch_flag).
    pub fn launch_flag(&self) -> bool {
        self.launch_flag
    }

    pub fn reset_launch_flag(&mut self) {
        self.launch_flag = false;
    }

    /// Whether the run can still produce or hold particles. False once all
    /// stars are launched and the live set has emptied.
    pub fn is_active(&self) -> bool {
        self.count_stars < self.config.num_stars || !self.particles.is_empty()
    }

    /// Number of stars launched so far.
    pub fn stars_launched(&self) -> usize {
        self.count_stars
    }

    /// Change the wind velocity, km/h, validated to [-20, 20].
    pub fn set_wind_velocity(&mut self, wind_kmh: f64) -> Result<(), ConfigError> {
        self.env.set_wind_velocity(wind_kmh)
    }

    /// Steer the candle. The tube and the streak emitter move in lock-step
    /// so streaks always trace the actual firing direction.
    pub fn set_launch_angle(&mut self, angle_deg: f64) -> Result<(), ConfigError> {
        if !(-MAX_LAUNCH_ANGLE_DEG..=MAX_LAUNCH_ANGLE_DEG).contains(&angle_deg) {
            return Err(ConfigError::LaunchAngleOutOfRange(angle_deg));
        }
        self.launch_tube.set_launch_angle(angle_deg)?;
        self.streak_emitter.set_launch_angle(angle_deg)?;
        Ok(())
    }

    /// Move the launcher tip. Applied to the tube, the delay-spark emitter,
    /// the streak emitter and the streak template origin simultaneously.
    pub fn set_tip_position(&mut self, pos: DVec2) {
        self.launch_tube.pos = pos;
        self.delay_spark_emitter.pos = pos;
        self.streak_emitter.pos = pos;
        self.streak_emitter.template_mut().set_origin(pos);
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn config(&self) -> &CandleConfig {
        &self.config
    }
}
