//! Monte Carlo localization over a recorded control/measurement sequence.
//!
//! A population of hypothesized poses is pushed through the motion model
//! (prediction), scored against the measured bearings (weighting), and
//! resampled with the classic resampling wheel. After the last step the
//! population collapses to a single pose estimate.
//!
//! The wheel draws N independent `Uniform(0, 2·max_weight)` increments
//! rather than stepping a single offset. That is deliberate: the
//! reference procedure's convergence statistics depend on it, and the
//! low-variance variant is a different estimator.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::core::math::{angle_diff, wrap_angle};
use crate::core::types::{Control, Pose, WorldConfig};

use super::motion_model::{MotionConfig, MotionError, MotionModel};
use super::noise::NoiseConfig;
use super::sensor_model::{BearingModel, SensorError};

/// Particle filter errors.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Malformed configuration or input sequence, rejected before the
    /// filter loop starts.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[error(transparent)]
    Sensor(#[from] SensorError),
}

/// Configuration for the particle filter.
#[derive(Debug, Clone)]
pub struct ParticleFilterConfig {
    /// Number of particles. The reference tuning assumes 500; resampling
    /// statistics shift if this changes.
    pub num_particles: usize,

    /// Arena geometry: landmark table and extent for pose initialization.
    pub world: WorldConfig,

    /// Vehicle geometry shared by every particle.
    pub motion: MotionConfig,

    /// Noise standard deviations shared by every particle. The bearing
    /// noise must be positive: it is also the likelihood scale.
    pub noise: NoiseConfig,

    /// Random seed for deterministic behavior (0 for entropy).
    pub seed: u64,
}

impl Default for ParticleFilterConfig {
    fn default() -> Self {
        Self {
            num_particles: 500,
            world: WorldConfig::default(),
            motion: MotionConfig::default(),
            noise: NoiseConfig::new(0.1, 0.1, 5.0),
            seed: 0,
        }
    }
}

/// Monte Carlo localization filter.
///
/// Owns its particle population and RNG; one instance serves one filter
/// invocation over one recorded sequence.
#[derive(Debug)]
pub struct ParticleFilter {
    config: ParticleFilterConfig,
    motion: MotionModel,
    sensor: BearingModel,
    rng: SmallRng,
    particles: Vec<Pose>,
}

impl ParticleFilter {
    /// Create a filter with particles spread uniformly over the arena.
    pub fn new(config: ParticleFilterConfig) -> Result<Self, FilterError> {
        if config.num_particles == 0 {
            return Err(FilterError::InvalidConfiguration(
                "population size must be positive".into(),
            ));
        }
        if config.noise.bearing <= 0.0 {
            return Err(FilterError::InvalidConfiguration(format!(
                "bearing noise must be positive, got {}",
                config.noise.bearing
            )));
        }
        if config.world.landmarks.is_empty() {
            return Err(FilterError::InvalidConfiguration(
                "landmark table is empty".into(),
            ));
        }

        let mut rng = if config.seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(config.seed)
        };

        let particles = (0..config.num_particles)
            .map(|_| random_pose(&config.world, &mut rng))
            .collect();

        let motion = MotionModel::new(config.motion, config.noise);
        let sensor = BearingModel::new(config.world.landmarks.clone(), config.noise.bearing);

        Ok(Self {
            config,
            motion,
            sensor,
            rng,
            particles,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ParticleFilterConfig {
        &self.config
    }

    /// Current particle population (for inspection and visualization).
    pub fn particles(&self) -> &[Pose] {
        &self.particles
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Run the full predict/weight/resample cycle over a recorded
    /// sequence and aggregate the final population into one pose.
    ///
    /// The motion and measurement sequences must be non-empty, of equal
    /// length, and each measurement vector must carry one bearing per
    /// landmark. Any error aborts the run; skipping a step would
    /// desynchronize the population from the observation sequence.
    pub fn run(
        &mut self,
        motions: &[Control],
        measurements: &[Vec<f64>],
    ) -> Result<Pose, FilterError> {
        if motions.len() != measurements.len() {
            return Err(FilterError::InvalidConfiguration(format!(
                "{} motions but {} measurements",
                motions.len(),
                measurements.len()
            )));
        }
        if motions.is_empty() {
            return Err(FilterError::InvalidConfiguration(
                "empty motion sequence".into(),
            ));
        }
        let num_landmarks = self.sensor.landmarks().len();
        if let Some(bad) = measurements.iter().find(|z| z.len() != num_landmarks) {
            return Err(FilterError::InvalidConfiguration(format!(
                "measurement vector has {} bearings, expected {}",
                bad.len(),
                num_landmarks
            )));
        }

        for (control, observation) in motions.iter().zip(measurements) {
            self.predict(control)?;
            let weights = self.weigh(observation)?;
            self.resample(&weights);
        }

        let estimate = self.estimate();
        log::debug!(
            "filter run complete: {} steps, {} particles, estimate {}",
            motions.len(),
            self.particles.len(),
            estimate
        );
        Ok(estimate)
    }

    /// Prediction step: advance every particle through the motion model
    /// with an independent noise draw.
    fn predict(&mut self, control: &Control) -> Result<(), FilterError> {
        let mut next = Vec::with_capacity(self.particles.len());
        for pose in &self.particles {
            next.push(self.motion.sample(pose, control, &mut self.rng)?);
        }
        self.particles = next;
        Ok(())
    }

    /// Weighting step: importance weight of each particle against the
    /// measured bearings.
    fn weigh(&self, observation: &[f64]) -> Result<Vec<f64>, FilterError> {
        self.particles
            .iter()
            .map(|pose| self.sensor.likelihood(pose, observation).map_err(Into::into))
            .collect()
    }

    /// Resampling wheel: sample-with-replacement biased by weight.
    ///
    /// Starts at a uniformly drawn index, then for each of N draws adds
    /// `Uniform(0, 2·max_weight)` to a running offset and walks the wheel
    /// until the offset fits inside a particle's weight slot. Heavy
    /// particles are cloned more often; light ones may vanish.
    fn resample(&mut self, weights: &[f64]) {
        let n = self.particles.len();
        let max_weight = weights.iter().copied().fold(0.0, f64::max);
        if max_weight <= 0.0 {
            // Every weight underflowed; the wheel degenerates to cloning
            // the start index N times.
            log::warn!("all particle weights are zero; population is collapsing");
        }

        let mut index = self.rng.gen_range(0..n);
        let mut beta = 0.0;
        let mut next = Vec::with_capacity(n);
        for _ in 0..n {
            beta += self.rng.gen::<f64>() * 2.0 * max_weight;
            while beta > weights[index] {
                beta -= weights[index];
                index = (index + 1) % n;
            }
            next.push(self.particles[index]);
        }
        self.particles = next;
    }

    /// Collapse the population to a point estimate.
    ///
    /// Plain means for x and y. Headings are cyclic, so each one is
    /// first re-expressed in the first particle's frame via the shortest
    /// arc before averaging; a naive mean of values straddling the 0/2π
    /// boundary would point the wrong way.
    pub fn estimate(&self) -> Pose {
        let n = self.particles.len() as f64;
        let reference = self.particles[0].heading;

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_heading = 0.0;
        for pose in &self.particles {
            sum_x += pose.x;
            sum_y += pose.y;
            sum_heading += reference + angle_diff(pose.heading, reference);
        }

        Pose::new(sum_x / n, sum_y / n, wrap_angle(sum_heading / n))
    }
}

/// Draw a pose uniformly over the arena with uniform heading.
pub fn random_pose<R: Rng + ?Sized>(world: &WorldConfig, rng: &mut R) -> Pose {
    Pose::new(
        rng.gen::<f64>() * world.size,
        rng.gen::<f64>() * world.size,
        rng.gen::<f64>() * 2.0 * std::f64::consts::PI,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn seeded_config(seed: u64) -> ParticleFilterConfig {
        ParticleFilterConfig {
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_creation_spreads_particles() {
        let filter = ParticleFilter::new(seeded_config(42)).unwrap();
        assert_eq!(filter.num_particles(), 500);

        for p in filter.particles() {
            assert!((0.0..100.0).contains(&p.x));
            assert!((0.0..100.0).contains(&p.y));
            assert!((0.0..2.0 * PI).contains(&p.heading));
        }
    }

    #[test]
    fn test_creation_is_seeded() {
        let a = ParticleFilter::new(seeded_config(42)).unwrap();
        let b = ParticleFilter::new(seeded_config(42)).unwrap();
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_rejects_zero_particles() {
        let config = ParticleFilterConfig {
            num_particles: 0,
            ..Default::default()
        };
        assert!(matches!(
            ParticleFilter::new(config),
            Err(FilterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_zero_bearing_noise() {
        let config = ParticleFilterConfig {
            noise: NoiseConfig::new(0.0, 0.1, 5.0),
            ..Default::default()
        };
        assert!(matches!(
            ParticleFilter::new(config),
            Err(FilterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_empty_landmarks() {
        let config = ParticleFilterConfig {
            world: WorldConfig {
                landmarks: vec![],
                size: 100.0,
            },
            ..Default::default()
        };
        assert!(ParticleFilter::new(config).is_err());
    }

    #[test]
    fn test_run_rejects_mismatched_sequences() {
        let mut filter = ParticleFilter::new(seeded_config(42)).unwrap();
        let motions = vec![Control::new(0.0, 1.0); 3];
        let measurements = vec![vec![0.0; 4]; 2];
        assert!(matches!(
            filter.run(&motions, &measurements),
            Err(FilterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_run_rejects_empty_sequences() {
        let mut filter = ParticleFilter::new(seeded_config(42)).unwrap();
        assert!(filter.run(&[], &[]).is_err());
    }

    #[test]
    fn test_run_rejects_short_measurement_vectors() {
        let mut filter = ParticleFilter::new(seeded_config(42)).unwrap();
        let motions = vec![Control::new(0.0, 1.0)];
        let measurements = vec![vec![0.0; 3]]; // 4 landmarks
        assert!(filter.run(&motions, &measurements).is_err());
    }

    #[test]
    fn test_run_propagates_motion_validation() {
        let mut filter = ParticleFilter::new(seeded_config(42)).unwrap();
        let motions = vec![Control::new(PI, 1.0)];
        let measurements = vec![vec![0.0; 4]];
        assert!(matches!(
            filter.run(&motions, &measurements),
            Err(FilterError::Motion(MotionError::InvalidSteering { .. }))
        ));
    }

    #[test]
    fn test_resample_closure() {
        let mut filter = ParticleFilter::new(ParticleFilterConfig {
            num_particles: 100,
            ..seeded_config(42)
        })
        .unwrap();
        let prior = filter.particles().to_vec();
        let weights: Vec<f64> = (0..100).map(|i| (i + 1) as f64).collect();

        filter.resample(&weights);

        assert_eq!(filter.num_particles(), 100);
        for p in filter.particles() {
            assert!(
                prior.iter().any(|q| q == p),
                "resampled pose not drawn from prior population"
            );
        }
    }

    #[test]
    fn test_resample_favors_heavy_particles() {
        let mut filter = ParticleFilter::new(ParticleFilterConfig {
            num_particles: 100,
            ..seeded_config(42)
        })
        .unwrap();
        let heavy = filter.particles()[7];
        let mut weights = vec![1e-6; 100];
        weights[7] = 1.0;

        filter.resample(&weights);

        let clones = filter.particles().iter().filter(|p| **p == heavy).count();
        assert!(clones > 90, "heavy particle cloned only {} times", clones);
    }

    #[test]
    fn test_resample_all_zero_weights_clones_one_particle() {
        let mut filter = ParticleFilter::new(ParticleFilterConfig {
            num_particles: 50,
            ..seeded_config(42)
        })
        .unwrap();
        let prior = filter.particles().to_vec();

        filter.resample(&vec![0.0; 50]);

        let first = filter.particles()[0];
        assert!(prior.contains(&first));
        assert!(filter.particles().iter().all(|p| *p == first));
    }

    #[test]
    fn test_estimate_plain_mean() {
        let mut filter = ParticleFilter::new(ParticleFilterConfig {
            num_particles: 2,
            ..seeded_config(42)
        })
        .unwrap();
        filter.particles = vec![Pose::new(0.0, 10.0, 0.5), Pose::new(4.0, 20.0, 0.7)];

        let est = filter.estimate();
        assert_relative_eq!(est.x, 2.0);
        assert_relative_eq!(est.y, 15.0);
        assert_relative_eq!(est.heading, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_estimate_heading_across_wraparound() {
        // Headings 0.1 and 2π−0.1 straddle the boundary; the mean must
        // be 0, not π.
        let mut filter = ParticleFilter::new(ParticleFilterConfig {
            num_particles: 2,
            ..seeded_config(42)
        })
        .unwrap();
        filter.particles = vec![
            Pose::new(0.0, 0.0, 2.0 * PI - 0.1),
            Pose::new(0.0, 0.0, 0.1),
        ];

        let est = filter.estimate();
        assert!(
            est.heading < 1e-9 || est.heading > 2.0 * PI - 1e-9,
            "wraparound mean drifted to {}",
            est.heading
        );
    }

    #[test]
    fn test_estimate_heading_in_range() {
        let mut filter = ParticleFilter::new(ParticleFilterConfig {
            num_particles: 3,
            ..seeded_config(9)
        })
        .unwrap();
        filter.particles = vec![
            Pose::new(0.0, 0.0, 6.2),
            Pose::new(0.0, 0.0, 6.1),
            Pose::new(0.0, 0.0, 0.05),
        ];
        let est = filter.estimate();
        assert!((0.0..2.0 * PI).contains(&est.heading));
    }

    #[test]
    fn test_random_pose_in_bounds() {
        let world = WorldConfig::default();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            let p = random_pose(&world, &mut rng);
            assert!((0.0..100.0).contains(&p.x));
            assert!((0.0..100.0).contains(&p.y));
            assert!((0.0..2.0 * PI).contains(&p.heading));
        }
    }
}
