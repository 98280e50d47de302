use std::f64::consts::TAU;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{
    ALPHA_BASE, ALPHA_MINDFULNESS_WEIGHT, ALPHA_OBSERVER_WEIGHT, BREATH_AMPLITUDE,
    BREATH_DISPLACEMENT, BREATH_FREQUENCY, COMPASSION_DRIFT, EMPTINESS_SCALE,
    ENTANGLEMENT_PULL, ENTANGLEMENT_THRESHOLD, JITTER_SCALE, KARMA_DRIFT, TIME_STEP,
    WAVE_AMPLITUDE, WAVE_DISPLACEMENT, WAVE_FREQUENCY, WAVE_PHASE_STEP, FieldConfig,
};
use crate::simulation::params::{BuddhistParameters, QuantumParameters};
use crate::simulation::particle::Particle;

/// Particle ensemble and the clock that drives it.
///
/// The ensemble is owned here and only lent out as a slice; its length is
/// fixed at `config.particle_count` for the lifetime of the field.
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Vec2,
    time: f64,
    rng: StdRng,
    config: FieldConfig,
}

impl ParticleField {
    /// Create a field filling a `width` x `height` surface
    pub fn new(config: FieldConfig, width: u32, height: u32) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut field = Self {
            particles: Vec::with_capacity(config.particle_count),
            bounds: Vec2::new(width as f32, height as f32),
            time: 0.0,
            rng,
            config,
        };
        field.respawn();
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Accumulated simulated time
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn has_area(&self) -> bool {
        self.bounds.x > 0.0 && self.bounds.y > 0.0
    }

    /// Adopt new surface dimensions and respawn the ensemble inside them
    pub fn resize(&mut self, width: u32, height: u32) {
        self.bounds = Vec2::new(width as f32, height as f32);
        self.respawn();
        log::info!(
            "Particle field bounds {:?} ({} particles)",
            self.bounds,
            self.particles.len()
        );
    }

    fn respawn(&mut self) {
        self.particles.clear();
        for _ in 0..self.config.particle_count {
            self.particles.push(Particle::spawn(&mut self.rng, self.bounds));
        }
    }

    /// Advance every particle by one tick.
    ///
    /// Particles are updated in index order and the entanglement pull reads
    /// the preceding particle's position from this same pass, so coupling
    /// chains through the ensemble within a tick.
    pub fn step(&mut self, quantum: &QuantumParameters, buddhist: &BuddhistParameters) {
        if self.particles.len() != self.config.particle_count {
            log::warn!(
                "Ensemble size {} does not match configured {}, respawning",
                self.particles.len(),
                self.config.particle_count
            );
            self.respawn();
        }

        if !self.has_area() {
            return;
        }

        self.time += TIME_STEP;
        let t = self.time;
        let bounds = self.bounds;
        let center = bounds * 0.5;

        let breath = phase(t, buddhist.mindfulness * BREATH_FREQUENCY).sin() * BREATH_AMPLITUDE;
        let wave_phase = phase(t, quantum.superposition * WAVE_FREQUENCY);
        let drift = buddhist.compassion * COMPASSION_DRIFT + buddhist.karma * KARMA_DRIFT;
        let alpha = derived_alpha(quantum, buddhist);
        let coupled = quantum.entanglement > ENTANGLEMENT_THRESHOLD;
        let pull = quantum.entanglement * ENTANGLEMENT_PULL;

        let mut previous: Option<Vec2> = None;
        for (i, particle) in self.particles.iter_mut().enumerate() {
            let wave = (wave_phase + i as f32 * WAVE_PHASE_STEP).sin() * WAVE_AMPLITUDE;

            // Fixed draw count per particle keeps the RNG stream independent
            // of any other particle's state
            let jitter = Vec2::new(
                self.rng.gen_range(-1.0f32..1.0),
                self.rng.gen_range(-1.0f32..1.0),
            ) * (quantum.uncertainty * JITTER_SCALE);

            let mut position = particle.position
                + particle.velocity
                + jitter
                + Vec2::new(0.0, wave * WAVE_DISPLACEMENT + breath * BREATH_DISPLACEMENT);

            if drift != 0.0 {
                position = center + Vec2::from_angle(drift).rotate(position - center);
            }

            particle.alpha = alpha;

            bounce(&mut position, &mut particle.velocity, bounds);

            if coupled {
                if let Some(prev) = previous {
                    // Convex step between two in-bounds points stays in bounds
                    position += (prev - position) * pull;
                }
            }

            particle.position = position;
            previous = Some(position);
        }
    }
}

/// `t * rate` reduced to a single turn before narrowing to f32
fn phase(t: f64, rate: f32) -> f32 {
    (t * rate as f64).rem_euclid(TAU) as f32
}

/// Opacity for the current parameters, never accumulated across ticks
pub fn derived_alpha(quantum: &QuantumParameters, buddhist: &BuddhistParameters) -> f32 {
    (ALPHA_BASE
        + quantum.observer_effect * ALPHA_OBSERVER_WEIGHT
        + buddhist.mindfulness * ALPHA_MINDFULNESS_WEIGHT)
        .clamp(0.0, 1.0)
}

/// Radius a particle is drawn with; not stored
pub fn display_radius(particle: &Particle, buddhist: &BuddhistParameters) -> f32 {
    particle.radius * (1.0 + buddhist.emptiness * EMPTINESS_SCALE)
}

/// Clamp to [0, bounds] and reflect the velocity component back inward
fn bounce(position: &mut Vec2, velocity: &mut Vec2, bounds: Vec2) {
    if position.x < 0.0 {
        position.x = 0.0;
        velocity.x = velocity.x.abs();
    } else if position.x > bounds.x {
        position.x = bounds.x;
        velocity.x = -velocity.x.abs();
    }

    if position.y < 0.0 {
        position.y = 0.0;
        velocity.y = velocity.y.abs();
    } else if position.y > bounds.y {
        position.y = bounds.y;
        velocity.y = -velocity.y.abs();
    }
}
