pub mod correlation;
mod field;
pub mod params;
mod particle;

pub use correlation::{correlate, CorrelationReport, CORRELATIONS};
pub use field::{display_radius, ParticleField};
pub use params::{Parameter, ParameterStore};
pub use particle::Particle;
