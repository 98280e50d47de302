use glam::Vec2;
use rand::Rng;

use crate::config::{
    PALETTE_HUE_MIN, PALETTE_HUE_SPAN, PALETTE_LIGHTNESS, PALETTE_SATURATION, SPAWN_ALPHA_MAX,
    SPAWN_ALPHA_MIN, SPAWN_RADIUS_MAX, SPAWN_RADIUS_MIN, SPAWN_VELOCITY,
};
use crate::raster::color::hsl_to_rgb;

/// One particle of the field.
///
/// - position: pixels, origin at the top-left of the surface
/// - velocity: pixels per tick
/// - radius: base radius before emptiness scaling
/// - color: sRGB in [0, 1], fixed at spawn
/// - alpha: re-derived every tick from the current parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: [f32; 3],
    pub alpha: f32,
}

impl Particle {
    /// Spawn a particle with randomized state inside `bounds`
    pub fn spawn<R: Rng>(rng: &mut R, bounds: Vec2) -> Self {
        let position = Vec2::new(
            sample_axis(rng, bounds.x),
            sample_axis(rng, bounds.y),
        );
        let velocity = Vec2::new(
            rng.gen_range(-SPAWN_VELOCITY..SPAWN_VELOCITY),
            rng.gen_range(-SPAWN_VELOCITY..SPAWN_VELOCITY),
        );
        let hue = PALETTE_HUE_MIN + rng.gen::<f32>() * PALETTE_HUE_SPAN;

        Self {
            position,
            velocity,
            radius: rng.gen_range(SPAWN_RADIUS_MIN..SPAWN_RADIUS_MAX),
            color: hsl_to_rgb(hue, PALETTE_SATURATION, PALETTE_LIGHTNESS),
            alpha: rng.gen_range(SPAWN_ALPHA_MIN..SPAWN_ALPHA_MAX),
        }
    }
}

/// Uniform sample in [0, extent); a degenerate axis pins to 0
fn sample_axis<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen::<f32>() * extent
    } else {
        0.0
    }
}
