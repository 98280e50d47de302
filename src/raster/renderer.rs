use glam::Vec2;

use crate::config::{
    BACKGROUND_BOTTOM, BACKGROUND_TOP, COMPASSION_GLOW_EXTENT, COMPASSION_GLOW_OPACITY,
    DHARMA_GOLD, FADE_ALPHA, FADE_COLOR, LINK_OPACITY, LINK_STRIDE, LINK_THRESHOLD,
    QUANTUM_BLUE, SUPERPOSITION_GLOW_EXTENT, SUPERPOSITION_GLOW_OPACITY,
};
use crate::raster::canvas::Canvas;
use crate::simulation::params::{BuddhistParameters, QuantumParameters};
use crate::simulation::{display_radius, Particle};

/// Draws the particle field into a persistent trail buffer, then composes
/// the presented frame from it.
///
/// Decorative overlays only touch the frame, never the trails, so they
/// don't smear into the fade.
pub struct FrameRenderer {
    trails: Canvas,
    frame: Canvas,
}

impl FrameRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        let mut trails = Canvas::new(width, height, BACKGROUND_TOP);
        trails.vertical_gradient(BACKGROUND_TOP, BACKGROUND_BOTTOM);
        let frame = trails.clone();
        Self { trails, frame }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Render one frame from a borrowed view of the ensemble
    pub fn render(
        &mut self,
        particles: &[Particle],
        quantum: &QuantumParameters,
        buddhist: &BuddhistParameters,
    ) -> &Canvas {
        self.trails.fade(FADE_COLOR, FADE_ALPHA);

        for particle in particles {
            self.trails.fill_circle(
                particle.position,
                display_radius(particle, buddhist),
                particle.color,
                particle.alpha,
            );
        }

        let link_alpha = buddhist.interdependence * LINK_OPACITY;
        for (from, to) in interdependence_links(particles.len(), buddhist.interdependence) {
            self.trails.draw_line(
                particles[from].position,
                particles[to].position,
                DHARMA_GOLD,
                link_alpha,
            );
        }

        self.frame.copy_from(&self.trails);
        draw_highlights(&mut self.frame, quantum, buddhist);

        &self.frame
    }
}

/// Index pairs joined by interdependence links: every `LINK_STRIDE`-th
/// particle to its successor, wrapping at the end of the ensemble
pub fn interdependence_links(
    count: usize,
    interdependence: f32,
) -> impl Iterator<Item = (usize, usize)> {
    let active = interdependence > LINK_THRESHOLD && count > 1;
    let end = if active { count } else { 0 };
    (0..end)
        .step_by(LINK_STRIDE)
        .map(move |i| (i, (i + 1) % count))
}

/// The two soft radial highlights
fn draw_highlights(frame: &mut Canvas, quantum: &QuantumParameters, buddhist: &BuddhistParameters) {
    let size = Vec2::new(frame.width() as f32, frame.height() as f32);
    let extent = size.max_element();

    let superposition_center = size
        * Vec2::new(
            0.5 + quantum.superposition * 0.3,
            0.5 + buddhist.emptiness * 0.3,
        );
    frame.radial_glow(
        superposition_center,
        extent * SUPERPOSITION_GLOW_EXTENT,
        QUANTUM_BLUE,
        quantum.superposition * SUPERPOSITION_GLOW_OPACITY,
    );

    let compassion_center = size
        * Vec2::new(
            0.3 + buddhist.compassion * 0.4,
            0.7 + quantum.entanglement * 0.2,
        );
    frame.radial_glow(
        compassion_center,
        extent * COMPASSION_GLOW_EXTENT,
        DHARMA_GOLD,
        buddhist.compassion * COMPASSION_GLOW_OPACITY,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::simulation::ParticleField;

    fn quiet() -> (QuantumParameters, BuddhistParameters) {
        (
            QuantumParameters {
                superposition: 0.0,
                entanglement: 0.3,
                observer_effect: 0.5,
                uncertainty: 0.0,
            },
            BuddhistParameters {
                emptiness: 0.0,
                interdependence: 0.0,
                karma: 0.0,
                compassion: 0.0,
                mindfulness: 0.0,
            },
        )
    }

    #[test]
    fn test_no_links_at_or_below_threshold() {
        assert_eq!(interdependence_links(200, 0.0).count(), 0);
        assert_eq!(interdependence_links(200, 0.7).count(), 0);
    }

    #[test]
    fn test_links_every_tenth_particle() {
        let links: Vec<_> = interdependence_links(200, 0.8).collect();
        assert_eq!(links.len(), 20);
        assert_eq!(links[0], (0, 1));
        assert_eq!(links[19], (190, 191));
    }

    #[test]
    fn test_links_wrap_at_end() {
        let links: Vec<_> = interdependence_links(11, 1.0).collect();
        assert_eq!(links, vec![(0, 1), (10, 0)]);
        assert_eq!(interdependence_links(1, 1.0).count(), 0);
    }

    #[test]
    fn test_overlays_do_not_touch_trails() {
        let field = ParticleField::new(
            FieldConfig {
                particle_count: 0,
                seed: Some(1),
            },
            64,
            48,
        );
        let (mut quantum, mut buddhist) = quiet();
        quantum.superposition = 1.0;
        buddhist.compassion = 1.0;

        let mut renderer = FrameRenderer::new(64, 48);
        renderer.render(field.particles(), &quantum, &buddhist);

        // Trails only saw the fade; the frame also carries the highlights
        let mut expected = FrameRenderer::new(64, 48).trails;
        expected.fade(FADE_COLOR, FADE_ALPHA);
        assert_eq!(renderer.trails, expected);
        assert_ne!(renderer.frame, renderer.trails);
    }

    #[test]
    fn test_particles_leave_fading_trails() {
        let (quantum, buddhist) = quiet();
        let particle = Particle {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::ZERO,
            radius: 3.0,
            color: [1.0, 1.0, 1.0],
            alpha: 1.0,
        };
        let mut renderer = FrameRenderer::new(200, 200);

        renderer.render(&[particle], &quantum, &buddhist);
        let painted = renderer.trails.pixel(100, 100).unwrap();
        assert!(painted.iter().all(|&c| c > 0.99));

        // Particle gone: the spot dims toward the fade color but is not cleared
        renderer.render(&[], &quantum, &buddhist);
        let after = renderer.trails.pixel(100, 100).unwrap();

        let distance = |c: [f32; 3]| (0..3).map(|i| (c[i] - FADE_COLOR[i]).abs()).sum::<f32>();
        assert!(distance(after) < distance(painted));
        assert!(after[0] > 0.8);
    }

    #[test]
    fn test_resize_reallocates_buffers() {
        let mut renderer = FrameRenderer::new(10, 10);
        renderer.resize(30, 20);
        assert_eq!(renderer.frame.width(), 30);
        assert_eq!(renderer.trails.height(), 20);
    }
}
