/// Number of particles in the field
pub const PARTICLE_COUNT: usize = 200;

/// Simulated time added per animation tick (not wall-clock time)
pub const TIME_STEP: f64 = 0.01;

/// Initial window size in logical pixels
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 800;

// ============================================
// Particle Spawning
// ============================================

/// Initial velocity range per axis
pub const SPAWN_VELOCITY: f32 = 1.0;

/// Particle radius range [min, max)
pub const SPAWN_RADIUS_MIN: f32 = 1.0;
pub const SPAWN_RADIUS_MAX: f32 = 4.0;

/// Initial alpha range [min, max)
pub const SPAWN_ALPHA_MIN: f32 = 0.2;
pub const SPAWN_ALPHA_MAX: f32 = 1.0;

/// Hue band (degrees) particles are colored from
pub const PALETTE_HUE_MIN: f32 = 200.0;
pub const PALETTE_HUE_SPAN: f32 = 60.0;
pub const PALETTE_SATURATION: f32 = 0.7;
pub const PALETTE_LIGHTNESS: f32 = 0.6;

// ============================================
// Forcing Terms
// ============================================

/// Superposition wave: sin(t * superposition * FREQ + i * PHASE) * AMPLITUDE
pub const WAVE_FREQUENCY: f32 = 5.0;
pub const WAVE_PHASE_STEP: f32 = 0.1;
pub const WAVE_AMPLITUDE: f32 = 20.0;
/// Fraction of the wave applied to vertical displacement
pub const WAVE_DISPLACEMENT: f32 = 0.1;

/// Mindfulness breathing: sin(t * mindfulness * FREQ) * AMPLITUDE
pub const BREATH_FREQUENCY: f32 = 2.0;
pub const BREATH_AMPLITUDE: f32 = 10.0;
pub const BREATH_DISPLACEMENT: f32 = 0.05;

/// Per-axis jitter magnitude at full uncertainty
pub const JITTER_SCALE: f32 = 0.5;

/// Rotational drift about the surface center (radians per tick at full value)
pub const COMPASSION_DRIFT: f32 = 0.001;
pub const KARMA_DRIFT: f32 = 0.0005;

/// Alpha = BASE + observer_effect * OBSERVER + mindfulness * MINDFUL
pub const ALPHA_BASE: f32 = 0.2;
pub const ALPHA_OBSERVER_WEIGHT: f32 = 0.6;
pub const ALPHA_MINDFULNESS_WEIGHT: f32 = 0.3;

/// Coupling toward the preceding particle is active above this entanglement
pub const ENTANGLEMENT_THRESHOLD: f32 = 0.5;
/// Fraction of the gap closed per tick at full entanglement
pub const ENTANGLEMENT_PULL: f32 = 0.3 * 0.01;

/// Displayed radius = radius * (1 + emptiness * EMPTINESS_SCALE)
pub const EMPTINESS_SCALE: f32 = 0.5;

// ============================================
// Rendering
// ============================================

/// Trail fade fill, rgba(26, 35, 126, 0.1)
pub const FADE_COLOR: [f32; 3] = [26.0 / 255.0, 35.0 / 255.0, 126.0 / 255.0];
pub const FADE_ALPHA: f32 = 0.1;

/// Background gradient the trail buffer starts from (#1a237e to #283593)
pub const BACKGROUND_TOP: [f32; 3] = [26.0 / 255.0, 35.0 / 255.0, 126.0 / 255.0];
pub const BACKGROUND_BOTTOM: [f32; 3] = [40.0 / 255.0, 53.0 / 255.0, 147.0 / 255.0];

/// Interdependence links: every LINK_STRIDE-th particle, above LINK_THRESHOLD
pub const LINK_THRESHOLD: f32 = 0.7;
pub const LINK_STRIDE: usize = 10;
pub const LINK_OPACITY: f32 = 0.3;

/// Palette shared by links, overlays and the panel
pub const QUANTUM_BLUE: [f32; 3] = [79.0 / 255.0, 195.0 / 255.0, 247.0 / 255.0];
pub const DHARMA_GOLD: [f32; 3] = [255.0 / 255.0, 183.0 / 255.0, 77.0 / 255.0];
pub const COSMIC_VIOLET: [f32; 3] = [186.0 / 255.0, 104.0 / 255.0, 200.0 / 255.0];

/// Radial highlight extents as a fraction of the larger surface side
pub const SUPERPOSITION_GLOW_EXTENT: f32 = 0.6;
pub const COMPASSION_GLOW_EXTENT: f32 = 0.5;
pub const SUPERPOSITION_GLOW_OPACITY: f32 = 0.3;
pub const COMPASSION_GLOW_OPACITY: f32 = 0.2;

// ============================================
// Parameter Panel
// ============================================

/// Side panel width in points
pub const PANEL_WIDTH: f32 = 400.0;
/// Panel fill, rgba(40, 53, 147, 0.95)
pub const PANEL_BACKGROUND: [f32; 3] = [40.0 / 255.0, 53.0 / 255.0, 147.0 / 255.0];
pub const PANEL_OPACITY: f32 = 0.95;

/// Slider step per key press
pub const SLIDER_STEP: f32 = 0.01;

/// Runtime-tunable field settings
#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            seed: None,
        }
    }
}
