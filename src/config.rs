/// Display pixels per simulation cell (coarser grid for the pixelated look)
pub const PIXEL_SCALE: u32 = 4;

/// Initial window size in logical pixels
pub const WINDOW_WIDTH: u32 = 1024;
pub const WINDOW_HEIGHT: u32 = 768;

// ============================================
// Wave Equation Parameters
// ============================================

/// Multiplicative decay per physics step. Close to 1.0 so ripples fade
/// slowly like a calm lagoon instead of bouncing around.
pub const DAMPING: f32 = 0.985;

/// Run physics + shading once every N frame callbacks (~30 Hz at 60 Hz)
pub const PHYSICS_FRAME_DIVISOR: u32 = 2;

/// Frame callbacks per second driven by the frame clock
pub const TARGET_FPS: u32 = 60;

// ============================================
// Pointer Splashes
// ============================================

/// Strength of the splash when the pointer first enters the surface
pub const FIRST_CONTACT_STRENGTH: f32 = 30.0;

/// Strength of each interpolated splash while dragging
pub const DRAG_STRENGTH: f32 = 20.0;

/// Cells a splash must keep from every edge (kernel reaches 2 cells out)
pub const SPLASH_MARGIN: i32 = 3;

// ============================================
// Sand Texture
// ============================================

/// Base sand color before the sun gradient is added
pub const SAND_BASE: [f32; 3] = [210.0, 210.0, 190.0];

/// Per-channel gain of the diagonal sun gradient
pub const SUN_GAIN: [f32; 3] = [45.0, 40.0, 30.0];

/// Scale applied to (xFactor + yFactor); strongest at the top-right corner
pub const SUN_GRADIENT_SCALE: f32 = 0.55;

/// Sand grain noise is uniform in [-NOISE_AMPLITUDE, NOISE_AMPLITUDE)
pub const NOISE_AMPLITUDE: f32 = 4.0;

// ============================================
// Water Shading
// ============================================

/// Turquoise the refracted sand is blended toward
pub const WATER_TINT: [f32; 3] = [10.0, 240.0, 235.0];

/// Opacity of the water body over the sand
pub const WATER_OPACITY: f32 = 0.55;

/// Refraction offset in cells per unit of slope
pub const REFRACTION_SCALE: f32 = 2.0;

/// |lightAlignment| beyond which sparkles or shadows appear
pub const LIGHT_THRESHOLD: f32 = 2.0;

pub const SPECULAR_GAIN: f32 = 5.0;
pub const SHADOW_GAIN: f32 = 2.0;

/// Per-channel shadow weights (cool teal shadows, not gray)
pub const SHADOW_WEIGHTS: [f32; 3] = [1.5, 0.5, 0.2];

/// Wave height above which caustics brighten the bed
pub const CAUSTIC_THRESHOLD: f32 = 0.5;
pub const CAUSTIC_GAIN: f32 = 5.0;

/// Per-channel caustic weights (slightly warm sunlight)
pub const CAUSTIC_WEIGHTS: [f32; 3] = [1.0, 1.0, 0.8];

/// Runtime tunables, defaulting to the constants above.
///
/// Each field can be overridden through a `LAGOON_*` environment variable,
/// see [`Tunables::from_env`].
#[derive(Clone, Debug, PartialEq)]
pub struct Tunables {
    pub pixel_scale: u32,
    pub damping: f32,
    pub first_contact_strength: f32,
    pub drag_strength: f32,
    pub physics_divisor: u32,
    pub target_fps: u32,
    /// Seed for the sand noise; `None` draws a fresh one per session
    pub seed: Option<u64>,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixel_scale: PIXEL_SCALE,
            damping: DAMPING,
            first_contact_strength: FIRST_CONTACT_STRENGTH,
            drag_strength: DRAG_STRENGTH,
            physics_divisor: PHYSICS_FRAME_DIVISOR,
            target_fps: TARGET_FPS,
            seed: None,
        }
    }
}

impl Tunables {
    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build tunables from an arbitrary key lookup. Invalid values are
    /// logged and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut tunables = Self::default();

        if let Some(scale) = parse_var::<u32, _>(&lookup, "LAGOON_PIXEL_SCALE", |v| *v >= 1) {
            tunables.pixel_scale = scale;
        }
        if let Some(damping) =
            parse_var::<f32, _>(&lookup, "LAGOON_DAMPING", |v| *v > 0.0 && *v < 1.0)
        {
            tunables.damping = damping;
        }
        if let Some(strength) =
            parse_var::<f32, _>(&lookup, "LAGOON_SPLASH_STRENGTH", |v| v.is_finite() && *v >= 0.0)
        {
            tunables.first_contact_strength = strength;
        }
        if let Some(strength) =
            parse_var::<f32, _>(&lookup, "LAGOON_DRAG_STRENGTH", |v| v.is_finite() && *v >= 0.0)
        {
            tunables.drag_strength = strength;
        }
        if let Some(divisor) = parse_var::<u32, _>(&lookup, "LAGOON_PHYSICS_DIVISOR", |v| *v >= 1) {
            tunables.physics_divisor = divisor;
        }
        if let Some(fps) = parse_var::<u32, _>(&lookup, "LAGOON_TARGET_FPS", |v| (1..=480).contains(v)) {
            tunables.target_fps = fps;
        }
        if let Some(seed) = parse_var::<u64, _>(&lookup, "LAGOON_SEED", |_| true) {
            tunables.seed = Some(seed);
        }

        tunables
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, valid: impl Fn(&T) -> bool) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => Some(value),
        _ => {
            log::warn!("Ignoring invalid {}={:?}, keeping default", key, raw);
            None
        }
    }
}
