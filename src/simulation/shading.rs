use crate::config::{
    CAUSTIC_GAIN, CAUSTIC_THRESHOLD, CAUSTIC_WEIGHTS, LIGHT_THRESHOLD, REFRACTION_SCALE,
    SHADOW_GAIN, SHADOW_WEIGHTS, SPECULAR_GAIN, WATER_OPACITY, WATER_TINT,
};
use crate::simulation::cell::GridSize;
use crate::simulation::grid::WaveField;
use crate::simulation::sand::SandTexture;

/// One output pixel, laid out for direct upload as `Rgba8Unorm`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const OPAQUE_BLACK: Rgba = Rgba { r: 0, g: 0, b: 0, a: 255 };

    /// Round and clamp float channels; alpha is always opaque
    pub fn from_channels(c: [f32; 3]) -> Self {
        let quantize = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        Self {
            r: quantize(c[0]),
            g: quantize(c[1]),
            b: quantize(c[2]),
            a: 255,
        }
    }
}

/// The rendered image, one pixel per grid cell
pub struct Frame {
    size: GridSize,
    pixels: Vec<Rgba>,
}

impl Frame {
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            pixels: vec![Rgba::OPAQUE_BLACK; size.cell_count()],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    #[allow(dead_code)]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[allow(dead_code)]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.size.width + x]
    }

    /// Tightly packed RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Water color over a refracted sand texel.
///
/// Tints toward turquoise, then adds sparkles on slopes facing the light
/// (top-right), teal shadows on slopes facing away and caustics on crests.
#[inline]
pub fn water_color(sand: [f32; 3], x_slope: f32, y_slope: f32, wave_height: f32) -> [f32; 3] {
    let mut c = [0.0f32; 3];
    for i in 0..3 {
        c[i] = sand[i] * (1.0 - WATER_OPACITY) + WATER_TINT[i] * WATER_OPACITY;
    }

    let light_alignment = x_slope - y_slope;

    if light_alignment > LIGHT_THRESHOLD {
        let sparkle = (light_alignment - LIGHT_THRESHOLD) * SPECULAR_GAIN;
        for v in &mut c {
            *v += sparkle;
        }
    }

    if light_alignment < -LIGHT_THRESHOLD {
        let shadow = -(light_alignment + LIGHT_THRESHOLD) * SHADOW_GAIN;
        for i in 0..3 {
            c[i] -= shadow * SHADOW_WEIGHTS[i];
        }
    }

    if wave_height > CAUSTIC_THRESHOLD {
        let intensity = wave_height * CAUSTIC_GAIN;
        for i in 0..3 {
            c[i] += intensity * CAUSTIC_WEIGHTS[i];
        }
    }

    c
}

/// Shade the interior of `frame` from explicit fields.
///
/// `slopes` is the field surface normals are taken from, `heights` the
/// field caustics are taken from. The outer ring of pixels is not written.
pub fn composite(slopes: &[f32], heights: &[f32], sand: &SandTexture, frame: &mut Frame) {
    let GridSize { width, height } = frame.size;
    debug_assert_eq!(slopes.len(), width * height);
    debug_assert_eq!(heights.len(), width * height);
    debug_assert_eq!(sand.size(), frame.size);

    let max_x = width as i64 - 1;
    let max_y = height as i64 - 1;

    for y in 1..height.saturating_sub(1) {
        let row_start = y * width;
        for x in 1..width.saturating_sub(1) {
            let i = row_start + x;

            let x_slope = slopes[i - 1] - slopes[i + 1];
            let y_slope = slopes[i - width] - slopes[i + width];

            // Refraction: bend the texture lookup along the slope
            let tex_x = (x as i64 + (x_slope * REFRACTION_SCALE).floor() as i64).clamp(0, max_x);
            let tex_y = (y as i64 + (y_slope * REFRACTION_SCALE).floor() as i64).clamp(0, max_y);
            let base = sand.rgb(tex_y as usize * width + tex_x as usize);

            frame.pixels[i] = Rgba::from_channels(water_color(base, x_slope, y_slope, heights[i]));
        }
    }
}

/// Shade a frame right after a solver step: normals come from the field
/// the step read, caustics from the freshly solved heights.
pub fn shade(waves: &WaveField, sand: &SandTexture, frame: &mut Frame) {
    composite(waves.trailing(), waves.surface(), sand, frame);
}
