use rand::Rng;

use crate::config::{NOISE_AMPLITUDE, SAND_BASE, SUN_GAIN, SUN_GRADIENT_SCALE};
use crate::simulation::cell::GridSize;

/// Source of per-cell grain noise for the sand texture
pub trait NoiseSource {
    fn next_noise(&mut self) -> f32;
}

/// Uniform grain noise in [-amplitude, amplitude) drawn from `R`
pub struct SandGrain<R: Rng> {
    rng: R,
    amplitude: f32,
}

impl<R: Rng> SandGrain<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            amplitude: NOISE_AMPLITUDE,
        }
    }
}

impl<R: Rng> NoiseSource for SandGrain<R> {
    fn next_noise(&mut self) -> f32 {
        self.rng.gen_range(-self.amplitude..self.amplitude)
    }
}

/// Noise source that always yields zero
#[allow(dead_code)]
pub struct Silent;

impl NoiseSource for Silent {
    fn next_noise(&mut self) -> f32 {
        0.0
    }
}

/// Static sand bed with baked sunlight: 3 interleaved RGB bytes per cell
pub struct SandTexture {
    size: GridSize,
    texels: Vec<u8>,
}

impl SandTexture {
    /// All-black texture for the given grid
    pub fn blank(size: GridSize) -> Self {
        Self {
            size,
            texels: vec![0; size.cell_count() * 3],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    #[allow(dead_code)]
    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// RGB at row-major cell index
    #[inline]
    pub fn rgb(&self, index: usize) -> [f32; 3] {
        let t = &self.texels[index * 3..index * 3 + 3];
        [f32::from(t[0]), f32::from(t[1]), f32::from(t[2])]
    }

    /// Fill every texel with pale sand, brightest toward the top-right.
    ///
    /// One noise sample per cell is shared by all three channels so the
    /// grain varies in brightness, not hue.
    pub fn generate<N: NoiseSource>(&mut self, noise: &mut N) {
        let GridSize { width, height } = self.size;

        for y in 0..height {
            // 1.0 at top, 0.0 at bottom
            let y_factor = 1.0 - y as f32 / height as f32;
            for x in 0..width {
                // 0.0 at left, 1.0 at right
                let x_factor = x as f32 / width as f32;
                let sun = (x_factor + y_factor) * SUN_GRADIENT_SCALE;
                let grain = noise.next_noise();

                let i = (y * width + x) * 3;
                for channel in 0..3 {
                    let value = SAND_BASE[channel] + SUN_GAIN[channel] * sun + grain;
                    self.texels[i + channel] = value.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }
}
