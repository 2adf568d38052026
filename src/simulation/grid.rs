use crate::simulation::cell::GridSize;
use crate::simulation::sand::SandTexture;
use crate::simulation::shading::Frame;

/// Ping-pong height fields for the damped wave equation.
///
/// `surface` is the most recent state: splashes write into it and the
/// solver reads from it. `trailing` holds the state one step older. A step
/// overwrites `trailing` with the new state and flips which allocation is
/// which, so neither field is ever copied or reallocated.
pub struct WaveField {
    size: GridSize,
    field_a: Vec<f32>,
    field_b: Vec<f32>,
    /// Which field holds the surface (true = A is surface, false = B)
    surface_in_a: bool,
    damping: f32,
}

impl WaveField {
    /// Create zero-filled fields for the given grid
    pub fn new(size: GridSize, damping: f32) -> Self {
        let cell_count = size.cell_count();
        Self {
            size,
            field_a: vec![0.0; cell_count],
            field_b: vec![0.0; cell_count],
            surface_in_a: true,
            damping,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Most recent height field
    pub fn surface(&self) -> &[f32] {
        if self.surface_in_a {
            &self.field_a
        } else {
            &self.field_b
        }
    }

    /// Most recent height field, for splash injection
    pub fn surface_mut(&mut self) -> &mut [f32] {
        if self.surface_in_a {
            &mut self.field_a
        } else {
            &mut self.field_b
        }
    }

    /// Height field one step older than the surface
    pub fn trailing(&self) -> &[f32] {
        if self.surface_in_a {
            &self.field_b
        } else {
            &self.field_a
        }
    }

    /// (surface, trailing) with the trailing field writable
    fn split_mut(&mut self) -> (&[f32], &mut [f32]) {
        if self.surface_in_a {
            (&self.field_a, &mut self.field_b)
        } else {
            (&self.field_b, &mut self.field_a)
        }
    }

    /// Advance one physics step.
    ///
    /// Interior cells only; the outer ring stays zero. Afterwards `surface`
    /// is the new state and `trailing` is the state it was computed from.
    pub fn step(&mut self) {
        let GridSize { width, height } = self.size;
        let damping = self.damping;
        let (current, next) = self.split_mut();

        for y in 1..height.saturating_sub(1) {
            let mut index = y * width + 1;
            for _ in 1..width.saturating_sub(1) {
                let spread = (current[index - 1]
                    + current[index + 1]
                    + current[index - width]
                    + current[index + width])
                    / 2.0
                    - next[index];
                next[index] = spread * damping;
                index += 1;
            }
        }

        self.surface_in_a = !self.surface_in_a;
    }

    /// Discrete wave energy of the (surface, trailing) pair.
    ///
    /// `|s|^2 + d|t|^2 - d<s, L t>` with `L` the neighbour half-sum. Each
    /// step multiplies it by exactly `damping`, so it never grows without
    /// new splashes.
    pub fn energy(&self) -> f64 {
        let GridSize { width, height } = self.size;
        let d = f64::from(self.damping);
        let surface = self.surface();
        let trailing = self.trailing();

        let mut kinetic = 0.0f64;
        let mut coupling = 0.0f64;
        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                let i = y * width + x;
                let s = f64::from(surface[i]);
                let t = f64::from(trailing[i]);
                let half_sum = f64::from(
                    trailing[i - 1] + trailing[i + 1] + trailing[i - width] + trailing[i + width],
                ) / 2.0;
                kinetic += s * s + d * t * t;
                coupling += s * half_sum;
            }
        }

        kinetic - d * coupling
    }
}

/// Every per-grid allocation, replaced wholesale on resize
pub struct Buffers {
    pub waves: WaveField,
    pub sand: SandTexture,
    pub frame: Frame,
}

impl Buffers {
    /// Zero-filled height fields, blank sand and an opaque black frame
    pub fn allocate(size: GridSize, damping: f32) -> Self {
        Self {
            waves: WaveField::new(size, damping),
            sand: SandTexture::blank(size),
            frame: Frame::new(size),
        }
    }

    pub fn size(&self) -> GridSize {
        self.waves.size()
    }
}
