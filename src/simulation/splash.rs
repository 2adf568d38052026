use crate::config::SPLASH_MARGIN;
use crate::simulation::cell::{Cell, GridSize};
use crate::simulation::grid::WaveField;

/// One pending displacement at a cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Splash {
    pub cell: Cell,
    pub strength: f32,
}

impl Splash {
    pub const fn new(cell: Cell, strength: f32) -> Self {
        Self { cell, strength }
    }
}

/// Soft radial kernel: (dx, dy, weight relative to strength)
const KERNEL: [(i32, i32, f32); 13] = [
    (0, 0, 1.0),
    // Radius 1
    (1, 0, 0.8),
    (-1, 0, 0.8),
    (0, 1, 0.8),
    (0, -1, 0.8),
    // Radius 1 diagonals
    (1, 1, 0.7),
    (-1, 1, 0.7),
    (1, -1, 0.7),
    (-1, -1, 0.7),
    // Radius 2
    (2, 0, 0.4),
    (-2, 0, 0.4),
    (0, 2, 0.4),
    (0, -2, 0.4),
];

/// Whether a splash centred on `cell` keeps the kernel clear of the edges
pub fn in_safe_zone(size: GridSize, cell: Cell) -> bool {
    let (width, height) = (size.width as i64, size.height as i64);
    let (x, y) = (i64::from(cell.x), i64::from(cell.y));
    let margin = i64::from(SPLASH_MARGIN);
    x >= margin && x < width - margin && y >= margin && y < height - margin
}

/// Write the splash kernel into the surface field, overwriting.
///
/// Silently does nothing when `cell` is closer than three cells to any edge.
pub fn inject(waves: &mut WaveField, cell: Cell, strength: f32) {
    let size = waves.size();
    if !in_safe_zone(size, cell) {
        return;
    }

    let surface = waves.surface_mut();
    for &(dx, dy, weight) in &KERNEL {
        if let Some(index) = size.index(Cell::new(cell.x + dx, cell.y + dy)) {
            surface[index] = strength * weight;
        }
    }
}

/// Apply a batch of splashes in order
pub fn inject_all(waves: &mut WaveField, splashes: &[Splash]) {
    for splash in splashes {
        inject(waves, splash.cell, splash.strength);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(width: usize, height: usize) -> WaveField {
        WaveField::new(GridSize::new(width, height), 0.985)
    }

    fn at(waves: &WaveField, x: i32, y: i32) -> f32 {
        let i = waves.size().index(Cell::new(x, y)).unwrap();
        waves.surface()[i]
    }

    #[test]
    fn test_kernel_values() {
        let mut waves = field(20, 20);
        inject(&mut waves, Cell::new(10, 10), 30.0);

        assert_eq!(at(&waves, 10, 10), 30.0);
        for (x, y) in [(11, 10), (9, 10), (10, 11), (10, 9)] {
            assert!((at(&waves, x, y) - 24.0).abs() < 1e-5);
        }
        for (x, y) in [(11, 11), (9, 11), (11, 9), (9, 9)] {
            assert!((at(&waves, x, y) - 21.0).abs() < 1e-5);
        }
        for (x, y) in [(12, 10), (8, 10), (10, 12), (10, 8)] {
            assert!((at(&waves, x, y) - 12.0).abs() < 1e-5);
        }
        // Knight's-move and radius-2 diagonal cells are not part of the kernel
        assert_eq!(at(&waves, 12, 11), 0.0);
        assert_eq!(at(&waves, 12, 12), 0.0);

        let touched = waves.surface().iter().filter(|&&h| h != 0.0).count();
        assert_eq!(touched, 13);
    }

    #[test]
    fn test_overwrites_instead_of_accumulating() {
        let mut waves = field(20, 20);
        inject(&mut waves, Cell::new(10, 10), 30.0);
        inject(&mut waves, Cell::new(10, 10), 10.0);
        assert_eq!(at(&waves, 10, 10), 10.0);

        inject(&mut waves, Cell::new(11, 10), 20.0);
        // (10, 10) is now a radius-1 neighbour of the second splash
        assert!((at(&waves, 10, 10) - 16.0).abs() < 1e-5);
    }

    #[test]
    fn test_safe_zone_edges() {
        let size = GridSize::new(10, 10);
        assert!(in_safe_zone(size, Cell::new(3, 3)));
        assert!(in_safe_zone(size, Cell::new(6, 6)));
        assert!(!in_safe_zone(size, Cell::new(2, 5)));
        assert!(!in_safe_zone(size, Cell::new(7, 5)));
        assert!(!in_safe_zone(size, Cell::new(5, 7)));
        assert!(!in_safe_zone(size, Cell::new(-1, 5)));
    }

    #[test]
    fn test_boundary_injection_is_safe() {
        for (width, height) in [(8, 8), (9, 13), (16, 8), (31, 17)] {
            let mut waves = field(width, height);
            let (w, h) = (width as i32, height as i32);

            let mut border = Vec::new();
            for x in 0..w {
                border.push(Cell::new(x, 0));
                border.push(Cell::new(x, h - 1));
            }
            for y in 0..h {
                border.push(Cell::new(0, y));
                border.push(Cell::new(w - 1, y));
            }

            for cell in border {
                inject(&mut waves, cell, 30.0);
                // Border cells are within the margin, so nothing may change
                assert!(waves.surface().iter().all(|&v| v == 0.0));
                assert_eq!(waves.surface().len(), width * height);
            }
        }
    }

    #[test]
    fn test_injection_stays_within_two_cells() {
        let size = GridSize::new(12, 10);
        for y in 0..size.height as i32 {
            for x in 0..size.width as i32 {
                let mut waves = WaveField::new(size, 0.985);
                inject(&mut waves, Cell::new(x, y), 30.0);
                for (i, &h) in waves.surface().iter().enumerate() {
                    if h == 0.0 {
                        continue;
                    }
                    let cx = (i % size.width) as i32;
                    let cy = (i / size.width) as i32;
                    assert!((cx - x).abs() + (cy - y).abs() <= 2);
                }
            }
        }
    }

    #[test]
    fn test_inject_all_applies_in_order() {
        let mut waves = field(20, 20);
        inject_all(
            &mut waves,
            &[
                Splash::new(Cell::new(10, 10), 30.0),
                Splash::new(Cell::new(10, 10), 5.0),
            ],
        );
        assert_eq!(at(&waves, 10, 10), 5.0);
    }
}
