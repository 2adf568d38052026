/// Integer coordinate of one simulation cell.
///
/// Signed so pointer positions left of or above the surface map to
/// negative cells instead of wrapping; consumers bounds-check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Map a pointer position in device pixels to the cell under it
    pub fn from_pointer(px: f64, py: f64, pixel_scale: u32) -> Self {
        let scale = f64::from(pixel_scale.max(1));
        Self {
            x: (px / scale).floor() as i32,
            y: (py / scale).floor() as i32,
        }
    }

    /// Euclidean distance in cells
    pub fn distance(self, other: Cell) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Grid dimensions in cells. Both are always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Grid covering a viewport of the given device-pixel size
    pub fn from_viewport(viewport_width: u32, viewport_height: u32, pixel_scale: u32) -> Self {
        let scale = pixel_scale.max(1);
        Self::new(
            viewport_width.div_ceil(scale) as usize,
            viewport_height.div_ceil(scale) as usize,
        )
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index, or `None` outside the grid
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let (x, y) = (cell.x as usize, cell.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_to_cell_floors() {
        assert_eq!(Cell::from_pointer(0.0, 0.0, 4), Cell::new(0, 0));
        assert_eq!(Cell::from_pointer(7.9, 8.0, 4), Cell::new(1, 2));
        assert_eq!(Cell::from_pointer(-0.5, 3.0, 4), Cell::new(-1, 0));
    }

    #[test]
    fn test_viewport_uses_ceiling_division() {
        assert_eq!(GridSize::from_viewport(1024, 768, 4), GridSize::new(256, 192));
        assert_eq!(GridSize::from_viewport(1025, 1, 4), GridSize::new(257, 1));
    }

    #[test]
    fn test_degenerate_viewport_clamps_to_one() {
        let size = GridSize::from_viewport(0, 0, 4);
        assert_eq!(size.width, 1);
        assert_eq!(size.height, 1);
        assert_eq!(size.cell_count(), 1);
    }

    #[test]
    fn test_index_bounds() {
        let size = GridSize::new(10, 5);
        assert_eq!(size.index(Cell::new(3, 2)), Some(23));
        assert_eq!(size.index(Cell::new(10, 0)), None);
        assert_eq!(size.index(Cell::new(0, -1)), None);
    }
}
