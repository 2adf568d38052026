use crate::simulation::cell::Cell;
use crate::simulation::splash::Splash;

/// Last known pointer cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerState {
    /// Pointer has not moved over the surface, or has left it
    Idle,
    Tracking(Cell),
}

/// Turns pointer motion into splashes.
///
/// The first sample after entering drops one strong splash; later samples
/// trace the segment from the previous cell so fast drags leave no gaps.
pub struct PointerTracker {
    state: PointerState,
    first_contact_strength: f32,
    drag_strength: f32,
}

impl PointerTracker {
    pub fn new(first_contact_strength: f32, drag_strength: f32) -> Self {
        Self {
            state: PointerState::Idle,
            first_contact_strength,
            drag_strength,
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Record a pointer sample at `cell`, returning the splashes it causes
    pub fn on_move(&mut self, cell: Cell) -> Vec<Splash> {
        let splashes = match self.state {
            PointerState::Idle => vec![Splash::new(cell, self.first_contact_strength)],
            PointerState::Tracking(previous) => self.trace(previous, cell),
        };
        self.state = PointerState::Tracking(cell);
        splashes
    }

    /// Pointer left the surface
    pub fn on_leave(&mut self) {
        self.state = PointerState::Idle;
    }

    /// Splashes at `ceil(distance)` evenly spaced points from `from`
    /// (inclusive) toward `to` (exclusive)
    fn trace(&self, from: Cell, to: Cell) -> Vec<Splash> {
        let steps = from.distance(to).ceil() as u32;
        let dx = (to.x - from.x) as f32;
        let dy = (to.y - from.y) as f32;

        (0..steps)
            .map(|i| {
                // Scale before dividing so whole-cell positions stay exact
                let (i, n) = (i as f32, steps as f32);
                let cell = Cell::new(
                    (from.x as f32 + dx * i / n).floor() as i32,
                    (from.y as f32 + dy * i / n).floor() as i32,
                );
                Splash::new(cell, self.drag_strength)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tracker() -> PointerTracker {
        PointerTracker::new(30.0, 20.0)
    }

    #[test]
    fn test_first_contact_splash() {
        let mut pointer = tracker();
        assert_eq!(pointer.state(), PointerState::Idle);

        let splashes = pointer.on_move(Cell::new(5, 7));
        assert_eq!(splashes, vec![Splash::new(Cell::new(5, 7), 30.0)]);
        assert_eq!(pointer.state(), PointerState::Tracking(Cell::new(5, 7)));
    }

    #[test]
    fn test_drag_has_no_gaps() {
        let mut pointer = tracker();
        pointer.on_move(Cell::new(0, 0));

        let splashes = pointer.on_move(Cell::new(10, 0));
        assert_eq!(splashes.len(), 10);
        assert!(splashes.iter().all(|s| s.strength == 20.0));

        let cells: HashSet<Cell> = splashes.iter().map(|s| s.cell).collect();
        for x in 1..=9 {
            assert!(cells.contains(&Cell::new(x, 0)), "missing splash at ({}, 0)", x);
        }
        assert_eq!(pointer.state(), PointerState::Tracking(Cell::new(10, 0)));
    }

    #[test]
    fn test_diagonal_drag_steps_are_adjacent() {
        let mut pointer = tracker();
        pointer.on_move(Cell::new(4, 4));
        let splashes = pointer.on_move(Cell::new(-3, 12));

        assert_eq!(splashes.first().map(|s| s.cell), Some(Cell::new(4, 4)));
        for pair in splashes.windows(2) {
            let (a, b) = (pair[0].cell, pair[1].cell);
            assert!((a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1);
        }
    }

    #[test]
    fn test_same_cell_injects_nothing() {
        let mut pointer = tracker();
        pointer.on_move(Cell::new(3, 3));
        assert!(pointer.on_move(Cell::new(3, 3)).is_empty());
    }

    #[test]
    fn test_leave_returns_to_idle() {
        let mut pointer = tracker();
        pointer.on_move(Cell::new(3, 3));
        pointer.on_leave();
        assert_eq!(pointer.state(), PointerState::Idle);

        // Re-entry far away is a fresh contact, not a drag across the gap
        let splashes = pointer.on_move(Cell::new(90, 90));
        assert_eq!(splashes, vec![Splash::new(Cell::new(90, 90), 30.0)]);
    }
}
