use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Tunables;
use crate::simulation::{
    inject_all, shade, Buffers, Cell, Frame, GridSize, PointerState, PointerTracker, SandGrain,
    SandTexture, WaveField,
};

/// Lifecycle of the frame driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

/// The simulation side of the frame driver: owns every buffer, applies
/// pointer input as it arrives and runs physics + shading on a throttled
/// subset of frame callbacks.
pub struct Lagoon {
    tunables: Tunables,
    buffers: Buffers,
    pointer: PointerTracker,
    grain: SandGrain<StdRng>,
    frame_counter: u64,
    physics_steps: u64,
    state: DriverState,
}

impl Lagoon {
    /// Allocate buffers for a viewport (device pixels) and bake the sand
    pub fn new(tunables: Tunables, viewport_width: u32, viewport_height: u32) -> Self {
        let seed = tunables.seed.unwrap_or_else(rand::random);
        log::info!("Sand noise seed: {} (set LAGOON_SEED to reproduce)", seed);

        let size = GridSize::from_viewport(viewport_width, viewport_height, tunables.pixel_scale);
        let pointer =
            PointerTracker::new(tunables.first_contact_strength, tunables.drag_strength);

        let mut lagoon = Self {
            buffers: Buffers::allocate(size, tunables.damping),
            pointer,
            grain: SandGrain::new(StdRng::seed_from_u64(seed)),
            frame_counter: 0,
            physics_steps: 0,
            state: DriverState::Running,
            tunables,
        };
        lagoon.buffers.sand.generate(&mut lagoon.grain);
        log::info!("Grid size: {}x{} cells", size.width, size.height);
        lagoon
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    #[allow(dead_code)]
    pub fn size(&self) -> GridSize {
        self.buffers.size()
    }

    #[allow(dead_code)]
    pub fn waves(&self) -> &WaveField {
        &self.buffers.waves
    }

    #[allow(dead_code)]
    pub fn sand(&self) -> &SandTexture {
        &self.buffers.sand
    }

    /// Last shaded image
    pub fn frame(&self) -> &Frame {
        &self.buffers.frame
    }

    /// Replace every buffer for a new viewport size. Ripples are discarded.
    pub fn resize(&mut self, viewport_width: u32, viewport_height: u32) {
        if self.state == DriverState::Stopped {
            return;
        }
        let size = GridSize::from_viewport(
            viewport_width,
            viewport_height,
            self.tunables.pixel_scale,
        );
        self.buffers = Buffers::allocate(size, self.tunables.damping);
        self.buffers.sand.generate(&mut self.grain);
        log::info!(
            "Viewport {}x{} -> grid {}x{} cells",
            viewport_width,
            viewport_height,
            size.width,
            size.height
        );
    }

    /// Pointer sample in device pixels; splashes land immediately so they
    /// are part of the next physics step
    pub fn pointer_moved(&mut self, px: f64, py: f64) {
        if self.state == DriverState::Stopped {
            return;
        }
        let cell = Cell::from_pointer(px, py, self.tunables.pixel_scale);
        let splashes = self.pointer.on_move(cell);
        inject_all(&mut self.buffers.waves, &splashes);
    }

    pub fn pointer_left(&mut self) {
        if self.pointer.state() != PointerState::Idle {
            log::debug!("Pointer left the surface");
        }
        self.pointer.on_leave();
    }

    /// One frame callback. Returns the freshly shaded image on physics
    /// frames and `None` on skipped frames or once stopped.
    pub fn tick(&mut self) -> Option<&Frame> {
        if self.state == DriverState::Stopped {
            return None;
        }

        self.frame_counter += 1;
        if self.frame_counter % u64::from(self.tunables.physics_divisor) != 0 {
            return None;
        }

        self.buffers.waves.step();
        shade(&self.buffers.waves, &self.buffers.sand, &mut self.buffers.frame);
        self.physics_steps += 1;

        let steps_per_second =
            u64::from((self.tunables.target_fps / self.tunables.physics_divisor).max(1));
        if self.physics_steps % steps_per_second == 0 && log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Physics step {}: wave energy {:.3}",
                self.physics_steps,
                self.buffers.waves.energy()
            );
        }

        Some(&self.buffers.frame)
    }

    /// Tear down: no further frames are produced and input is ignored
    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            log::info!(
                "Stopping after {} frames ({} physics steps)",
                self.frame_counter,
                self.physics_steps
            );
            self.state = DriverState::Stopped;
            self.pointer.on_leave();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{water_color, Rgba};

    fn lagoon(width: u32, height: u32) -> Lagoon {
        let tunables = Tunables {
            seed: Some(1234),
            ..Tunables::default()
        };
        Lagoon::new(tunables, width, height)
    }

    #[test]
    fn test_grid_from_viewport() {
        let lagoon = lagoon(401, 300);
        assert_eq!(lagoon.size(), GridSize::new(101, 75));
        assert_eq!(lagoon.state(), DriverState::Running);
    }

    #[test]
    fn test_physics_runs_every_other_frame() {
        let mut lagoon = lagoon(200, 200);
        let produced: Vec<bool> = (0..6).map(|_| lagoon.tick().is_some()).collect();
        assert_eq!(produced, vec![false, true, false, true, false, true]);
    }

    #[test]
    fn test_custom_divisor() {
        let tunables = Tunables {
            physics_divisor: 3,
            seed: Some(1),
            ..Tunables::default()
        };
        let mut lagoon = Lagoon::new(tunables, 100, 100);
        let produced: Vec<bool> = (0..6).map(|_| lagoon.tick().is_some()).collect();
        assert_eq!(produced, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn test_pointer_input_lands_before_next_step() {
        let mut lagoon = lagoon(400, 400);
        // Pixel (200, 200) is cell (50, 50) at scale 4
        lagoon.pointer_moved(201.0, 203.0);
        let center = lagoon.size().index(Cell::new(50, 50)).unwrap();
        assert_eq!(lagoon.waves().surface()[center], 30.0);

        lagoon.tick();
        lagoon.tick();
        // The step read the splash: its centre is now in the trailing field
        assert_eq!(lagoon.waves().trailing()[center], 30.0);
        assert!(lagoon.waves().surface()[center] > 0.0);
    }

    #[test]
    fn test_leave_then_reenter_is_first_contact() {
        let mut lagoon = lagoon(400, 400);
        lagoon.pointer_moved(100.0, 100.0);
        lagoon.pointer_left();
        assert_eq!(lagoon.pointer.state(), PointerState::Idle);

        lagoon.pointer_moved(300.0, 300.0);
        let cell = lagoon.size().index(Cell::new(75, 75)).unwrap();
        assert_eq!(lagoon.waves().surface()[cell], 30.0);
        // Nothing was traced between the two contacts
        let midway = lagoon.size().index(Cell::new(50, 50)).unwrap();
        assert_eq!(lagoon.waves().surface()[midway], 0.0);
    }

    #[test]
    fn test_resize_resets_state() {
        let mut lagoon = lagoon(400, 400);
        lagoon.pointer_moved(200.0, 200.0);
        lagoon.pointer_moved(240.0, 220.0);
        for _ in 0..10 {
            lagoon.tick();
        }
        assert!(lagoon.waves().surface().iter().any(|&h| h != 0.0));

        lagoon.resize(320, 240);
        let size = lagoon.size();
        assert_eq!(size, GridSize::new(80, 60));
        assert_eq!(lagoon.waves().surface().len(), 80 * 60);
        assert!(lagoon.waves().surface().iter().all(|&h| h == 0.0));
        assert!(lagoon.waves().trailing().iter().all(|&h| h == 0.0));

        // First post-resize physics frame is the tinted sand, nothing more
        while lagoon.tick().is_none() {}
        let (frame, sand) = (lagoon.frame(), lagoon.sand());
        for y in 1..size.height - 1 {
            for x in 1..size.width - 1 {
                let i = y * size.width + x;
                let still = Rgba::from_channels(water_color(sand.rgb(i), 0.0, 0.0, 0.0));
                assert_eq!(frame.pixel(x, y), still, "cell ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_stopped_driver_produces_nothing() {
        let mut lagoon = lagoon(200, 200);
        lagoon.tick();
        lagoon.stop();
        assert_eq!(lagoon.state(), DriverState::Stopped);

        lagoon.pointer_moved(100.0, 100.0);
        assert!(lagoon.waves().surface().iter().all(|&h| h == 0.0));
        for _ in 0..4 {
            assert!(lagoon.tick().is_none());
        }

        let before = lagoon.size();
        lagoon.resize(800, 800);
        assert_eq!(lagoon.size(), before);
    }

    #[test]
    fn test_same_seed_same_sand_across_sessions() {
        let a = lagoon(120, 80);
        let b = lagoon(120, 80);
        assert_eq!(a.sand().texels(), b.sand().texels());
    }
}
