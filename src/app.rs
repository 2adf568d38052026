use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{Tunables, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::InitError;
use crate::gpu::{GpuContext, Presenter};
use crate::lagoon::{DriverState, Lagoon};

/// Application state
pub struct App {
    tunables: Tunables,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    presenter: Option<Presenter>,
    lagoon: Option<Lagoon>,
    frame_clock: FrameClock,
    fps_counter: FpsCounter,
    init_error: Option<InitError>,
}

impl App {
    pub fn new(tunables: Tunables) -> Self {
        Self {
            frame_clock: FrameClock::new(tunables.target_fps, Instant::now()),
            tunables,
            window: None,
            gpu: None,
            presenter: None,
            lagoon: None,
            fps_counter: FpsCounter::new(),
            init_error: None,
        }
    }

    /// Consume the app after the event loop returns, surfacing any
    /// startup failure
    pub fn finish(self) -> Result<(), InitError> {
        match self.init_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        log::info!("Initializing Pixel Lagoon...");

        let window_attrs = Window::default_attributes()
            .with_title("Pixel Lagoon")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        let size = window.inner_size();
        let lagoon = Lagoon::new(self.tunables.clone(), size.width, size.height);
        let presenter = Presenter::new(&gpu, lagoon.frame());

        log::info!(
            "Initialization complete: {} px per cell, damping {}, physics every {} frames",
            self.tunables.pixel_scale,
            self.tunables.damping,
            self.tunables.physics_divisor
        );
        log::info!("Move the pointer over the window to make ripples; Escape quits");

        self.frame_clock = FrameClock::new(self.tunables.target_fps, Instant::now());
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.presenter = Some(presenter);
        self.lagoon = Some(lagoon);
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.lagoon
            .as_ref()
            .is_some_and(|lagoon| lagoon.state() == DriverState::Running)
    }

    /// One frame callback: advance the driver and, on physics frames,
    /// upload the new image and ask for it to be presented
    fn frame(&mut self) {
        let (Some(lagoon), Some(gpu), Some(presenter)) =
            (self.lagoon.as_mut(), self.gpu.as_ref(), self.presenter.as_mut())
        else {
            return;
        };

        if let Some(frame) = lagoon.tick() {
            presenter.upload(gpu, frame);
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    /// Present the most recently uploaded image
    fn render(&mut self) {
        if !self.is_running() {
            return;
        }
        let (Some(gpu), Some(presenter)) = (self.gpu.as_ref(), self.presenter.as_ref()) else {
            return;
        };

        match presenter.present(gpu) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        }

        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                window.set_title(&format!("Pixel Lagoon - {:.0} FPS", fps));
            }
        }
    }

    /// Stop the driver and leave the event loop; nothing is presented after
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(lagoon) = &mut self.lagoon {
            lagoon.stop();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("Initialization failed: {}", e);
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                self.shutdown(event_loop);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed()
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    log::info!("Escape pressed, exiting...");
                    self.shutdown(event_loop);
                }
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
                if let Some(lagoon) = &mut self.lagoon {
                    lagoon.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(lagoon) = &mut self.lagoon {
                    lagoon.pointer_moved(position.x, position.y);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(lagoon) = &mut self.lagoon {
                    lagoon.pointer_left();
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.is_running() {
            return;
        }

        if self.frame_clock.poll(Instant::now()) {
            self.frame();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.frame_clock.deadline()));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(lagoon) = &mut self.lagoon {
            lagoon.stop();
        }
    }
}

/// Monotonic frame scheduler firing at a fixed rate
struct FrameClock {
    interval: Duration,
    next: Instant,
}

impl FrameClock {
    fn new(fps: u32, now: Instant) -> Self {
        let interval = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
        Self {
            interval,
            next: now + interval,
        }
    }

    /// True when a frame is due at `now`. A late clock fires once and
    /// re-anchors instead of bursting to catch up.
    fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }

    fn deadline(&self) -> Instant {
        self.next
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
