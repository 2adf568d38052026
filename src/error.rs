//! Fatal startup errors. The simulator has no degraded mode, so any of
//! these ends the program.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitError {
    /// The event loop could not be created or exited abnormally
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no GPU adapter compatible with the window surface")]
    NoAdapter,

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,
}
