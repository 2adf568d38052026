mod app;
mod config;
mod error;
mod gpu;
mod lagoon;
mod simulation;

use winit::event_loop::EventLoop;

use crate::app::App;
use crate::config::Tunables;
use crate::error::InitError;

fn main() -> Result<(), InitError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let tunables = Tunables::from_env();
    log::debug!("Tunables: {:?}", tunables);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(tunables);
    event_loop.run_app(&mut app)?;

    app.finish()
}
