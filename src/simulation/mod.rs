mod cell;
mod grid;
mod pointer;
mod sand;
mod shading;
mod splash;

pub use cell::{Cell, GridSize};
pub use grid::{Buffers, WaveField};
pub use pointer::{PointerState, PointerTracker};
pub use sand::{SandGrain, SandTexture};
pub use shading::{shade, Frame};
pub use splash::inject_all;

#[cfg(test)]
pub use shading::{water_color, Rgba};
