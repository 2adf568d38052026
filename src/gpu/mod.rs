mod context;
mod presenter;
mod render;
mod texture;

pub use context::GpuContext;
pub use presenter::Presenter;
pub use render::BlitPipeline;
pub use texture::PixelTexture;
