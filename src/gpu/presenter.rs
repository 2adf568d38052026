use wgpu::BindGroup;

use crate::gpu::{BlitPipeline, GpuContext, PixelTexture};
use crate::simulation::Frame;

/// Uploads shaded frames and blits the latest one to the window surface
pub struct Presenter {
    texture: PixelTexture,
    blit: BlitPipeline,
    bind_group: BindGroup,
}

impl Presenter {
    pub fn new(gpu: &GpuContext, frame: &Frame) -> Self {
        let texture = PixelTexture::new(&gpu.device, frame.size(), gpu.format());
        let blit = BlitPipeline::new(&gpu.device, gpu.format());
        let bind_group = blit.create_bind_group(&gpu.device, &texture.view);
        Self {
            texture,
            blit,
            bind_group,
        }
    }

    /// Copy a frame to the GPU, replacing the texture after a resize
    pub fn upload(&mut self, gpu: &GpuContext, frame: &Frame) {
        if !self.texture.matches(frame.size()) {
            log::debug!(
                "Recreating frame texture at {}x{}",
                frame.size().width,
                frame.size().height
            );
            self.texture = PixelTexture::new(&gpu.device, frame.size(), gpu.format());
            self.bind_group = self.blit.create_bind_group(&gpu.device, &self.texture.view);
        }
        self.texture.upload(&gpu.queue, frame);
    }

    /// Draw the last uploaded frame and present it
    pub fn present(&self, gpu: &GpuContext) -> Result<(), wgpu::SurfaceError> {
        let output = gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        self.blit.draw(&mut encoder, &view, &self.bind_group);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
