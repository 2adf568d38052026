use wgpu::{Device, Queue, Texture, TextureFormat, TextureView};

use crate::simulation::{Frame, GridSize};

/// GPU copy of the shaded simulation image, one texel per cell
pub struct PixelTexture {
    texture: Texture,
    pub view: TextureView,
    pub width: u32,
    pub height: u32,
}

impl PixelTexture {
    /// Create a texture for the grid.
    ///
    /// Frame bytes are sRGB-encoded colors, so the texture is marked sRGB
    /// when the surface is, keeping the decode/encode pair balanced.
    pub fn new(device: &Device, size: GridSize, surface_format: TextureFormat) -> Self {
        let width = size.width as u32;
        let height = size.height as u32;
        let format = if surface_format.is_srgb() {
            TextureFormat::Rgba8UnormSrgb
        } else {
            TextureFormat::Rgba8Unorm
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lagoon-frame-texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            width,
            height,
        }
    }

    pub fn matches(&self, size: GridSize) -> bool {
        self.width as usize == size.width && self.height as usize == size.height
    }

    /// Upload a shaded frame. The frame must match the texture size.
    pub fn upload(&self, queue: &Queue, frame: &Frame) {
        debug_assert!(self.matches(frame.size()), "Frame size mismatch");

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            frame.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }
}
