//! Grid state store
//!
//! Two equal-size cell textures ("A" and "B") that the compute pass
//! ping-pongs between. Which one is this frame's source is a pure
//! function of frame parity, so no mutable "current" flag exists and
//! no synchronization is needed: source and destination are always
//! distinct physical textures.
//!
//! Cells are bytes in {0, 1} on the host. wgpu storage textures have no
//! 8-bit single-channel format, so on the GPU each cell occupies an
//! `Rgba8Unorm` texel with the state replicated into RGB. This keeps the
//! same texture usable as a compute write target and as a filterable
//! sample source for the presenter.

use wgpu::{Device, Queue};

/// Identifies one of the two grid textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferSlot {
    A,
    B,
}

impl BufferSlot {
    /// The other slot of the pair.
    pub fn other(self) -> Self {
        match self {
            BufferSlot::A => BufferSlot::B,
            BufferSlot::B => BufferSlot::A,
        }
    }
}

/// Returns this frame's (source, destination) texture roles.
///
/// Even frames read A and write B; odd frames read B and write A.
/// Pure function of the frame index, so consecutive frames always
/// swap roles and a frame never reads and writes the same texture.
pub fn source_and_dest(frame: u64) -> (BufferSlot, BufferSlot) {
    if frame % 2 == 0 {
        (BufferSlot::A, BufferSlot::B)
    } else {
        (BufferSlot::B, BufferSlot::A)
    }
}

/// The pair of GPU-resident cell-state textures.
///
/// Created once at startup and never resized. Texture B starts with
/// undefined contents; the first compute dispatch overwrites it before
/// anything may display it.
pub struct GridBuffers {
    pub width: u32,
    pub height: u32,
    texture_a: wgpu::Texture,
    texture_b: wgpu::Texture,
    view_a: wgpu::TextureView,
    view_b: wgpu::TextureView,
}

impl GridBuffers {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Allocates both grid textures.
    pub fn create(device: &Device, width: u32, height: u32) -> Self {
        let descriptor = wgpu::TextureDescriptor {
            label: Some("Grid Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        };

        let texture_a = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Grid Texture A"),
            ..descriptor.clone()
        });
        let texture_b = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Grid Texture B"),
            ..descriptor
        });

        let view_a = texture_a.create_view(&wgpu::TextureViewDescriptor::default());
        let view_b = texture_b.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            width,
            height,
            texture_a,
            texture_b,
            view_a,
            view_b,
        }
    }

    pub fn view(&self, slot: BufferSlot) -> &wgpu::TextureView {
        match slot {
            BufferSlot::A => &self.view_a,
            BufferSlot::B => &self.view_b,
        }
    }

    /// Uploads a host-side cell grid into one of the textures.
    ///
    /// `cells` must hold `width * height` bytes in {0, 1}. Used once at
    /// startup to place the seed into frame 0's compute source.
    pub fn upload(&self, queue: &Queue, slot: BufferSlot, cells: &[u8]) {
        debug_assert_eq!(cells.len(), (self.width * self.height) as usize);

        let texels = cell_texels(cells);
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: self.texture_for_write(slot),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &texels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.width * 4),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn texture_for_write(&self, slot: BufferSlot) -> &wgpu::Texture {
        match slot {
            BufferSlot::A => &self.texture_a,
            BufferSlot::B => &self.texture_b,
        }
    }
}

/// Expands byte cells into RGBA8 texel data (state replicated into RGB,
/// alpha opaque).
pub(crate) fn cell_texels(cells: &[u8]) -> Vec<u8> {
    let mut texels = Vec::with_capacity(cells.len() * 4);
    for &cell in cells {
        let shade = if cell != 0 { 255 } else { 0 };
        texels.extend_from_slice(&[shade, shade, shade, 255]);
    }
    texels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_swap_every_frame() {
        for frame in 1..16u64 {
            let (source, dest) = source_and_dest(frame);
            let (prev_source, prev_dest) = source_and_dest(frame - 1);
            assert_eq!(source, prev_dest);
            assert_eq!(dest, prev_source);
        }
    }

    #[test]
    fn test_source_never_equals_dest() {
        for frame in 0..16u64 {
            let (source, dest) = source_and_dest(frame);
            assert_ne!(source, dest);
            assert_eq!(source.other(), dest);
        }
    }

    #[test]
    fn test_frame_zero_reads_a() {
        assert_eq!(source_and_dest(0), (BufferSlot::A, BufferSlot::B));
        assert_eq!(source_and_dest(1), (BufferSlot::B, BufferSlot::A));
    }

    #[test]
    fn test_cell_texel_expansion() {
        assert_eq!(
            cell_texels(&[0, 1]),
            vec![0, 0, 0, 255, 255, 255, 255, 255]
        );
        assert_eq!(cell_texels(&[]).len(), 0);
    }
}
