//! Vertex format for the full-screen blit
//!
//! The presenter draws one quad as six vertices (two triangles) that
//! never change after creation. Positions are clip-space corners, texture
//! coordinates map the grid texture across the window, and the color is a
//! fixed 0.7 gray tint multiplied over the sampled cell state.

/// A single blit-quad vertex.
///
/// `#[repr(C)]` keeps the layout GPU-compatible for the vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Vertex buffer layout: position at location 0, texture coordinates
    /// at location 1, color tint at location 2.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

const TINT: [f32; 4] = [0.7, 0.7, 0.7, 0.7];

/// The screen-filling quad, two triangles in a fixed order.
pub const SCREEN_QUAD: [Vertex; 6] = [
    Vertex { position: [-1.0, 1.0], tex_coords: [0.0, 0.0], color: TINT },
    Vertex { position: [1.0, 1.0], tex_coords: [1.0, 0.0], color: TINT },
    Vertex { position: [-1.0, -1.0], tex_coords: [0.0, 1.0], color: TINT },
    Vertex { position: [1.0, -1.0], tex_coords: [1.0, 1.0], color: TINT },
    Vertex { position: [-1.0, -1.0], tex_coords: [0.0, 1.0], color: TINT },
    Vertex { position: [1.0, 1.0], tex_coords: [1.0, 0.0], color: TINT },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(
            Vertex::desc().array_stride,
            std::mem::size_of::<Vertex>() as wgpu::BufferAddress
        );
    }

    #[test]
    fn test_quad_covers_clip_space() {
        assert_eq!(SCREEN_QUAD.len(), 6);
        for vertex in SCREEN_QUAD {
            assert!(vertex.position.iter().all(|c| c.abs() == 1.0));
            assert!(vertex.tex_coords.iter().all(|&c| c == 0.0 || c == 1.0));
        }
    }
}
