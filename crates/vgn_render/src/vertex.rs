#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PresentVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl PresentVertex {
    /// Fullscreen quad in clip space. Texture v runs top to bottom, matching
    /// canvas row order.
    pub const QUAD: [PresentVertex; 4] = [
        PresentVertex {
            position: [-1.0, 1.0],
            tex_coords: [0.0, 0.0],
        },
        PresentVertex {
            position: [1.0, 1.0],
            tex_coords: [1.0, 0.0],
        },
        PresentVertex {
            position: [1.0, -1.0],
            tex_coords: [1.0, 1.0],
        },
        PresentVertex {
            position: [-1.0, -1.0],
            tex_coords: [0.0, 1.0],
        },
    ];

    pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PresentVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(PresentVertex, position) as wgpu::BufferAddress,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // tex_coords
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(PresentVertex, tex_coords)
                        as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_stride_matches_struct() {
        assert_eq!(PresentVertex::layout().array_stride, 16);
        assert_eq!(PresentVertex::layout().attributes[1].offset, 8);
    }

    #[test]
    fn quad_triangles_are_not_degenerate() {
        let q = PresentVertex::QUAD;
        for tri in PresentVertex::QUAD_INDICES.chunks(3) {
            let [a, b, c] = [q[tri[0] as usize], q[tri[1] as usize], q[tri[2] as usize]];
            let cross = (b.position[0] - a.position[0]) * (c.position[1] - a.position[1])
                - (b.position[1] - a.position[1]) * (c.position[0] - a.position[0]);
            assert!(cross != 0.0);
        }
    }

    #[test]
    fn quad_corners_map_to_texture_corners() {
        let top_left = PresentVertex::QUAD[0];
        assert_eq!(top_left.tex_coords, [0.0, 0.0]);
        let bottom_right = PresentVertex::QUAD[2];
        assert_eq!(bottom_right.tex_coords, [1.0, 1.0]);
    }
}
