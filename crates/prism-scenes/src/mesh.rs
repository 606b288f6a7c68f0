//! Tessellated planes.

use bytemuck::{Pod, Zeroable};

/// Vertex layout shared by every scene pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Plane dimensions in world units and segment counts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneSpec {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl PlaneSpec {
    pub const fn new(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        Self { width, height, width_segments, height_segments }
    }
}

/// Indexed triangle mesh, CPU side.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshGeometry {
    /// A plane in the XY plane centered on the origin, facing +Z.
    ///
    /// Rows run from the top edge (+Y) down; `uv` is `(0, 1)` at the top-left
    /// corner. Segment counts below 1 are raised to 1.
    pub fn plane(spec: PlaneSpec) -> Self {
        let ws = spec.width_segments.max(1);
        let hs = spec.height_segments.max(1);
        let (cols, rows) = (ws + 1, hs + 1);
        let (half_w, half_h) = (spec.width * 0.5, spec.height * 0.5);
        let (seg_w, seg_h) = (spec.width / ws as f32, spec.height / hs as f32);

        let mut vertices = Vec::with_capacity((cols * rows) as usize);
        for iy in 0..rows {
            let y = half_h - iy as f32 * seg_h;
            for ix in 0..cols {
                let x = ix as f32 * seg_w - half_w;
                vertices.push(Vertex {
                    position: [x, y, 0.0],
                    uv: [ix as f32 / ws as f32, 1.0 - iy as f32 / hs as f32],
                });
            }
        }

        let mut indices = Vec::with_capacity((6 * ws * hs) as usize);
        for iy in 0..hs {
            for ix in 0..ws {
                let a = ix + cols * iy;
                let b = ix + cols * (iy + 1);
                let c = ix + 1 + cols * (iy + 1);
                let d = ix + 1 + cols * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_counts() {
        let m = MeshGeometry::plane(PlaneSpec::new(8.0, 4.0, 64, 32));
        assert_eq!(m.vertices.len(), 65 * 33);
        assert_eq!(m.indices.len(), 6 * 64 * 32);
        assert!(m.indices.iter().all(|&i| (i as usize) < m.vertices.len()));
    }

    #[test]
    fn plane_spans_its_extent() {
        let m = MeshGeometry::plane(PlaneSpec::new(4.0, 3.0, 2, 2));
        let first = m.vertices.first().unwrap();
        let last = m.vertices.last().unwrap();
        assert_eq!(first.position, [-2.0, 1.5, 0.0]);
        assert_eq!(first.uv, [0.0, 1.0]);
        assert_eq!(last.position, [2.0, -1.5, 0.0]);
        assert_eq!(last.uv, [1.0, 0.0]);
    }

    #[test]
    fn triangles_face_forward() {
        let m = MeshGeometry::plane(PlaneSpec::new(2.0, 2.0, 1, 1));
        for tri in m.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| m.vertices[tri[i] as usize].position);
            let cross_z = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(cross_z > 0.0, "triangle {tri:?} is clockwise");
        }
    }

    #[test]
    fn zero_segments_are_clamped() {
        let m = MeshGeometry::plane(PlaneSpec::new(1.0, 1.0, 0, 0));
        assert_eq!(m.vertices.len(), 4);
        assert_eq!(m.index_count(), 6);
    }
}
