//! Static cube geometry: 6 faces × 2 triangles × 3 vertices, position + normal.

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex: position at offset 0, normal at offset 12.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const STRIDE: u64 = std::mem::size_of::<Vertex>() as u64;
    const NORMAL_OFFSET: u64 = std::mem::size_of::<[f32; 3]>() as u64;

    /// Attribute descriptors for the given shader locations.
    pub fn attributes(position: u32, normal: u32) -> [wgpu::VertexAttribute; 2] {
        [
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: position,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: Self::NORMAL_OFFSET,
                shader_location: normal,
            },
        ]
    }

    pub fn layout(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

const fn v(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex { position, normal }
}

pub const CUBE_VERTEX_COUNT: u32 = 36;

#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; CUBE_VERTEX_COUNT as usize] = [
    // front
    v([-1.0, -1.0,  1.0], [ 0.0,  0.0,  1.0]),
    v([ 1.0, -1.0,  1.0], [ 0.0,  0.0,  1.0]),
    v([ 1.0,  1.0,  1.0], [ 0.0,  0.0,  1.0]),
    v([-1.0, -1.0,  1.0], [ 0.0,  0.0,  1.0]),
    v([ 1.0,  1.0,  1.0], [ 0.0,  0.0,  1.0]),
    v([-1.0,  1.0,  1.0], [ 0.0,  0.0,  1.0]),
    // back
    v([-1.0, -1.0, -1.0], [ 0.0,  0.0, -1.0]),
    v([ 1.0,  1.0, -1.0], [ 0.0,  0.0, -1.0]),
    v([ 1.0, -1.0, -1.0], [ 0.0,  0.0, -1.0]),
    v([-1.0, -1.0, -1.0], [ 0.0,  0.0, -1.0]),
    v([-1.0,  1.0, -1.0], [ 0.0,  0.0, -1.0]),
    v([ 1.0,  1.0, -1.0], [ 0.0,  0.0, -1.0]),
    // left
    v([-1.0, -1.0, -1.0], [-1.0,  0.0,  0.0]),
    v([-1.0, -1.0,  1.0], [-1.0,  0.0,  0.0]),
    v([-1.0,  1.0,  1.0], [-1.0,  0.0,  0.0]),
    v([-1.0, -1.0, -1.0], [-1.0,  0.0,  0.0]),
    v([-1.0,  1.0,  1.0], [-1.0,  0.0,  0.0]),
    v([-1.0,  1.0, -1.0], [-1.0,  0.0,  0.0]),
    // right
    v([ 1.0, -1.0, -1.0], [ 1.0,  0.0,  0.0]),
    v([ 1.0,  1.0,  1.0], [ 1.0,  0.0,  0.0]),
    v([ 1.0, -1.0,  1.0], [ 1.0,  0.0,  0.0]),
    v([ 1.0, -1.0, -1.0], [ 1.0,  0.0,  0.0]),
    v([ 1.0,  1.0, -1.0], [ 1.0,  0.0,  0.0]),
    v([ 1.0,  1.0,  1.0], [ 1.0,  0.0,  0.0]),
    // top
    v([-1.0,  1.0, -1.0], [ 0.0,  1.0,  0.0]),
    v([-1.0,  1.0,  1.0], [ 0.0,  1.0,  0.0]),
    v([ 1.0,  1.0,  1.0], [ 0.0,  1.0,  0.0]),
    v([-1.0,  1.0, -1.0], [ 0.0,  1.0,  0.0]),
    v([ 1.0,  1.0,  1.0], [ 0.0,  1.0,  0.0]),
    v([ 1.0,  1.0, -1.0], [ 0.0,  1.0,  0.0]),
    // bottom
    v([-1.0, -1.0, -1.0], [ 0.0, -1.0,  0.0]),
    v([ 1.0, -1.0,  1.0], [ 0.0, -1.0,  0.0]),
    v([-1.0, -1.0,  1.0], [ 0.0, -1.0,  0.0]),
    v([-1.0, -1.0, -1.0], [ 0.0, -1.0,  0.0]),
    v([ 1.0, -1.0, -1.0], [ 0.0, -1.0,  0.0]),
    v([ 1.0, -1.0,  1.0], [ 0.0, -1.0,  0.0]),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn vertex_is_24_bytes_with_normal_at_12() {
        assert_eq!(Vertex::STRIDE, 24);
        let attrs = Vertex::attributes(0, 1);
        assert_eq!(attrs[0].offset, 0);
        assert_eq!(attrs[1].offset, 12);
        assert_eq!(attrs[1].shader_location, 1);
    }

    #[test]
    fn buffer_holds_216_floats() {
        let floats: &[f32] = bytemuck::cast_slice(&CUBE_VERTICES);
        assert_eq!(CUBE_VERTICES.len(), 36);
        assert_eq!(floats.len(), 216);
        assert_eq!(CUBE_VERTICES.len() / 3, 12);
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn normals_are_unit_axes() {
        for vert in &CUBE_VERTICES {
            assert_eq!(dot(vert.normal, vert.normal), 1.0);
            assert_eq!(vert.normal.iter().filter(|c| **c != 0.0).count(), 1);
        }
    }

    #[test]
    fn every_vertex_lies_on_its_face() {
        for vert in &CUBE_VERTICES {
            assert_eq!(dot(vert.position, vert.normal), 1.0);
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        for tri in CUBE_VERTICES.chunks_exact(3) {
            let n = cross(
                sub(tri[1].position, tri[0].position),
                sub(tri[2].position, tri[0].position),
            );
            assert!(dot(n, tri[0].normal) > 0.0, "{tri:?}");
        }
    }

    #[test]
    fn six_faces_two_triangles_each() {
        for face in CUBE_VERTICES.chunks_exact(6) {
            let normal = face[0].normal;
            assert!(face.iter().all(|v| v.normal == normal));
            // Two triangles covering the full 2×2 face.
            let area: f32 = face
                .chunks_exact(3)
                .map(|t| {
                    let c = cross(sub(t[1].position, t[0].position), sub(t[2].position, t[0].position));
                    dot(c, c).sqrt() * 0.5
                })
                .sum();
            assert_eq!(area, 4.0);
        }
        let distinct: std::collections::HashSet<_> = CUBE_VERTICES
            .chunks_exact(6)
            .map(|f| f[0].normal.map(|c| c as i32))
            .collect();
        assert_eq!(distinct.len(), 6);
    }
}
