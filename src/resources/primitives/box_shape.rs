use glam::{Vec2, Vec3};

use crate::resources::geometry::MeshData;

/// One face: outward normal, and the two in-plane axes spanning it.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
];

#[must_use]
pub fn create_box(width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vec3::new(width, height, depth) / 2.0;

    // 24 vertices (4 per face) so every face keeps its own normal and UVs
    let mut mesh = MeshData::default();
    for (normal, u_axis, v_axis) in FACES {
        let base = mesh.positions.len() as u32;
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        for (u, v) in corners {
            let p = (normal + u_axis * u + v_axis * v) * half;
            mesh.positions.push(p);
            mesh.normals.push(normal);
            mesh.uvs.push(Vec2::new((u + 1.0) / 2.0, (1.0 - v) / 2.0));
        }
        // 2 triangles per face, counter-clockwise
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_24_vertices_and_12_triangles() {
        let mesh = create_box(4.0, 18.0, 4.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let bounds = mesh.bounding_box().unwrap();
        assert_eq!(bounds.max, Vec3::new(2.0, 9.0, 2.0));
    }

    #[test]
    fn faces_wind_outward() {
        let mesh = create_box(1.0, 1.0, 1.0);
        for (tri, n) in mesh.triangles().zip(mesh.indices.chunks_exact(3)) {
            let face_normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize();
            assert!(face_normal.dot(mesh.normals[n[0] as usize]) > 0.99);
        }
    }
}
