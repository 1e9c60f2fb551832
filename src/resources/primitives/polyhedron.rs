use glam::{Vec2, Vec3};

use crate::resources::geometry::MeshData;

const PHI: f32 = 1.618_034;
const INV_PHI: f32 = 1.0 / PHI;

#[rustfmt::skip]
const DODECAHEDRON_VERTICES: [[f32; 3]; 20] = [
    [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0],
    [0.0, -INV_PHI, -PHI], [0.0, -INV_PHI, PHI], [0.0, INV_PHI, -PHI], [0.0, INV_PHI, PHI],
    [-INV_PHI, -PHI, 0.0], [-INV_PHI, PHI, 0.0], [INV_PHI, -PHI, 0.0], [INV_PHI, PHI, 0.0],
    [-PHI, 0.0, -INV_PHI], [PHI, 0.0, -INV_PHI], [-PHI, 0.0, INV_PHI], [PHI, 0.0, INV_PHI],
];

/// Twelve pentagons, three triangles each.
#[rustfmt::skip]
const DODECAHEDRON_INDICES: [u32; 108] = [
    3, 11, 7, 3, 7, 15, 3, 15, 13,
    7, 19, 17, 7, 17, 6, 7, 6, 15,
    17, 4, 8, 17, 8, 10, 17, 10, 6,
    8, 0, 16, 8, 16, 2, 8, 2, 10,
    0, 12, 1, 0, 1, 18, 0, 18, 16,
    6, 10, 2, 6, 2, 13, 6, 13, 15,
    2, 16, 18, 2, 18, 3, 2, 3, 13,
    18, 1, 9, 18, 9, 11, 18, 11, 3,
    4, 14, 12, 4, 12, 0, 4, 0, 8,
    11, 9, 5, 11, 5, 19, 11, 19, 7,
    19, 5, 14, 19, 14, 4, 19, 4, 17,
    1, 12, 14, 1, 14, 5, 1, 5, 9,
];

/// Flat-shaded dodecahedron inscribed in a sphere of `radius`.
#[must_use]
pub fn create_dodecahedron(radius: f32) -> MeshData {
    let vertex = |i: u32| Vec3::from_array(DODECAHEDRON_VERTICES[i as usize]).normalize() * radius;

    let mut mesh = MeshData::default();
    for tri in DODECAHEDRON_INDICES.chunks_exact(3) {
        let [a, b, c] = [vertex(tri[0]), vertex(tri[1]), vertex(tri[2])];
        let mut normal = (b - a).cross(c - a).normalize_or_zero();
        // keep the face normal pointing away from the centre whatever the winding
        if normal.dot(a + b + c) < 0.0 {
            normal = -normal;
        }
        let base = mesh.positions.len() as u32;
        for p in [a, b, c] {
            mesh.positions.push(p);
            mesh.normals.push(normal);
            let n = p / radius;
            mesh.uvs.push(Vec2::new(
                0.5 + n.z.atan2(-n.x) / std::f32::consts::TAU,
                0.5 - n.y.asin() / std::f32::consts::PI,
            ));
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_lie_on_circumscribed_sphere() {
        let mesh = create_dodecahedron(0.8);
        assert_eq!(mesh.triangle_count(), 36);
        for p in &mesh.positions {
            assert!((p.length() - 0.8).abs() < 1e-4);
        }
    }
}
