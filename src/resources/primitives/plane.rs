use glam::{Vec2, Vec3};

use crate::resources::geometry::MeshData;

/// Single quad in the XY plane facing +Z. Ground and water surfaces are
/// laid flat by rotating their node -90° around X.
#[must_use]
pub fn create_plane(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width / 2.0, height / 2.0);

    let corners = [
        (Vec3::new(-hw, hh, 0.0), Vec2::new(0.0, 1.0)),
        (Vec3::new(-hw, -hh, 0.0), Vec2::new(0.0, 0.0)),
        (Vec3::new(hw, -hh, 0.0), Vec2::new(1.0, 0.0)),
        (Vec3::new(hw, hh, 0.0), Vec2::new(1.0, 1.0)),
    ];

    let mut mesh = MeshData::default();
    for (position, uv) in corners {
        mesh.positions.push(position);
        mesh.normals.push(Vec3::Z);
        mesh.uvs.push(uv);
    }
    mesh.indices.extend_from_slice(&[0, 1, 3, 1, 2, 3]);
    mesh
}
