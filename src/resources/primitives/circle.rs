use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::resources::geometry::MeshData;

/// Flat disc in the XY plane facing +Z.
#[must_use]
pub fn create_circle(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::default();

    mesh.positions.push(Vec3::ZERO);
    mesh.normals.push(Vec3::Z);
    mesh.uvs.push(Vec2::splat(0.5));

    for s in 0..=segments {
        let theta = s as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.positions.push(Vec3::new(radius * cos, radius * sin, 0.0));
        mesh.normals.push(Vec3::Z);
        mesh.uvs.push(Vec2::new((cos + 1.0) / 2.0, (sin + 1.0) / 2.0));
    }

    for i in 1..=segments {
        mesh.indices.extend_from_slice(&[i, i + 1, 0]);
    }

    mesh
}
