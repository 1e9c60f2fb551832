use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::resources::geometry::MeshData;

/// UV sphere. Rings run from the south pole (v = 1) to the north pole
/// (v = 0); each ring repeats its first vertex so the seam gets u = 1.
#[must_use]
pub fn create_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let columns = width_segments.max(3);
    let rings = height_segments.max(2);

    let mut mesh = MeshData::default();

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let (sin_lat, cos_lat) = (v * PI).sin_cos();

        for column in 0..=columns {
            let u = column as f32 / columns as f32;
            let (sin_lon, cos_lon) = (u * TAU).sin_cos();

            let normal = Vec3::new(-sin_lat * cos_lon, -cos_lat, sin_lat * sin_lon);
            mesh.positions.push(normal * radius);
            mesh.normals.push(normal);
            mesh.uvs.push(Vec2::new(u, 1.0 - v));
        }
    }

    // Pole quads collapse to zero-area triangles, which rays never hit.
    let stride = columns + 1;
    for ring in 0..rings {
        let lower = ring * stride;
        let upper = lower + stride;
        for column in 0..columns {
            let (a, b) = (lower + column, lower + column + 1);
            let (c, d) = (upper + column, upper + column + 1);
            mesh.indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }

    mesh
}
