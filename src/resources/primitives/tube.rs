use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::resources::geometry::{MeshData, QuadraticBezier};

/// Tube of constant `radius` swept along `curve` with parallel-transported
/// frames, so the cross-section does not twist.
#[must_use]
pub fn create_tube(curve: &QuadraticBezier, tubular_segments: u32, radius: f32, radial_segments: u32) -> MeshData {
    let tubular = tubular_segments.max(1);
    let radial = radial_segments.max(3);

    let first_tangent = curve.tangent(0.0);
    let seed_axis = if first_tangent.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let mut normal = first_tangent.cross(seed_axis).normalize_or_zero();

    let mut mesh = MeshData::default();
    for i in 0..=tubular {
        let t = i as f32 / tubular as f32;
        let point = curve.point(t);
        let tangent = curve.tangent(t);

        normal = (normal - tangent * normal.dot(tangent)).normalize_or_zero();
        let binormal = tangent.cross(normal);

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let (sin, cos) = v.sin_cos();
            let dir = normal * cos + binormal * sin;
            mesh.positions.push(point + dir * radius);
            mesh.normals.push(dir);
            mesh.uvs.push(Vec2::new(t, j as f32 / radial as f32));
        }
    }

    let stride = radial + 1;
    for i in 1..=tubular {
        for j in 1..=radial {
            let a = stride * (i - 1) + (j - 1);
            let b = stride * i + (j - 1);
            let c = stride * i + j;
            let d = stride * (i - 1) + j;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    mesh
}
