use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::resources::geometry::MeshData;

pub struct CylinderOptions {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub open_ended: bool,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 1.0,
            radial_segments: 32,
            open_ended: false,
        }
    }
}

/// Cylinder (or cone frustum) along +Y, centred on the origin.
#[must_use]
pub fn create_cylinder(options: &CylinderOptions) -> MeshData {
    let segments = options.radial_segments.max(3);
    let half_height = options.height / 2.0;
    let slope = (options.radius_bottom - options.radius_top) / options.height;

    let mut mesh = MeshData::default();

    // Torso: a top ring (v = 0) and a bottom ring (v = 1)
    for (row, radius) in [options.radius_top, options.radius_bottom].into_iter().enumerate() {
        let v = row as f32;
        for x in 0..=segments {
            let u = x as f32 / segments as f32;
            let theta = u * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.positions
                .push(Vec3::new(radius * sin, half_height - v * options.height, radius * cos));
            mesh.normals.push(Vec3::new(sin, slope, cos).normalize());
            mesh.uvs.push(Vec2::new(u, 1.0 - v));
        }
    }
    let stride = segments + 1;
    for x in 0..segments {
        let a = x;
        let b = stride + x;
        let c = stride + x + 1;
        let d = x + 1;
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    if !options.open_ended {
        if options.radius_top > 0.0 {
            push_cap(&mut mesh, segments, options.radius_top, half_height, true);
        }
        if options.radius_bottom > 0.0 {
            push_cap(&mut mesh, segments, options.radius_bottom, -half_height, false);
        }
    }

    mesh
}

fn push_cap(mesh: &mut MeshData, segments: u32, radius: f32, y: f32, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };
    let center = mesh.positions.len() as u32;
    mesh.positions.push(Vec3::new(0.0, y, 0.0));
    mesh.normals.push(Vec3::Y * sign);
    mesh.uvs.push(Vec2::splat(0.5));

    for x in 0..=segments {
        let theta = x as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.positions.push(Vec3::new(radius * sin, y, radius * cos));
        mesh.normals.push(Vec3::Y * sign);
        mesh.uvs.push(Vec2::new(sin * 0.5 + 0.5, cos * 0.5 * sign + 0.5));
    }

    for x in 0..segments {
        let i = center + 1 + x;
        if top {
            mesh.indices.extend_from_slice(&[i, i + 1, center]);
        } else {
            mesh.indices.extend_from_slice(&[i + 1, i, center]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_ended_has_no_caps() {
        let closed = create_cylinder(&CylinderOptions::default());
        let open = create_cylinder(&CylinderOptions {
            open_ended: true,
            ..Default::default()
        });
        assert_eq!(open.triangle_count(), 64);
        assert_eq!(closed.triangle_count(), 128);
    }

    #[test]
    fn cone_skips_top_cap() {
        let cone = create_cylinder(&CylinderOptions {
            radius_top: 0.0,
            radial_segments: 8,
            ..Default::default()
        });
        assert_eq!(cone.triangle_count(), 16 + 8);
    }
}
