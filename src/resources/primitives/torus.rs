use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::resources::geometry::MeshData;

pub struct TorusOptions {
    /// Distance from the torus centre to the tube centre.
    pub radius: f32,
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    /// Swept angle; `PI` gives the half ring used for arches.
    pub arc: f32,
}

impl Default for TorusOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.4,
            radial_segments: 12,
            tubular_segments: 48,
            arc: TAU,
        }
    }
}

/// Ring lying in the XY plane around the Z axis.
#[must_use]
pub fn create_torus(options: &TorusOptions) -> MeshData {
    let radial = options.radial_segments.max(3);
    let tubular = options.tubular_segments.max(3);

    let mut mesh = MeshData::default();

    for j in 0..=radial {
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * options.arc;
            let v = j as f32 / radial as f32 * TAU;

            let ring = options.radius + options.tube * v.cos();
            let position = Vec3::new(ring * u.cos(), ring * u.sin(), options.tube * v.sin());
            let center = Vec3::new(options.radius * u.cos(), options.radius * u.sin(), 0.0);

            mesh.positions.push(position);
            mesh.normals.push((position - center).normalize_or_zero());
            mesh.uvs
                .push(Vec2::new(i as f32 / tubular as f32, j as f32 / radial as f32));
        }
    }

    let stride = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_arc_stays_above_x_axis() {
        let arch = create_torus(&TorusOptions {
            radius: 2.0,
            tube: 0.4,
            radial_segments: 8,
            tubular_segments: 24,
            arc: std::f32::consts::PI,
        });
        assert!(arch.positions.iter().all(|p| p.y >= -1e-4));
        let bounds = arch.bounding_box().unwrap();
        assert!((bounds.max.x - 2.4).abs() < 1e-4);
    }
}
