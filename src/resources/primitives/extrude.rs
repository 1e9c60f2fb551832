use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::resources::geometry::MeshData;

/// A `points`-pointed star outline in the XY plane, extruded from z = 0 to
/// z = `depth`, without bevel.
#[must_use]
pub fn create_extruded_star(points: u32, outer_radius: f32, inner_radius: f32, depth: f32) -> MeshData {
    let points = points.max(2);
    let outline: Vec<Vec2> = (0..2 * points)
        .map(|i| {
            let angle = i as f32 * PI / points as f32;
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            Vec2::new(angle.cos(), angle.sin()) * r
        })
        .collect();
    let n = outline.len() as u32;

    let mut mesh = MeshData::default();

    // Caps: the star is star-shaped around its centre, so a fan suffices
    for (z, normal) in [(depth, Vec3::Z), (0.0, Vec3::NEG_Z)] {
        let center = mesh.positions.len() as u32;
        mesh.positions.push(Vec3::new(0.0, 0.0, z));
        mesh.normals.push(normal);
        mesh.uvs.push(Vec2::splat(0.5));
        for p in &outline {
            mesh.positions.push(p.extend(z));
            mesh.normals.push(normal);
            mesh.uvs.push(*p / (2.0 * outer_radius) + Vec2::splat(0.5));
        }
        for i in 0..n {
            let a = center + 1 + i;
            let b = center + 1 + (i + 1) % n;
            if normal.z > 0.0 {
                mesh.indices.extend_from_slice(&[center, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    // Walls: one quad per outline edge with its own flat normal
    for i in 0..outline.len() {
        let p0 = outline[i];
        let p1 = outline[(i + 1) % outline.len()];
        let edge = p1 - p0;
        let normal = Vec3::new(edge.y, -edge.x, 0.0).normalize_or_zero();
        let base = mesh.positions.len() as u32;
        for (p, z, u) in [(p0, 0.0, 0.0), (p1, 0.0, 1.0), (p1, depth, 1.0), (p0, depth, 0.0)] {
            mesh.positions.push(p.extend(z));
            mesh.normals.push(normal);
            mesh.uvs.push(Vec2::new(u, z / depth));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_point_star_counts() {
        let star = create_extruded_star(5, 0.5, 0.2, 0.1);
        // two fans of 10 + 10 wall quads
        assert_eq!(star.triangle_count(), 10 + 10 + 20);
        let bounds = star.bounding_box().unwrap();
        assert!((bounds.max.x - 0.5).abs() < 1e-5);
        assert!((bounds.max.z - 0.1).abs() < 1e-6);
    }
}
