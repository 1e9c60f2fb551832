//! Geometry descriptors, triangle meshes and ray queries.
//!
//! Scene nodes reference an `Arc<Geometry>`, which wraps an analytic
//! [`Shape`]. The triangle mesh is tessellated on first use and cached; the
//! render collaborator uploads it and the interaction router intersects it.

use std::sync::OnceLock;

use glam::{Affine3A, Vec2, Vec3};
use smallvec::SmallVec;

use crate::errors::{DioramaError, Result};
use crate::resources::primitives;

// ============================================================================
// Bounding volumes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn from_half_extents(half: Vec3) -> Self {
        Self { min: -half, max: half }
    }

    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Axis-aligned box enclosing this box after `matrix`.
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut new_min = Vec3::splat(f32::INFINITY);
        let mut new_max = Vec3::splat(f32::NEG_INFINITY);
        for point in corners {
            let transformed = matrix.transform_point3(point);
            new_min = new_min.min(transformed);
            new_max = new_max.max(transformed);
        }

        Self {
            min: new_min,
            max: new_max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere enclosing this one after an affine transform (conservative for
    /// non-uniform scale).
    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let center = matrix.transform_point3(self.center);
        let max_scale = matrix
            .matrix3
            .x_axis
            .length()
            .max(matrix.matrix3.y_axis.length())
            .max(matrix.matrix3.z_axis.length());
        Self {
            center,
            radius: self.radius * max_scale,
        }
    }
}

// ============================================================================
// Rays
// ============================================================================

/// A half-line `origin + t * direction`, `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Maps the ray through `matrix`. The direction is *not* renormalised so
    /// that parameters stay comparable between the two spaces.
    #[must_use]
    pub fn transformed(&self, matrix: &Affine3A) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }

    /// Entry distance into a sphere, if the ray touches it.
    #[must_use]
    pub fn intersect_sphere(&self, sphere: &BoundingSphere) -> Option<f32> {
        let oc = self.origin - sphere.center;
        let a = self.direction.length_squared();
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - sphere.radius * sphere.radius;
        let disc = b * b - a * c;
        if disc < 0.0 || a <= f32::EPSILON {
            return None;
        }
        let sqrt = disc.sqrt();
        let t0 = (-b - sqrt) / a;
        let t1 = (-b + sqrt) / a;
        if t1 < 0.0 {
            None
        } else {
            Some(t0.max(0.0))
        }
    }

    /// Möller–Trumbore, double sided.
    #[must_use]
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        const EPS: f32 = 1e-9;
        let e1 = b - a;
        let e2 = c - a;
        let p = self.direction.cross(e2);
        let det = e1.dot(p);
        if det.abs() < EPS {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(e1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = e2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }
}

// ============================================================================
// Mesh data
// ============================================================================

/// Indexed triangle list produced by the primitive generators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Nearest triangle hit along `ray`.
    #[must_use]
    pub fn raycast(&self, ray: &Ray) -> Option<f32> {
        self.triangles()
            .filter_map(|[a, b, c]| ray.intersect_triangle(a, b, c))
            .min_by(f32::total_cmp)
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.positions)
    }
}

// ============================================================================
// Shapes
// ============================================================================

/// Quadratic Bézier curve, used for the hanging lamp wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
}

impl QuadraticBezier {
    #[must_use]
    pub fn point(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    #[must_use]
    pub fn tangent(&self, t: f32) -> Vec3 {
        ((self.control - self.start) * (2.0 * (1.0 - t)) + (self.end - self.control) * (2.0 * t))
            .normalize_or_zero()
    }
}

/// Hashable identity of a [`Shape`]: its variant tag followed by the bit
/// patterns of its parameters.
pub type ShapeKey = SmallVec<[u32; 12]>;

/// Analytic description of a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Frustum of a cone along +Y, centred on the origin. A zero top radius
    /// gives a cone.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        open_ended: bool,
    },
    /// Ring in the XY plane.
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
        arc: f32,
    },
    /// Quad in the XY plane facing +Z.
    Plane { width: f32, height: f32 },
    /// Disc in the XY plane facing +Z.
    Circle { radius: f32, segments: u32 },
    Dodecahedron { radius: f32 },
    Tube {
        curve: QuadraticBezier,
        tubular_segments: u32,
        radius: f32,
        radial_segments: u32,
    },
    /// Star outline in the XY plane extruded along +Z.
    ExtrudedStar {
        points: u32,
        outer_radius: f32,
        inner_radius: f32,
        depth: f32,
    },
}

impl Shape {
    #[must_use]
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Box { width, height, depth }
    }

    #[must_use]
    pub fn sphere(radius: f32, segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments: segments,
            height_segments: segments,
        }
    }

    #[must_use]
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            open_ended: false,
        }
    }

    #[must_use]
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Self::cylinder(0.0, radius, height, radial_segments)
    }

    #[must_use]
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Self::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
            arc: std::f32::consts::TAU,
        }
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Sphere { .. } => "sphere",
            Self::Cylinder { .. } => "cylinder",
            Self::Torus { .. } => "torus",
            Self::Plane { .. } => "plane",
            Self::Circle { .. } => "circle",
            Self::Dodecahedron { .. } => "dodecahedron",
            Self::Tube { .. } => "tube",
            Self::ExtrudedStar { .. } => "extruded_star",
        }
    }

    /// Key under which identical shapes share one tessellation.
    #[must_use]
    pub fn cache_key(&self) -> ShapeKey {
        let mut key = ShapeKey::new();
        let mut push = |values: &[f32]| key.extend(values.iter().map(|v| v.to_bits()));
        match *self {
            Self::Box { width, height, depth } => push(&[0.0, width, height, depth]),
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
            } => push(&[1.0, radius, width_segments as f32, height_segments as f32]),
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
                open_ended,
            } => push(&[
                2.0,
                radius_top,
                radius_bottom,
                height,
                radial_segments as f32,
                f32::from(u8::from(open_ended)),
            ]),
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
                arc,
            } => push(&[3.0, radius, tube, radial_segments as f32, tubular_segments as f32, arc]),
            Self::Plane { width, height } => push(&[4.0, width, height]),
            Self::Circle { radius, segments } => push(&[5.0, radius, segments as f32]),
            Self::Dodecahedron { radius } => push(&[6.0, radius]),
            Self::Tube {
                curve,
                tubular_segments,
                radius,
                radial_segments,
            } => {
                push(&[7.0, tubular_segments as f32, radius, radial_segments as f32]);
                push(&curve.start.to_array());
                push(&curve.control.to_array());
                push(&curve.end.to_array());
            }
            Self::ExtrudedStar {
                points,
                outer_radius,
                inner_radius,
                depth,
            } => push(&[8.0, points as f32, outer_radius, inner_radius, depth]),
        }
        key
    }

    /// Rejects non-finite or non-positive dimensions.
    pub fn validate(&self, feature: &'static str) -> Result<()> {
        let positive = |parameter: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(DioramaError::InvalidParameter {
                    feature,
                    parameter,
                    value,
                })
            }
        };
        let non_negative = |parameter: &'static str, value: f32| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(DioramaError::InvalidParameter {
                    feature,
                    parameter,
                    value,
                })
            }
        };

        match *self {
            Self::Box { width, height, depth } => {
                positive("width", width)?;
                positive("height", height)?;
                positive("depth", depth)
            }
            Self::Sphere { radius, .. } | Self::Circle { radius, .. } | Self::Dodecahedron { radius } => {
                positive("radius", radius)
            }
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                non_negative("radius_top", radius_top)?;
                positive("radius_bottom", radius_bottom)?;
                positive("height", height)
            }
            Self::Torus { radius, tube, arc, .. } => {
                positive("radius", radius)?;
                positive("tube", tube)?;
                positive("arc", arc)
            }
            Self::Plane { width, height } => {
                positive("width", width)?;
                positive("height", height)
            }
            Self::Tube { radius, .. } => positive("radius", radius),
            Self::ExtrudedStar {
                points,
                outer_radius,
                inner_radius,
                depth,
            } => {
                positive("points", points as f32)?;
                positive("outer_radius", outer_radius)?;
                positive("inner_radius", inner_radius)?;
                positive("depth", depth)
            }
        }
    }

    /// Builds the triangle mesh for this shape.
    #[must_use]
    pub fn tessellate(&self) -> MeshData {
        match *self {
            Self::Box { width, height, depth } => primitives::create_box(width, height, depth),
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
            } => primitives::create_sphere(radius, width_segments, height_segments),
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
                open_ended,
            } => primitives::create_cylinder(&primitives::CylinderOptions {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
                open_ended,
            }),
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
                arc,
            } => primitives::create_torus(&primitives::TorusOptions {
                radius,
                tube,
                radial_segments,
                tubular_segments,
                arc,
            }),
            Self::Plane { width, height } => primitives::create_plane(width, height),
            Self::Circle { radius, segments } => primitives::create_circle(radius, segments),
            Self::Dodecahedron { radius } => primitives::create_dodecahedron(radius),
            Self::Tube {
                curve,
                tubular_segments,
                radius,
                radial_segments,
            } => primitives::create_tube(&curve, tubular_segments, radius, radial_segments),
            Self::ExtrudedStar {
                points,
                outer_radius,
                inner_radius,
                depth,
            } => primitives::create_extruded_star(points, outer_radius, inner_radius, depth),
        }
    }
}

/// A shape plus its lazily built mesh and bounds.
#[derive(Debug)]
pub struct Geometry {
    pub shape: Shape,
    mesh: OnceLock<MeshData>,
    bounds: OnceLock<(BoundingBox, BoundingSphere)>,
}

impl Geometry {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            mesh: OnceLock::new(),
            bounds: OnceLock::new(),
        }
    }

    /// Tessellated mesh, built on first access.
    pub fn mesh(&self) -> &MeshData {
        self.mesh.get_or_init(|| self.shape.tessellate())
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds().0
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounds().1
    }

    fn bounds(&self) -> (BoundingBox, BoundingSphere) {
        *self.bounds.get_or_init(|| {
            let mesh = self.mesh();
            let bbox = mesh.bounding_box().unwrap_or(BoundingBox {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
            });
            let center = bbox.center();
            let radius = mesh
                .positions
                .iter()
                .map(|p| p.distance(center))
                .fold(0.0_f32, f32::max);
            (bbox, BoundingSphere { center, radius })
        })
    }

    /// Local-space ray test: bounding sphere first, then triangles.
    #[must_use]
    pub fn raycast(&self, ray: &Ray) -> Option<f32> {
        ray.intersect_sphere(&self.bounding_sphere())?;
        self.mesh().raycast(ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_unit_box_front_face() {
        let geo = Geometry::new(Shape::cuboid(2.0, 2.0, 2.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let t = geo.raycast(&ray).expect("should hit");
        assert!((t - 9.0).abs() < 1e-4);
    }

    #[test]
    fn ray_parallel_miss() {
        let geo = Geometry::new(Shape::sphere(1.0, 16));
        let ray = Ray::new(Vec3::new(5.0, 0.0, 10.0), -Vec3::Z);
        assert!(geo.raycast(&ray).is_none());
    }

    #[test]
    fn bezier_endpoints() {
        let c = QuadraticBezier {
            start: Vec3::new(-8.0, 14.0, -6.0),
            control: Vec3::new(0.0, 10.0, 0.0),
            end: Vec3::new(8.0, 12.0, 8.0),
        };
        assert_eq!(c.point(0.0), c.start);
        assert_eq!(c.point(1.0), c.end);
        assert_eq!(c.point(0.5), Vec3::new(0.0, 11.5, 0.5));
    }

    #[test]
    fn cache_keys_separate_variants_and_sizes() {
        assert_eq!(Shape::sphere(0.3, 8).cache_key(), Shape::sphere(0.3, 8).cache_key());
        assert_ne!(Shape::sphere(0.3, 8).cache_key(), Shape::sphere(0.3, 16).cache_key());
        assert_ne!(
            Shape::Circle { radius: 1.0, segments: 8 }.cache_key(),
            Shape::Dodecahedron { radius: 1.0 }.cache_key()
        );
    }

    #[test]
    fn validation_rejects_non_positive_sizes() {
        assert!(Shape::cuboid(1.0, 0.0, 1.0).validate("test").is_err());
        assert!(Shape::cuboid(1.0, f32::NAN, 1.0).validate("test").is_err());
        assert!(Shape::cone(1.0, 2.0, 8).validate("test").is_ok());
    }
}
