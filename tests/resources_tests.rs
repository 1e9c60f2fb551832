//! Resource tests
//!
//! Tests for:
//! - PrimitiveCatalog: completeness, shared identity, label lookup
//! - Shared textures: one water texture, scroll wrap
//! - Shape validation and tessellation bounds
//! - Geometry ray tests in local space

use std::sync::Arc;

use glam::{Vec2, Vec3};

use diorama::errors::DioramaError;
use diorama::resources::{
    AppearanceRole, CanvasTextureSource, Geometry, PrimitiveCatalog, QuadraticBezier, Ray, Shape, TextureKind,
};

fn catalog() -> PrimitiveCatalog {
    PrimitiveCatalog::standard(&CanvasTextureSource, 42).unwrap()
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn catalog_returns_same_appearance_for_every_role() {
    let catalog = catalog();
    for role in AppearanceRole::ALL {
        let first = catalog.get(role);
        let second = catalog.get(role);
        assert!(Arc::ptr_eq(&first, &second), "{role:?} not shared");
        assert_eq!(first.role, role);
    }
}

#[test]
fn catalog_iterates_every_role_once() {
    let catalog = catalog();
    assert_eq!(catalog.iter().count(), AppearanceRole::ALL.len());
}

#[test]
fn lookup_by_label_and_unknown_label() {
    let catalog = catalog();
    let clay = catalog.lookup("clay").unwrap();
    assert!(Arc::ptr_eq(&clay, &catalog.get(AppearanceRole::Clay)));

    let err = catalog.lookup("marble").unwrap_err();
    assert_eq!(err, DioramaError::UnknownRole("marble".to_string()));
}

#[test]
fn water_texture_is_shared_through_the_water_role() {
    let catalog = catalog();
    let water = catalog.get(AppearanceRole::Water);
    let texture = water.texture.as_ref().expect("water is textured");
    let by_kind = catalog.texture(TextureKind::Water).unwrap();
    assert!(Arc::ptr_eq(texture, &by_kind));

    // Scrolling through one handle is visible through the other.
    texture.scroll(Vec2::new(0.0, -0.25));
    assert!((by_kind.offset().y - 0.75).abs() < 1e-5);
}

// ============================================================================
// Shapes
// ============================================================================

#[test]
fn invalid_dimensions_are_rejected_with_context() {
    let err = Shape::cuboid(4.0, -1.0, 4.0).validate("minaret").unwrap_err();
    assert_eq!(
        err,
        DioramaError::InvalidParameter {
            feature: "minaret",
            parameter: "height",
            value: -1.0,
        }
    );
    assert!(Shape::sphere(f32::NAN, 8).validate("moon").is_err());
    assert!(Shape::cone(1.0, 2.0, 8).validate("lid").is_ok());
}

#[test]
fn tessellations_stay_within_their_dimensions() {
    let curve = QuadraticBezier {
        start: Vec3::new(-8.0, 14.0, -6.0),
        control: Vec3::new(0.0, 10.0, 0.0),
        end: Vec3::new(8.0, 12.0, 8.0),
    };
    let cases = [
        (Shape::cuboid(4.0, 18.0, 4.0), Vec3::new(2.0, 9.0, 2.0)),
        (Shape::sphere(0.35, 16), Vec3::splat(0.35)),
        (Shape::cylinder(1.5, 2.0, 2.5, 4), Vec3::new(2.0, 1.25, 2.0)),
        (Shape::torus(0.6, 0.15, 8, 24), Vec3::new(0.75, 0.75, 0.15)),
        (Shape::Plane { width: 4.0, height: 2.7 }, Vec3::new(2.0, 1.35, 0.0)),
        (Shape::Circle { radius: 1.6, segments: 32 }, Vec3::new(1.6, 1.6, 0.0)),
        (Shape::Dodecahedron { radius: 0.8 }, Vec3::splat(0.8)),
        (
            Shape::ExtrudedStar {
                points: 5,
                outer_radius: 0.5,
                inner_radius: 0.2,
                depth: 0.1,
            },
            Vec3::new(0.5, 0.5, 0.1),
        ),
    ];

    for (shape, half) in cases {
        let mesh = shape.tessellate();
        assert!(mesh.triangle_count() > 0, "{} produced no triangles", shape.name());
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
        for p in &mesh.positions {
            assert!(
                p.abs().cmple(half + Vec3::splat(1e-4)).all(),
                "{} vertex {p:?} outside {half:?}",
                shape.name()
            );
        }
    }

    let tube = Shape::Tube {
        curve,
        tubular_segments: 20,
        radius: 0.03,
        radial_segments: 8,
    }
    .tessellate();
    assert!(tube.triangle_count() > 0);
}

#[test]
fn geometry_raycast_hits_box_face() {
    let geometry = Geometry::new(Shape::cuboid(2.0, 2.0, 2.0));
    let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
    let t = geometry.raycast(&ray).expect("hit");
    assert!((t - 9.0).abs() < 1e-4);

    let miss = Ray::new(Vec3::new(3.0, 0.0, 10.0), -Vec3::Z);
    assert!(geometry.raycast(&miss).is_none());
}

#[test]
fn bounding_sphere_encloses_mesh() {
    let geometry = Geometry::new(Shape::cylinder(0.6, 0.9, 6.0, 16));
    let sphere = geometry.bounding_sphere();
    for p in &geometry.mesh().positions {
        assert!(p.distance(sphere.center) <= sphere.radius + 1e-4);
    }
}
