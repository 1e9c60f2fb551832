//! Interaction router tests
//!
//! Tests for:
//! - Pixel → NDC mapping
//! - pick: hit, miss, hit without interactive ancestor
//! - Non-interactive geometry in front does not occlude
//! - Hidden targets are skipped
//! - Resize idempotence

use std::sync::Arc;

use glam::{Vec2, Vec3};

use diorama::interaction::{InteractionRouter, Viewport};
use diorama::resources::{Appearance, AppearanceRole, Geometry, Mesh, Shape};
use diorama::scene::{Camera, CameraPose, InteractiveTarget, Prefab, PrefabNode, Scene, TargetId};

// ============================================================================
// Helper
// ============================================================================

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

fn cube(size: f32) -> Mesh {
    Mesh::new(
        Arc::new(Geometry::new(Shape::cuboid(size, size, size))),
        Arc::new(Appearance::basic(AppearanceRole::Clay, 0xcc7a5c)),
    )
}

fn camera() -> Camera {
    let mut camera = Camera::new_perspective(38.0, WIDTH / HEIGHT, 0.1, 1000.0);
    camera.set_pose(CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO));
    camera
}

fn router() -> InteractionRouter {
    InteractionRouter::new(Viewport::new(WIDTH, HEIGHT))
}

/// A merchant-like target at the origin: interactive group with one body mesh.
fn target_prefab() -> Prefab {
    let target = InteractiveTarget::new(TargetId::MERCHANT).with_reaction_part("body");
    let mut prefab = Prefab::with_root(PrefabNode::group("target").interactive(target));
    prefab.add_child(0, PrefabNode::mesh("body", cube(2.0)));
    prefab
}

fn scene_with(prefabs: Vec<Prefab>) -> Scene {
    let mut scene = Scene::new();
    for prefab in prefabs {
        scene.insert_root(prefab).unwrap();
    }
    scene.update_matrix_world();
    scene
}

// ============================================================================
// Viewport
// ============================================================================

#[test]
fn pixels_map_to_ndc() {
    let viewport = Viewport::new(WIDTH, HEIGHT);
    assert_eq!(viewport.to_ndc(400.0, 300.0), Vec2::ZERO);
    assert_eq!(viewport.to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
    assert_eq!(viewport.to_ndc(800.0, 600.0), Vec2::new(1.0, -1.0));
}

#[test]
fn resize_is_idempotent_and_ignores_degenerate_sizes() {
    let mut router = router();
    assert!(!router.resize(WIDTH, HEIGHT));
    assert!(router.resize(1024.0, 768.0));
    assert!(!router.resize(1024.0, 768.0));
    assert!(!router.resize(0.0, 768.0));
    assert!(!router.resize(f32::NAN, 768.0));
    assert_eq!(router.viewport(), Viewport::new(1024.0, 768.0));
}

// ============================================================================
// Picking
// ============================================================================

#[test]
fn pick_hits_the_target_under_the_cursor() {
    let scene = scene_with(vec![target_prefab()]);
    let router = router();

    let target = router.pick(400.0, 300.0, &camera(), &scene).expect("centre ray hits");
    assert_eq!(target.id, TargetId::MERCHANT);

    let hit = router.pick_hit(400.0, 300.0, &camera(), &scene).unwrap();
    assert!((hit.distance - 9.0).abs() < 1e-3);
    assert_eq!(scene.get_node(hit.node).unwrap().name, "body");
    assert_eq!(scene.get_node(hit.target_node).unwrap().name, "target");
}

#[test]
fn pick_misses_empty_space() {
    let scene = scene_with(vec![target_prefab()]);
    assert!(router().pick(5.0, 5.0, &camera(), &scene).is_none());
    assert!(!router().hover(5.0, 5.0, &camera(), &scene));
    assert!(router().hover(400.0, 300.0, &camera(), &scene));
}

#[test]
fn empty_scene_has_no_target() {
    let scene = Scene::new();
    assert!(router().pick(400.0, 300.0, &camera(), &scene).is_none());
}

#[test]
fn geometry_without_interactive_ancestor_is_no_target() {
    let plain = Prefab::with_root(PrefabNode::mesh("crate", cube(2.0)));
    let scene = scene_with(vec![plain]);
    assert!(router().pick(400.0, 300.0, &camera(), &scene).is_none());
}

#[test]
fn decoration_in_front_does_not_occlude() {
    let wall = Prefab::with_root(PrefabNode::mesh("wall", cube(3.0)).at(Vec3::new(0.0, 0.0, 5.0)));
    let scene = scene_with(vec![wall, target_prefab()]);

    let hit = router().pick_hit(400.0, 300.0, &camera(), &scene).expect("target behind wall");
    assert_eq!(hit.target.id, TargetId::MERCHANT);
    assert!((hit.distance - 9.0).abs() < 1e-3);
}

#[test]
fn nearest_of_two_targets_wins() {
    let mut far = Prefab::with_root(
        PrefabNode::group("far")
            .at(Vec3::new(0.0, 0.0, -5.0))
            .interactive(InteractiveTarget::new(TargetId::new("far"))),
    );
    far.add_child(0, PrefabNode::mesh("far_body", cube(2.0)));

    let scene = scene_with(vec![far, target_prefab()]);
    let target = router().pick(400.0, 300.0, &camera(), &scene).unwrap();
    assert_eq!(target.id, TargetId::MERCHANT);
}

#[test]
fn hidden_target_is_skipped() {
    let mut scene = scene_with(vec![target_prefab()]);
    let target = scene.find_by_name("target").unwrap();
    scene.get_node_mut(target).unwrap().visible = false;
    assert!(router().pick(400.0, 300.0, &camera(), &scene).is_none());
}

#[test]
fn scaled_and_moved_targets_are_hit_in_world_space() {
    let mut prefab = target_prefab();
    if let Some(root) = prefab.root_mut() {
        root.transform.position = Vec3::new(2.0, 0.0, 0.0);
        root.transform.scale = Vec3::splat(0.5);
    }
    let scene = scene_with(vec![prefab]);
    let camera = camera();

    // Project the moved centre back to pixels.
    let ndc = camera.project(Vec3::new(2.0, 0.0, 0.0));
    let x = (ndc.x + 1.0) / 2.0 * WIDTH;
    let y = (1.0 - ndc.y) / 2.0 * HEIGHT;

    let hit = router().pick_hit(x, y, &camera, &scene).expect("moved target");
    // Half-size cube: the ray meets the front face (z = 0.5) after 9.5 of
    // the 10 units it travels in depth towards the centre.
    let expected = Vec3::new(2.0, 0.0, 0.0).distance(Vec3::new(0.0, 0.0, 10.0)) * 0.95;
    assert!((hit.distance - expected).abs() < 1e-2, "{} vs {expected}", hit.distance);
}

#[test]
fn non_finite_pointer_positions_have_no_target() {
    let scene = scene_with(vec![target_prefab()]);
    assert!(router().pick(f32::NAN, 300.0, &camera(), &scene).is_none());
}
