//! Scene graph tests
//!
//! Tests for:
//! - Prefab instantiation (roots, parent links, order)
//! - Traversal order and tag/name queries
//! - attach: cycle and self-attachment rejection
//! - Interactive ancestor resolution and hierarchy visibility
//! - World matrix propagation and world bounds

use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

use diorama::errors::DioramaError;
use diorama::scene::{InteractiveTarget, Node, NodeTags, Prefab, PrefabNode, Scene, TargetId};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

/// root
/// ├── a
/// │   └── a1
/// └── b
fn small_prefab() -> Prefab {
    let mut prefab = Prefab::with_root(PrefabNode::group("root"));
    let a = prefab.add_child(0, PrefabNode::group("a").at(Vec3::new(1.0, 0.0, 0.0)));
    prefab.add_child(a, PrefabNode::group("a1").at(Vec3::new(0.0, 2.0, 0.0)));
    prefab.add_child(0, PrefabNode::group("b").tagged(NodeTags::WATER));
    prefab
}

fn names(scene: &Scene) -> Vec<String> {
    scene.traverse_all().map(|(_, n)| n.name.to_string()).collect()
}

// ============================================================================
// Instantiation
// ============================================================================

#[test]
fn insert_root_links_parents_and_children() {
    let mut scene = Scene::new();
    let roots = scene.insert_root(small_prefab()).unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(scene.root_nodes, roots);
    assert_eq!(scene.len(), 4);

    let root = scene.get_node(roots[0]).unwrap();
    assert_eq!(root.children().len(), 2);
    for &child in root.children() {
        assert_eq!(scene.get_node(child).unwrap().parent(), Some(roots[0]));
    }
}

#[test]
fn insert_under_parent_keeps_single_root() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("parent"));
    let roots = scene.insert(parent, small_prefab()).unwrap();

    assert_eq!(scene.root_nodes, vec![parent]);
    assert_eq!(scene.get_node(roots[0]).unwrap().parent(), Some(parent));
}

#[test]
fn insert_under_unknown_parent_fails() {
    let mut other = Scene::new();
    let stranger = other.add_node(Node::new("stranger"));

    let mut scene = Scene::new();
    let err = scene.insert(stranger, small_prefab()).unwrap_err();
    assert!(matches!(err, DioramaError::InvalidAttach(_)));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn traversal_is_depth_first_pre_order() {
    let mut scene = Scene::new();
    scene.insert_root(small_prefab()).unwrap();
    scene.add_node(Node::new("second_root"));
    assert_eq!(names(&scene), ["root", "a", "a1", "b", "second_root"]);
}

#[test]
fn traversal_is_stable_across_calls() {
    let mut scene = Scene::new();
    scene.insert_root(small_prefab()).unwrap();
    assert_eq!(names(&scene), names(&scene));
}

#[test]
fn find_by_tag_and_name() {
    let mut scene = Scene::new();
    scene.insert_root(small_prefab()).unwrap();

    let water: Vec<_> = scene.find_all_by_tag(NodeTags::WATER).collect();
    assert_eq!(water.len(), 1);
    assert_eq!(water[0].1.name, "b");

    let a = scene.find_by_name("a").unwrap();
    assert!(scene.find_by_name_in_subtree(a, "a1").is_some());
    assert!(scene.find_by_name_in_subtree(a, "b").is_none());
    assert!(scene.find_by_name("missing").is_none());
}

// ============================================================================
// attach
// ============================================================================

#[test]
fn attach_rejects_self_and_cycles() {
    let mut scene = Scene::new();
    scene.insert_root(small_prefab()).unwrap();
    let root = scene.find_by_name("root").unwrap();
    let a1 = scene.find_by_name("a1").unwrap();

    assert!(scene.attach(root, root).is_err());
    assert!(scene.attach(root, a1).is_err());
    // Tree unchanged after the rejected edits.
    assert_eq!(names(&scene), ["root", "a", "a1", "b"]);
}

#[test]
fn attach_moves_root_under_parent() {
    let mut scene = Scene::new();
    let first = scene.add_node(Node::new("first"));
    let second = scene.add_node(Node::new("second"));

    scene.attach(second, first).unwrap();
    assert_eq!(scene.root_nodes, vec![first]);
    assert_eq!(scene.get_node(first).unwrap().children(), &[second]);
}

// ============================================================================
// Interactive targets & visibility
// ============================================================================

#[test]
fn interactive_ancestor_resolves_through_parents() {
    let mut prefab = Prefab::with_root(
        PrefabNode::group("merchant").interactive(InteractiveTarget::new(TargetId::MERCHANT)),
    );
    let torso = prefab.add_child(0, PrefabNode::group("torso"));
    prefab.add_child(torso, PrefabNode::group("arm"));

    let mut scene = Scene::new();
    scene.insert_root(prefab).unwrap();
    scene.add_node(Node::new("bystander"));

    let merchant = scene.find_by_name("merchant").unwrap();
    let arm = scene.find_by_name("arm").unwrap();
    let bystander = scene.find_by_name("bystander").unwrap();

    assert_eq!(scene.interactive_ancestor(arm), Some(merchant));
    assert_eq!(scene.interactive_ancestor(merchant), Some(merchant));
    assert_eq!(scene.interactive_ancestor(bystander), None);
}

#[test]
fn hidden_ancestor_hides_subtree() {
    let mut scene = Scene::new();
    scene.insert_root(small_prefab()).unwrap();
    let a = scene.find_by_name("a").unwrap();
    let a1 = scene.find_by_name("a1").unwrap();
    let b = scene.find_by_name("b").unwrap();

    scene.get_node_mut(a).unwrap().visible = false;
    assert!(!scene.is_visible_in_hierarchy(a1));
    assert!(scene.is_visible_in_hierarchy(b));
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn world_matrices_compose_down_the_tree() {
    let mut scene = Scene::new();
    scene.insert_root(small_prefab()).unwrap();
    let root = scene.find_by_name("root").unwrap();
    scene.get_node_mut(root).unwrap().transform.rotation = Quat::from_rotation_z(FRAC_PI_2);
    scene.update_matrix_world();

    let a1 = scene.find_by_name("a1").unwrap();
    let world = scene.get_node(a1).unwrap().transform.world_position();
    // Local (1, 2, 0) rotated a quarter turn about Z.
    assert!(vec3_approx(world, Vec3::new(-2.0, 1.0, 0.0)), "got {world:?}");
}

#[test]
fn moving_a_parent_moves_children_after_update() {
    let mut scene = Scene::new();
    scene.insert_root(small_prefab()).unwrap();
    scene.update_matrix_world();

    let root = scene.find_by_name("root").unwrap();
    let b = scene.find_by_name("b").unwrap();
    scene.get_node_mut(root).unwrap().transform.position = Vec3::new(0.0, 5.0, 0.0);
    scene.update_matrix_world();

    assert!(vec3_approx(
        scene.get_node(b).unwrap().transform.world_position(),
        Vec3::new(0.0, 5.0, 0.0)
    ));
}

// ============================================================================
// Malformed prefabs
// ============================================================================

#[test]
fn prefab_with_shared_child_is_rejected() {
    let mut prefab = small_prefab();
    // "a1" listed under both "a" and the root.
    prefab.nodes[0].children_indices.push(2);

    let mut scene = Scene::new();
    let err = scene.insert_root(prefab).unwrap_err();
    assert!(matches!(err, DioramaError::InvalidAttach(_)));
    assert!(scene.is_empty());
}

#[test]
fn prefab_with_orphan_is_rejected() {
    let mut prefab = small_prefab();
    prefab.nodes.push(PrefabNode::group("orphan"));

    let mut scene = Scene::new();
    assert!(scene.insert_root(prefab).is_err());
}
