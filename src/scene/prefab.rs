use std::borrow::Cow;

use glam::{Quat, Vec3};

use crate::resources::mesh::Mesh;
use crate::scene::light::Light;
use crate::scene::tags::{InteractiveTarget, Motion, NodeTags};
use crate::scene::transform::Transform;

/// Prefab node: plain data, children referenced by index.
#[derive(Debug, Clone)]
pub struct PrefabNode {
    pub name: Cow<'static, str>,
    pub transform: Transform,
    /// Indices into `Prefab::nodes`.
    pub children_indices: Vec<usize>,
    pub mesh: Option<Mesh>,
    pub light: Option<Light>,
    pub tags: NodeTags,
    pub motion: Option<Motion>,
    pub interactive: Option<InteractiveTarget>,
}

impl PrefabNode {
    /// A pure grouping node.
    #[must_use]
    pub fn group(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::new(),
            children_indices: Vec::new(),
            mesh: None,
            light: None,
            tags: NodeTags::empty(),
            motion: None,
            interactive: None,
        }
    }

    #[must_use]
    pub fn mesh(name: impl Into<Cow<'static, str>>, mesh: Mesh) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::group(name)
        }
    }

    #[must_use]
    pub fn light(name: impl Into<Cow<'static, str>>, light: Light) -> Self {
        Self {
            light: Some(light),
            ..Self::group(name)
        }
    }

    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    #[must_use]
    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// XYZ Euler rotation, radians.
    #[must_use]
    pub fn rotated_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.set_rotation_euler(x, y, z);
        self
    }

    #[must_use]
    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    #[must_use]
    pub fn tagged(mut self, tags: NodeTags) -> Self {
        self.tags |= tags;
        self
    }

    /// Attaches a motion payload and the tag it is dispatched on.
    #[must_use]
    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.tags |= motion.tag();
        self.motion = Some(motion);
        self
    }

    #[must_use]
    pub fn interactive(mut self, target: InteractiveTarget) -> Self {
        self.tags |= NodeTags::INTERACTIVE;
        self.interactive = Some(target);
        self
    }
}

/// Prefab: a detached subtree produced by the assembler.
///
/// A flat node list with index links. It holds no handles into any scene;
/// [`Scene::insert`](crate::scene::Scene::insert) turns it into live nodes.
#[derive(Debug, Clone, Default)]
pub struct Prefab {
    pub nodes: Vec<PrefabNode>,
    pub root_indices: Vec<usize>,
}

impl Prefab {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A prefab with a single root.
    #[must_use]
    pub fn with_root(root: PrefabNode) -> Self {
        let mut prefab = Self::new();
        prefab.add_root(root);
        prefab
    }

    pub fn add_root(&mut self, node: PrefabNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        self.root_indices.push(index);
        index
    }

    /// Appends `node` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// If `parent` is not an index returned by this prefab.
    pub fn add_child(&mut self, parent: usize, node: PrefabNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent].children_indices.push(index);
        index
    }

    /// Moves every root of `other` under `parent`, keeping its structure.
    ///
    /// Returns the new indices of `other`'s roots.
    pub fn graft(&mut self, parent: usize, other: Prefab) -> Vec<usize> {
        let offset = self.nodes.len();
        let grafted: Vec<usize> = other.root_indices.iter().map(|i| i + offset).collect();
        self.nodes.extend(other.nodes.into_iter().map(|mut node| {
            for child in &mut node.children_indices {
                *child += offset;
            }
            node
        }));
        self.nodes[parent].children_indices.extend_from_slice(&grafted);
        grafted
    }

    /// The first root, which is the subtree's top group for assembler output.
    #[must_use]
    pub fn root(&self) -> Option<&PrefabNode> {
        self.root_indices.first().map(|&i| &self.nodes[i])
    }

    #[must_use]
    pub fn root_mut(&mut self) -> Option<&mut PrefabNode> {
        let index = *self.root_indices.first()?;
        self.nodes.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&PrefabNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Nodes carrying all of `tags`, in storage order.
    pub fn iter_tagged(&self, tags: NodeTags) -> impl Iterator<Item = &PrefabNode> {
        self.nodes.iter().filter(move |n| n.tags.contains(tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graft_reindexes_children() {
        let mut outer = Prefab::with_root(PrefabNode::group("outer"));
        outer.add_child(0, PrefabNode::group("first"));

        let mut inner = Prefab::with_root(PrefabNode::group("inner"));
        inner.add_child(0, PrefabNode::group("leaf"));

        let grafted = outer.graft(0, inner);
        assert_eq!(grafted, vec![2]);
        assert_eq!(outer.nodes[0].children_indices, vec![1, 2]);
        assert_eq!(outer.nodes[2].children_indices, vec![3]);
        assert_eq!(outer.nodes[3].name, "leaf");
    }

    #[test]
    fn motion_sets_its_tag() {
        let node = PrefabNode::group("drop").with_motion(Motion::Dust { velocity: Vec3::X });
        assert!(node.tags.contains(NodeTags::DUST));
    }
}
