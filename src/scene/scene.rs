use glam::Vec3;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::errors::{DioramaError, Result};
use crate::resources::geometry::BoundingBox;
use crate::scene::NodeHandle;
use crate::scene::node::Node;
use crate::scene::prefab::Prefab;
use crate::scene::tags::NodeTags;
use crate::scene::transform_system;

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Vec3,
    pub near: f32,
    pub far: f32,
}

/// Scene graph
///
/// Owns every node in a slot map; the tree is described by the nodes'
/// parent/child handles and the ordered `root_nodes` list. The structure is
/// strictly a tree: a node has at most one parent and is never its own
/// ancestor. After construction only transforms and texture transforms
/// change; no node is removed.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub background: Vec3,
    pub fog: Option<Fog>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// Adds a node as a new root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn add_to_parent(&mut self, node: Node, parent: NodeHandle) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(DioramaError::InvalidAttach(format!("parent {parent:?} does not exist")));
        }
        let handle = self.nodes.insert(node);
        self.link(handle, parent);
        Ok(handle)
    }

    /// Instantiates `prefab` under `parent`.
    ///
    /// Returns the handles of the prefab's roots, in order.
    pub fn insert(&mut self, parent: NodeHandle, prefab: Prefab) -> Result<Vec<NodeHandle>> {
        if !self.nodes.contains_key(parent) {
            return Err(DioramaError::InvalidAttach(format!("parent {parent:?} does not exist")));
        }
        self.instantiate(prefab, Some(parent))
    }

    /// Instantiates `prefab` as new top-level roots.
    pub fn insert_root(&mut self, prefab: Prefab) -> Result<Vec<NodeHandle>> {
        self.instantiate(prefab, None)
    }

    fn instantiate(&mut self, prefab: Prefab, parent: Option<NodeHandle>) -> Result<Vec<NodeHandle>> {
        validate_prefab(&prefab)?;

        let root_indices = prefab.root_indices;
        let mut links: Vec<(usize, Vec<usize>)> = Vec::with_capacity(prefab.nodes.len());
        let mut handles: Vec<NodeHandle> = Vec::with_capacity(prefab.nodes.len());

        for (index, pnode) in prefab.nodes.into_iter().enumerate() {
            let mut node = Node::new(pnode.name);
            node.transform = pnode.transform;
            node.transform.mark_dirty();
            node.mesh = pnode.mesh;
            node.light = pnode.light;
            node.tags = pnode.tags;
            node.motion = pnode.motion;
            node.interactive = pnode.interactive;
            handles.push(self.nodes.insert(node));
            links.push((index, pnode.children_indices));
        }

        for (index, children) in links {
            let handle = handles[index];
            for child in children {
                self.link(handles[child], handle);
            }
        }

        let roots: Vec<NodeHandle> = root_indices.iter().map(|&i| handles[i]).collect();
        for &root in &roots {
            match parent {
                Some(p) => self.link(root, p),
                None => self.root_nodes.push(root),
            }
        }

        log::debug!("Instantiated prefab with {} nodes", handles.len());
        Ok(roots)
    }

    fn link(&mut self, child: NodeHandle, parent: NodeHandle) {
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// Re-parents `child` under `parent`.
    ///
    /// Rejects self-attachment, unknown handles and any edit that would make
    /// a node its own ancestor.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<()> {
        if child == parent {
            return Err(DioramaError::InvalidAttach("cannot attach a node to itself".into()));
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            return Err(DioramaError::InvalidAttach("unknown node handle".into()));
        }
        if self.ancestors(parent).any(|a| a == child) {
            return Err(DioramaError::InvalidAttach(format!(
                "{parent:?} is a descendant of {child:?}"
            )));
        }

        let old_parent = self.nodes[child].parent;
        match old_parent {
            Some(old) => {
                if let Some(n) = self.nodes.get_mut(old)
                    && let Some(i) = n.children.iter().position(|&x| x == child)
                {
                    n.children.remove(i);
                }
            }
            None => self.root_nodes.retain(|&r| r != child),
        }

        self.link(child, parent);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Depth-first pre-order walk over every root, in insertion order.
    ///
    /// Lazy and finite; the order is stable for an unchanged hierarchy.
    #[must_use]
    pub fn traverse_all(&self) -> Traverse<'_> {
        Traverse {
            nodes: &self.nodes,
            stack: self.root_nodes.iter().rev().copied().collect(),
        }
    }

    /// Depth-first pre-order walk of `root`'s subtree, `root` included.
    #[must_use]
    pub fn traverse_from(&self, root: NodeHandle) -> Traverse<'_> {
        let mut stack = SmallVec::new();
        if self.nodes.contains_key(root) {
            stack.push(root);
        }
        Traverse {
            nodes: &self.nodes,
            stack,
        }
    }

    /// Nodes carrying every flag in `tags`, in traversal order.
    pub fn find_all_by_tag(&self, tags: NodeTags) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.traverse_all().filter(move |(_, n)| n.tags.contains(tags))
    }

    /// First node named `name` in traversal order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.traverse_all().find(|(_, n)| n.name == name).map(|(h, _)| h)
    }

    #[must_use]
    pub fn find_by_name_in_subtree(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.traverse_from(root)
            .find(|(_, n)| n.name == name)
            .map(|(h, _)| h)
    }

    /// Parent chain of `handle`, nearest first, excluding `handle` itself.
    pub fn ancestors(&self, handle: NodeHandle) -> impl Iterator<Item = NodeHandle> {
        std::iter::successors(self.nodes.get(handle).and_then(|n| n.parent), |&h| {
            self.nodes.get(h).and_then(|n| n.parent)
        })
    }

    /// `handle` itself or its nearest ancestor that is an interactive target.
    #[must_use]
    pub fn interactive_ancestor(&self, handle: NodeHandle) -> Option<NodeHandle> {
        std::iter::once(handle).chain(self.ancestors(handle)).find(|&h| {
            self.nodes
                .get(h)
                .is_some_and(|n| n.tags.contains(NodeTags::INTERACTIVE) && n.interactive.is_some())
        })
    }

    /// False if the node or any ancestor is hidden.
    #[must_use]
    pub fn is_visible_in_hierarchy(&self, handle: NodeHandle) -> bool {
        std::iter::once(handle)
            .chain(self.ancestors(handle))
            .all(|h| self.nodes.get(h).is_some_and(|n| n.visible))
    }

    /// World-space box around every mesh in `root`'s subtree.
    ///
    /// Uses the world matrices of the last [`update_matrix_world`](Self::update_matrix_world).
    #[must_use]
    pub fn world_bounds(&self, root: NodeHandle) -> Option<BoundingBox> {
        self.traverse_from(root)
            .filter_map(|(_, node)| {
                let mesh = node.mesh.as_ref()?;
                Some(mesh.geometry.bounding_box().transform(node.world_matrix()))
            })
            .reduce(|a, b| a.union(&b))
    }

    // ========================================================================
    // Matrix update pipeline
    // ========================================================================

    /// Refreshes every world matrix. Call once per frame after animation.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy(&mut self.nodes, &self.root_nodes);
    }
}

/// Checks that a prefab describes a forest: every node reachable from the
/// roots exactly once, no out-of-range links.
fn validate_prefab(prefab: &Prefab) -> Result<()> {
    let count = prefab.nodes.len();
    let mut seen = vec![false; count];
    let mut stack: Vec<usize> = prefab.root_indices.iter().rev().copied().collect();

    while let Some(index) = stack.pop() {
        let Some(node) = prefab.nodes.get(index) else {
            return Err(DioramaError::InvalidAttach(format!("prefab index {index} out of range")));
        };
        if std::mem::replace(&mut seen[index], true) {
            return Err(DioramaError::InvalidAttach(format!(
                "prefab node '{}' has more than one parent",
                node.name
            )));
        }
        stack.extend(node.children_indices.iter().rev().copied());
    }

    if let Some(orphan) = seen.iter().position(|s| !s) {
        return Err(DioramaError::InvalidAttach(format!(
            "prefab node '{}' is not reachable from any root",
            prefab.nodes[orphan].name
        )));
    }
    Ok(())
}

/// Lazy depth-first iterator returned by [`Scene::traverse_all`].
pub struct Traverse<'a> {
    nodes: &'a SlotMap<NodeHandle, Node>,
    stack: SmallVec<[NodeHandle; 32]>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = (NodeHandle, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let handle = self.stack.pop()?;
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            self.stack.extend(node.children.iter().rev().copied());
            return Some((handle, node));
        }
    }
}
