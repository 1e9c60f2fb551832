use std::borrow::Cow;

use glam::Affine3A;

use crate::resources::mesh::Mesh;
use crate::scene::NodeHandle;
use crate::scene::light::Light;
use crate::scene::tags::{InteractiveTarget, Motion, NodeTags};
use crate::scene::transform::Transform;

/// A scene node.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships:
/// - `parent`: handle of the owning node (None for root nodes)
/// - `children`: ordered child handles
///
/// The hierarchy fields are only edited through [`Scene`](crate::scene::Scene)
/// so both sides of every edge stay in sync.
///
/// # Components
///
/// A node with a [`Mesh`] draws something; a node without one is a pure
/// group used for transform composition (optionally carrying a [`Light`]).
/// Semantic metadata lives in `tags`, `motion` and `interactive`.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: Cow<'static, str>,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    pub mesh: Option<Mesh>,
    pub light: Option<Light>,

    pub tags: NodeTags,
    pub motion: Option<Motion>,
    pub interactive: Option<InteractiveTarget>,

    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            mesh: None,
            light: None,
            tags: NodeTags::empty(),
            motion: None,
            interactive: None,
            visible: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// True for nodes that only group and transform their children.
    #[inline]
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.mesh.is_none()
    }

    #[inline]
    #[must_use]
    pub fn has_tags(&self, tags: NodeTags) -> bool {
        self.tags.contains(tags)
    }

    /// World matrix as of the last [`Scene::update_matrix_world`](crate::scene::Scene::update_matrix_world).
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}
