//! Scene graph
//!
//! Hierarchy and per-node components:
//! - Node: a scene node (hierarchy, transform, mesh, light, metadata)
//! - Transform: TRS with cached matrices and dirty checking
//! - Scene: the node arena and its root list
//! - Prefab: detached subtrees produced by the assembler
//! - Camera: perspective camera and pose
//! - Light: ambient, directional and point lights
//! - Tags: semantic labels, motion payloads and interactive targets

pub mod camera;
pub mod light;
pub mod node;
pub mod prefab;
pub mod scene;
pub mod tags;
pub mod transform;
pub mod transform_system;

pub use camera::{Camera, CameraPose};
pub use light::{Light, LightKind, ShadowConfig};
pub use node::Node;
pub use prefab::{Prefab, PrefabNode};
pub use scene::{Fog, Scene, Traverse};
pub use tags::{InteractiveTarget, Motion, NodeTags, TargetId};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node in a [`Scene`].
    pub struct NodeHandle;
}
