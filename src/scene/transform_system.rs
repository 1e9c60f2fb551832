//! Transform System
//!
//! Propagates local matrices down the hierarchy into world matrices. Kept
//! apart from [`Scene`](crate::scene::Scene) so it only borrows the node
//! storage and the root list.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// Updates the world matrices of every node reachable from `roots`.
///
/// Uses an explicit stack so deep hierarchies cannot overflow the call
/// stack. A world matrix is only recomputed when the node's local matrix or
/// one of its ancestors changed.
pub fn update_hierarchy(nodes: &mut SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) {
    // (node, parent world matrix, parent changed)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);

    for &root in roots.iter().rev() {
        stack.push((root, Affine3A::IDENTITY, false));
    }

    while let Some((handle, parent_world, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(world);
        }

        let current_world = node.transform.world_matrix;
        for &child in node.children.iter().rev() {
            stack.push((child, current_world, world_needs_update));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn child_inherits_parent_translation() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();

        let mut parent = Node::new("parent");
        parent.transform.position = Vec3::new(1.0, 0.0, 0.0);
        let parent_handle = nodes.insert(parent);

        let mut child = Node::new("child");
        child.transform.position = Vec3::new(0.0, 1.0, 0.0);
        child.parent = Some(parent_handle);
        let child_handle = nodes.insert(child);

        nodes[parent_handle].children.push(child_handle);

        update_hierarchy(&mut nodes, &[parent_handle]);

        let world = nodes[child_handle].transform.world_position();
        assert!((world.x - 1.0).abs() < 1e-5);
        assert!((world.y - 1.0).abs() < 1e-5);
    }
}
