use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Local placement of a node plus its cached matrices.
///
/// Animation writes `position`, `rotation` and `scale` directly. The local
/// matrix is rebuilt lazily on the next hierarchy update, and only when one
/// of them differs from the values it was last built from.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    /// TRS the cached local matrix was built from; `None` forces a rebuild.
    built_from: Option<(Vec3, Quat, Vec3)>,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,
            built_from: None,
        }
    }

    /// Rebuilds the local matrix when stale. Returns whether it changed.
    pub fn update_local_matrix(&mut self) -> bool {
        let current = (self.position, self.rotation, self.scale);
        if self.built_from == Some(current) {
            return false;
        }
        self.local_matrix = Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);
        self.built_from = Some(current);
        true
    }

    /// XYZ Euler angles, radians.
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    /// Translation of the cached world matrix; stale until the scene's
    /// matrices are refreshed.
    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.translation.into()
    }

    pub(crate) fn set_world_matrix(&mut self, world: Affine3A) {
        self.world_matrix = world;
    }

    /// Forces the next update to rebuild the local matrix, e.g. after the
    /// node moved to another parent.
    pub fn mark_dirty(&mut self) {
        self.built_from = None;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_matrix_rebuilds_only_on_change() {
        let mut transform = Transform::new();
        assert!(transform.update_local_matrix());
        assert!(!transform.update_local_matrix());

        transform.position.x = 2.0;
        assert!(transform.update_local_matrix());
        assert_eq!(transform.local_matrix().translation.x, 2.0);

        transform.mark_dirty();
        assert!(transform.update_local_matrix());
    }
}
