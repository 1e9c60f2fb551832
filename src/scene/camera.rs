use glam::{Mat4, Vec2, Vec3};

use crate::resources::geometry::Ray;

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    #[must_use]
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// Perspective camera.
///
/// The pose is written by the animation scheduler each tick; the cached
/// matrices are read by the render collaborator and the interaction router.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view, radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub up: Vec3,

    pose: CameraPose,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    view_projection_matrix: Mat4,
}

impl Camera {
    /// `fov_degrees` is the vertical field of view.
    #[must_use]
    pub fn new_perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,
            up: Vec3::Y,
            pose: CameraPose::new(Vec3::Z, Vec3::ZERO),
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam.set_pose(CameraPose::new(Vec3::Z, Vec3::ZERO));
        cam
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
            self.update_projection_matrix();
        }
    }

    pub fn update_projection_matrix(&mut self) {
        // glam's perspective_rh maps depth to [0, 1]
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
        self.refresh_view_projection();
    }

    /// Moves the camera; degenerate poses (target on the eye) are ignored.
    pub fn set_pose(&mut self, pose: CameraPose) {
        if (pose.target - pose.position).length_squared() <= f32::EPSILON {
            log::warn!("Ignoring degenerate camera pose at {}", pose.position);
            return;
        }
        self.pose = pose;
        self.view_matrix = Mat4::look_at_rh(pose.position, pose.target, self.up);
        self.refresh_view_projection();
    }

    fn refresh_view_projection(&mut self) {
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    #[inline]
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection_matrix
    }

    /// World-space ray through a point in normalized device coordinates
    /// (`x`, `y` in [-1, 1], +Y up).
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection_matrix.inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(self.pose.position, far - near)
    }

    /// Projects a world point to NDC. `z` is depth in [0, 1] when visible.
    #[must_use]
    pub fn project(&self, point: Vec3) -> Vec3 {
        self.view_projection_matrix.project_point3(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_ray_points_at_target() {
        let mut cam = Camera::new_perspective(38.0, 16.0 / 9.0, 0.1, 1000.0);
        cam.set_pose(CameraPose::new(Vec3::new(0.0, 10.0, 40.0), Vec3::new(0.0, 5.0, 0.0)));
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        let expected = (Vec3::new(0.0, 5.0, 0.0) - Vec3::new(0.0, 10.0, 40.0)).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-4));
    }
}
