use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::controls::input::{PointerButtons, PointerInput};
use crate::scene::CameraPose;

/// Keeps the camera off the poles, where the up vector degenerates.
const PHI_EPSILON: f32 = 1e-4;

/// Free-camera collaborator driven once per frame in free mode.
pub trait OrbitController {
    /// Integrates the pointer state and returns the new camera pose.
    fn update(&mut self, input: &PointerInput, dt: f32) -> CameraPose;

    fn set_auto_rotate(&mut self, enabled: bool);

    fn auto_rotate(&self) -> bool;

    fn set_target(&mut self, target: Vec3);

    fn set_distance_bounds(&mut self, min: f32, max: f32);

    /// Adopts the camera's current position so control resumes without a jump.
    fn sync(&mut self, pose: &CameraPose);
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitSettings {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub auto_rotate: bool,
    /// Turns per minute.
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub target: Vec3,
    /// Vertical field of view used to scale panning, degrees.
    pub fov_degrees: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: true,
            auto_rotate: true,
            auto_rotate_speed: 0.3,
            min_distance: 15.0,
            max_distance: 70.0,
            target: Vec3::new(0.0, 4.0, 0.0),
            fov_degrees: 38.0,
        }
    }
}

/// Spherical orbit around a target with damped rotation, wheel zoom,
/// secondary-button pan and optional slow auto-rotation.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub settings: OrbitSettings,

    pub center: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,

    rotate_delta: Vec2,
}

impl OrbitControls {
    #[must_use]
    pub fn new(settings: OrbitSettings) -> Self {
        let center = settings.target;
        let radius = settings.min_distance.max(1.0);
        Self {
            settings,
            center,
            radius,
            theta: 0.0,
            phi: PI / 2.0,
            rotate_delta: Vec2::ZERO,
        }
    }

    fn offset(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.center + self.offset() * self.radius, self.center)
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(OrbitSettings::default())
    }
}

impl OrbitController for OrbitControls {
    fn update(&mut self, input: &PointerInput, dt: f32) -> CameraPose {
        let screen_height = input.screen_size.y.max(1.0);

        if input.is_pressed(PointerButtons::PRIMARY) {
            let rotate_per_pixel = TAU / screen_height;
            self.rotate_delta -= input.cursor_delta * rotate_per_pixel * self.settings.rotate_speed;
        }

        if self.settings.auto_rotate && !input.is_dragging() {
            self.theta -= TAU / 60.0 * self.settings.auto_rotate_speed * dt;
        }

        if self.settings.enable_damping {
            // Retention is expressed per 60 Hz frame so damping feels the
            // same at any frame rate.
            let retention = (1.0 - self.settings.damping_factor).powf(dt * 60.0);
            let applied = self.rotate_delta * (1.0 - retention);
            self.theta += applied.x;
            self.phi += applied.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        self.phi = self.phi.clamp(PHI_EPSILON, PI - PHI_EPSILON);

        if input.scroll_delta != 0.0 {
            let scale = (1.0 - self.settings.zoom_speed).powf(input.scroll_delta.abs());
            if input.scroll_delta > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
        }
        self.radius = self.radius.clamp(self.settings.min_distance, self.settings.max_distance);

        if input.is_pressed(PointerButtons::SECONDARY) {
            let half_fov = self.settings.fov_degrees.to_radians() / 2.0;
            let visible_height = 2.0 * self.radius * half_fov.tan();
            let world_per_pixel = visible_height / screen_height;

            let forward = -self.offset();
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            let up = right.cross(forward).normalize_or_zero();

            self.center += (right * -input.cursor_delta.x + up * input.cursor_delta.y)
                * world_per_pixel
                * self.settings.pan_speed;
        }

        self.pose()
    }

    fn set_auto_rotate(&mut self, enabled: bool) {
        self.settings.auto_rotate = enabled;
    }

    fn auto_rotate(&self) -> bool {
        self.settings.auto_rotate
    }

    fn set_target(&mut self, target: Vec3) {
        self.center = target;
    }

    fn set_distance_bounds(&mut self, min: f32, max: f32) {
        if min.is_finite() && max.is_finite() && 0.0 < min && min <= max {
            self.settings.min_distance = min;
            self.settings.max_distance = max;
            self.radius = self.radius.clamp(min, max);
        } else {
            log::warn!("Ignoring invalid orbit distance bounds {min}..{max}");
        }
    }

    fn sync(&mut self, pose: &CameraPose) {
        let offset = pose.position - self.center;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        self.radius = distance.clamp(self.settings.min_distance, self.settings.max_distance);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / distance).clamp(-1.0, 1.0).acos();
        self.rotate_delta = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_then_idle_update_keeps_position() {
        let mut controls = OrbitControls::default();
        controls.set_auto_rotate(false);
        let pose = CameraPose::new(Vec3::new(30.0, 18.0, 40.0), Vec3::new(0.0, 4.0, 0.0));
        controls.sync(&pose);
        let next = controls.update(&PointerInput::new(), 1.0 / 60.0);
        assert!(next.position.abs_diff_eq(pose.position, 1e-3));
    }

    #[test]
    fn zoom_respects_distance_bounds() {
        let mut controls = OrbitControls::default();
        controls.radius = 50.0;
        let mut input = PointerInput::new();
        input.handle_wheel(500.0);
        let pose = controls.update(&input, 0.016);
        assert!((pose.distance() - 15.0).abs() < 1e-3);
    }

    #[test]
    fn auto_rotate_turns_azimuth() {
        let mut controls = OrbitControls::default();
        let before = controls.theta;
        controls.update(&PointerInput::new(), 1.0);
        assert!((before - controls.theta - TAU / 60.0 * 0.3).abs() < 1e-5);
    }
}
