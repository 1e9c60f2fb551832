//! Diorama Settings
//!
//! Every tuning constant of the experience in one place. Each sub-struct
//! has a `Default` carrying the shipped values, so callers only spell out
//! what they change:
//!
//! ```rust,ignore
//! use diorama::settings::DioramaSettings;
//!
//! let settings = DioramaSettings {
//!     seed: 7,
//!     narration: NarrationSettings { start_delay: 0.0, ..Default::default() },
//!     ..Default::default()
//! };
//! ```

use glam::Vec3;

use crate::animation::SchedulerSettings;
use crate::assembly::{AtmosphereSettings, SiteLayout};
use crate::controls::OrbitSettings;
use crate::narration::NarrationSettings;
use crate::scene::{Camera, CameraPose};
use crate::status::StatusSettings;

/// Perspective parameters and where the camera starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Vertical field of view, degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub initial_pose: CameraPose,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 38.0,
            near: 0.1,
            far: 1000.0,
            initial_pose: CameraPose::new(Vec3::new(30.0, 18.0, 55.0), Vec3::new(0.0, 4.0, 0.0)),
        }
    }
}

impl CameraSettings {
    #[must_use]
    pub fn build(&self, aspect: f32) -> Camera {
        let mut camera = Camera::new_perspective(self.fov_degrees, aspect, self.near, self.far);
        camera.set_pose(self.initial_pose);
        camera
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DioramaSettings {
    /// Seeds layout, textures and the HUD flicker.
    pub seed: u64,
    pub layout: SiteLayout,
    pub atmosphere: AtmosphereSettings,
    pub scheduler: SchedulerSettings,
    pub narration: NarrationSettings,
    pub orbit: OrbitSettings,
    pub camera: CameraSettings,
    pub status: StatusSettings,
}
