use glam::Vec3;

use crate::scene::CameraPose;

/// Time-parametrised orbit flown during the intro.
///
/// `pose(t)` is a pure function of the clock:
/// `x = cos(orbit_rate * t) * radius`, `z = sin(orbit_rate * t) * radius`,
/// `y = height + sin(bob_rate * t) * bob`, always looking at `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedPath {
    pub radius: f32,
    pub orbit_rate: f32,
    pub height: f32,
    pub bob: f32,
    pub bob_rate: f32,
    pub target: Vec3,
}

impl Default for ScriptedPath {
    fn default() -> Self {
        Self {
            radius: 55.0,
            orbit_rate: 0.1,
            height: 20.0,
            bob: 8.0,
            bob_rate: 0.2,
            target: Vec3::new(0.0, 5.0, 0.0),
        }
    }
}

impl ScriptedPath {
    #[must_use]
    pub fn pose(&self, t: f32) -> CameraPose {
        let angle = t * self.orbit_rate;
        let position = Vec3::new(
            angle.cos() * self.radius,
            self.height + (t * self.bob_rate).sin() * self.bob,
            angle.sin() * self.radius,
        );
        CameraPose::new(position, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_at_zero_starts_on_the_x_axis() {
        let pose = ScriptedPath::default().pose(0.0);
        assert!(pose.position.abs_diff_eq(Vec3::new(55.0, 20.0, 0.0), 1e-5));
        assert_eq!(pose.target, Vec3::new(0.0, 5.0, 0.0));
    }
}
