use glam::Vec3;

use crate::resources::texture::color_hex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    pub bias: f32,
    pub normal_bias: f32,
    pub map_size: u32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            bias: 0.005,
            normal_bias: 0.02,
            map_size: 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Distance at which the contribution reaches zero.
    pub range: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform fill; position is ignored.
    Ambient,
    /// Shines from the node's position towards the world origin.
    Directional,
    Point(PointLight),
}

/// A light attached to a scene node; it takes the node's world position.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
    pub shadow: Option<ShadowConfig>,
}

impl Light {
    #[must_use]
    pub fn new_ambient(hex: u32, intensity: f32) -> Self {
        Self {
            color: color_hex(hex),
            intensity,
            kind: LightKind::Ambient,
            shadow: None,
        }
    }

    #[must_use]
    pub fn new_directional(hex: u32, intensity: f32) -> Self {
        Self {
            color: color_hex(hex),
            intensity,
            kind: LightKind::Directional,
            shadow: None,
        }
    }

    #[must_use]
    pub fn new_point(hex: u32, intensity: f32, range: f32) -> Self {
        Self {
            color: color_hex(hex),
            intensity,
            kind: LightKind::Point(PointLight { range }),
            shadow: None,
        }
    }

    #[must_use]
    pub fn with_shadow(mut self, shadow: ShadowConfig) -> Self {
        self.shadow = Some(shadow);
        self
    }

    #[inline]
    #[must_use]
    pub fn casts_shadows(&self) -> bool {
        self.shadow.is_some()
    }
}
