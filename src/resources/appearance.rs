//! Appearance presets.
//!
//! An [`Appearance`] is the material description a renderer needs to shade a
//! mesh. Appearances are immutable once built and shared as
//! `Arc<Appearance>`; the catalog hands out the same `Arc` for a role for its
//! whole lifetime.

use std::fmt;
use std::sync::Arc;

use glam::Vec3;

use crate::resources::texture::{Texture, color_hex};

/// Semantic role of an appearance preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AppearanceRole {
    Clay,
    ClayDark,
    Stone,
    Wood,
    Gold,
    Moon,
    White,
    Carpet,
    Kaftan,
    Skin,
    Water,
    Metal,
    Tajine,
    Flag,
    Foundation,
    Leaf,
    Canopy,
    Foam,
    Mist,
    GlowWindow,
    GoldEmissive,
    Beacon,
    Wire,
    Star,
    Cloud,
    Dust,
    Halo,
    RugRed,
    RugBlue,
    RugOchre,
    ProduceRed,
    ProduceGreen,
    ProduceAmber,
}

impl AppearanceRole {
    /// Every role, in declaration order.
    pub const ALL: [AppearanceRole; 33] = [
        Self::Clay,
        Self::ClayDark,
        Self::Stone,
        Self::Wood,
        Self::Gold,
        Self::Moon,
        Self::White,
        Self::Carpet,
        Self::Kaftan,
        Self::Skin,
        Self::Water,
        Self::Metal,
        Self::Tajine,
        Self::Flag,
        Self::Foundation,
        Self::Leaf,
        Self::Canopy,
        Self::Foam,
        Self::Mist,
        Self::GlowWindow,
        Self::GoldEmissive,
        Self::Beacon,
        Self::Wire,
        Self::Star,
        Self::Cloud,
        Self::Dust,
        Self::Halo,
        Self::RugRed,
        Self::RugBlue,
        Self::RugOchre,
        Self::ProduceRed,
        Self::ProduceGreen,
        Self::ProduceAmber,
    ];

    /// The snake_case label used in configuration and diagnostics.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Clay => "clay",
            Self::ClayDark => "clay_dark",
            Self::Stone => "stone",
            Self::Wood => "wood",
            Self::Gold => "gold",
            Self::Moon => "moon",
            Self::White => "white",
            Self::Carpet => "carpet",
            Self::Kaftan => "kaftan",
            Self::Skin => "skin",
            Self::Water => "water",
            Self::Metal => "metal",
            Self::Tajine => "tajine",
            Self::Flag => "flag",
            Self::Foundation => "foundation",
            Self::Leaf => "leaf",
            Self::Canopy => "canopy",
            Self::Foam => "foam",
            Self::Mist => "mist",
            Self::GlowWindow => "glow_window",
            Self::GoldEmissive => "gold_emissive",
            Self::Beacon => "beacon",
            Self::Wire => "wire",
            Self::Star => "star",
            Self::Cloud => "cloud",
            Self::Dust => "dust",
            Self::Halo => "halo",
            Self::RugRed => "rug_red",
            Self::RugBlue => "rug_blue",
            Self::RugOchre => "rug_ochre",
            Self::ProduceRed => "produce_red",
            Self::ProduceGreen => "produce_green",
            Self::ProduceAmber => "produce_amber",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.label() == label)
    }
}

impl fmt::Display for AppearanceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shading model the renderer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingModel {
    /// Metal/roughness PBR.
    Standard,
    /// PBR with transmission (glass, water).
    Physical,
    /// Blinn-Phong, used for the soft cloud blobs.
    Phong,
    /// Unlit flat color.
    Basic,
}

/// How a material is composited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Blending {
    Opaque,
    /// Alpha blended with the given opacity.
    Transparent { opacity: f32 },
    /// Additive glow (halo sprites).
    Additive { opacity: f32 },
}

/// Immutable material description shared across scene nodes.
#[derive(Debug, Clone)]
pub struct Appearance {
    pub role: AppearanceRole,
    pub shading: ShadingModel,
    pub base_color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Option<Vec3>,
    pub emissive_intensity: f32,
    pub blending: Blending,
    /// Physical-only: fraction of light transmitted through the surface.
    pub transmission: f32,
    /// Physical-only: index of refraction.
    pub ior: f32,
    pub double_sided: bool,
    pub texture: Option<Arc<Texture>>,
}

impl Appearance {
    /// A standard PBR preset with the given `0xRRGGBB` color and roughness.
    #[must_use]
    pub fn standard(role: AppearanceRole, hex: u32, roughness: f32) -> Self {
        Self {
            role,
            shading: ShadingModel::Standard,
            base_color: color_hex(hex),
            roughness,
            metalness: 0.0,
            emissive: None,
            emissive_intensity: 1.0,
            blending: Blending::Opaque,
            transmission: 0.0,
            ior: 1.5,
            double_sided: false,
            texture: None,
        }
    }

    /// An unlit preset.
    #[must_use]
    pub fn basic(role: AppearanceRole, hex: u32) -> Self {
        Self {
            shading: ShadingModel::Basic,
            ..Self::standard(role, hex, 1.0)
        }
    }

    #[must_use]
    pub fn with_shading(mut self, shading: ShadingModel) -> Self {
        self.shading = shading;
        self
    }

    #[must_use]
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    #[must_use]
    pub fn with_emissive(mut self, hex: u32, intensity: f32) -> Self {
        self.emissive = Some(color_hex(hex));
        self.emissive_intensity = intensity;
        self
    }

    #[must_use]
    pub fn with_blending(mut self, blending: Blending) -> Self {
        self.blending = blending;
        self
    }

    #[must_use]
    pub fn with_transmission(mut self, transmission: f32, ior: f32) -> Self {
        self.shading = ShadingModel::Physical;
        self.transmission = transmission;
        self.ior = ior;
        self
    }

    #[must_use]
    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    #[must_use]
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    #[inline]
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        !matches!(self.blending, Blending::Opaque)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for role in AppearanceRole::ALL {
            assert_eq!(AppearanceRole::from_label(role.label()), Some(role));
        }
        assert_eq!(AppearanceRole::from_label("marble"), None);
    }

    #[test]
    fn hex_colors_decode() {
        let clay = Appearance::standard(AppearanceRole::Clay, 0xcc7a5c, 0.9);
        assert!((clay.base_color.x - 0.8).abs() < 1e-3);
        assert!(!clay.is_transparent());
    }
}
