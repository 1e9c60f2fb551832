//! Sky, air and light: stars, clouds, drifting dust, the moon, the lamp
//! wire and the scene-wide lighting rig.

use std::f32::consts::PI;

use glam::{Quat, Vec2, Vec3};
use rand::RngExt;

use crate::assembly::Assembler;
use crate::assembly::layout::{Footprint, SitePlan, ensure_count, ensure_finite, ensure_positive, ring_slots};
use crate::errors::{DioramaError, Result};
use crate::resources::appearance::AppearanceRole as R;
use crate::resources::geometry::{QuadraticBezier, Shape};
use crate::scene::{Light, Motion, Prefab, PrefabNode, ShadowConfig};

/// Box the dust drifts in: `[-half_extent, half_extent]` on X and Z,
/// `[floor, ceiling]` on Y. Motes spawn inside it and the scheduler keeps
/// them there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DustVolume {
    pub half_extent: f32,
    pub floor: f32,
    pub ceiling: f32,
}

impl Default for DustVolume {
    fn default() -> Self {
        Self {
            half_extent: 30.0,
            floor: 0.0,
            ceiling: 30.0,
        }
    }
}

impl DustVolume {
    pub(crate) fn validate(&self, feature: &'static str) -> Result<()> {
        ensure_positive(feature, "half_extent", self.half_extent)?;
        ensure_finite(feature, "floor", Vec3::splat(self.floor))?;
        ensure_positive(feature, "height", self.ceiling - self.floor)
    }
}

/// Counts and extents of the scattered sky elements.
#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphereSettings {
    /// Candidate stars; only those above `star_min_height` are kept.
    pub star_attempts: usize,
    /// Edge of the cube stars are scattered in, centred on the origin.
    pub star_spread: f32,
    pub star_min_height: f32,
    /// Chance that a kept star also carries a point light.
    pub hero_star_chance: f64,

    pub cloud_count: usize,
    pub cloud_spread: f32,

    pub dust_count: usize,
    pub dust_volume: DustVolume,
    /// Per-axis velocity range, in units per reference frame.
    pub dust_speed: f32,

    pub moon_position: Vec3,
}

impl Default for AtmosphereSettings {
    fn default() -> Self {
        Self {
            star_attempts: 500,
            star_spread: 250.0,
            star_min_height: 5.0,
            hero_star_chance: 0.03,
            cloud_count: 12,
            cloud_spread: 150.0,
            dust_count: 200,
            dust_volume: DustVolume::default(),
            dust_speed: 0.02,
            moon_position: Vec3::new(-15.0, 35.0, -30.0),
        }
    }
}

/// Wire positions of the hanging stars; the last one hangs unlit.
const LAMPS: [(f32, f32); 3] = [(0.25, 6.0), (0.5, 6.0), (0.75, 0.0)];

impl Assembler {
    pub fn build_stars(&mut self, settings: &AtmosphereSettings) -> Result<Prefab> {
        const FEATURE: &str = "stars";
        ensure_positive(FEATURE, "spread", settings.star_spread)?;
        if !(0.0..=1.0).contains(&settings.hero_star_chance) {
            return Err(DioramaError::InvalidParameter {
                feature: FEATURE,
                parameter: "hero_star_chance",
                value: settings.hero_star_chance as f32,
            });
        }

        let half = settings.star_spread / 2.0;
        let mut prefab = Prefab::with_root(PrefabNode::group("Stars"));

        for _ in 0..settings.star_attempts {
            let position = Vec3::new(
                self.rng().random_range(-half..half),
                self.rng().random_range(-half..half),
                self.rng().random_range(-half..half),
            );
            if position.y <= settings.star_min_height {
                continue;
            }
            let star = self.part(FEATURE, "star", Shape::sphere(0.1, 8), R::Star)?;
            prefab.add_child(0, star.at(position));

            if self.rng().random_bool(settings.hero_star_chance) {
                let glow = PrefabNode::light("star_glow", Light::new_point(0xffffff, 20.0, 30.0));
                prefab.add_child(0, glow.at(position));
            }
        }
        Ok(prefab)
    }

    /// Clouds of six to nine flattened blobs each.
    pub fn build_clouds(&mut self, settings: &AtmosphereSettings) -> Result<Prefab> {
        const FEATURE: &str = "clouds";
        ensure_positive(FEATURE, "spread", settings.cloud_spread)?;

        let half = settings.cloud_spread / 2.0;
        let mut prefab = Prefab::with_root(PrefabNode::group("Clouds"));

        for _ in 0..settings.cloud_count {
            let position = Vec3::new(
                self.rng().random_range(-half..half),
                20.0 + self.rng().random_range(0.0..15.0),
                self.rng().random_range(-half..half),
            );
            let cloud = prefab.add_child(0, PrefabNode::group("cloud").at(position));

            let blobs = self.rng().random_range(6..10);
            for j in 0..blobs {
                let j = j as f32;
                let depth = self.rng().random_range(-2.0..2.0);
                let blob = self.part(FEATURE, "blob", Shape::sphere(4.0, 16), R::Cloud)?;
                prefab.add_child(
                    cloud,
                    blob.at(Vec3::new(j * 3.0, j.sin() * 2.0, depth))
                        .scaled(Vec3::new(1.5, 0.8, 1.0)),
                );
            }
        }
        Ok(prefab)
    }

    /// Motes with a small constant velocity each.
    pub fn build_dust(&mut self, settings: &AtmosphereSettings) -> Result<Prefab> {
        const FEATURE: &str = "dust";
        let volume = settings.dust_volume;
        volume.validate(FEATURE)?;
        ensure_positive(FEATURE, "speed", settings.dust_speed)?;

        let half = volume.half_extent;
        let speed = settings.dust_speed / 2.0;
        let mut prefab = Prefab::with_root(PrefabNode::group("Dust"));

        for _ in 0..settings.dust_count {
            let position = Vec3::new(
                self.rng().random_range(-half..half),
                self.rng().random_range(volume.floor..volume.ceiling),
                self.rng().random_range(-half..half),
            );
            let velocity = Vec3::new(
                self.rng().random_range(-speed..speed),
                self.rng().random_range(-speed..speed),
                self.rng().random_range(-speed..speed),
            );
            let mote = self.part(FEATURE, "mote", Shape::sphere(0.02, 4), R::Dust)?;
            prefab.add_child(0, mote.at(position).with_motion(Motion::Dust { velocity }));
        }
        Ok(prefab)
    }

    /// Emissive moon with a halo turned towards the diorama and its glow.
    pub fn build_moon(&mut self, position: Vec3) -> Result<Prefab> {
        const FEATURE: &str = "moon";
        ensure_finite(FEATURE, "position", position)?;

        let mut prefab = Prefab::with_root(PrefabNode::group("Moon").at(position));

        let disc = self.part(FEATURE, "moon_disc", Shape::sphere(4.0, 32), R::Moon)?;
        prefab.add_child(0, disc.rotated_euler(0.0, PI, 0.0));

        let facing = (-position).try_normalize().unwrap_or(Vec3::Z);
        let halo = self.part(
            FEATURE,
            "halo",
            Shape::Plane {
                width: 25.0,
                height: 25.0,
            },
            R::Halo,
        )?;
        prefab.add_child(0, halo.rotated(Quat::from_rotation_arc(Vec3::Z, facing)));

        prefab.add_child(0, PrefabNode::light("moon_glow", Light::new_point(0xffffee, 1500.0, 400.0)));
        Ok(prefab)
    }

    /// Ambient fill plus the shadow-casting moonlight.
    #[must_use]
    pub fn build_lighting() -> Prefab {
        let mut prefab = Prefab::with_root(PrefabNode::group("Lighting"));
        prefab.add_child(0, PrefabNode::light("ambient", Light::new_ambient(0x223344, 1.2)));
        let moonlight = Light::new_directional(0x4488ff, 2.0).with_shadow(ShadowConfig::default());
        prefab.add_child(0, PrefabNode::light("moonlight", moonlight).at(Vec3::new(20.0, 50.0, 20.0)));
        prefab
    }

    /// Amber lights on a ring, skipping slots that fall on a building.
    pub fn build_ground_lights(&mut self, plan: &mut SitePlan, ring: f32, count: usize) -> Result<Prefab> {
        const FEATURE: &str = "ground_lights";
        ensure_positive(FEATURE, "ring", ring)?;
        ensure_count(FEATURE, "count", count)?;

        let mut prefab = Prefab::with_root(PrefabNode::group("GroundLights"));
        for slot in ring_slots(self.rng(), Vec2::ZERO, ring, count, 0.0) {
            if plan.try_reserve(Footprint::circle("ground_light", slot, 0.2)) {
                let light = PrefabNode::light("ground_light", Light::new_point(0xffd700, 5.0, 15.0));
                prefab.add_child(0, light.at(Vec3::new(slot.x, 0.8, slot.y)));
            }
        }
        Ok(prefab)
    }

    /// A sagging wire with three gold stars hung along it.
    pub fn build_wire_with_lamps(&mut self, curve: QuadraticBezier) -> Result<Prefab> {
        const FEATURE: &str = "wire";
        ensure_finite(FEATURE, "start", curve.start)?;
        ensure_finite(FEATURE, "control", curve.control)?;
        ensure_finite(FEATURE, "end", curve.end)?;

        let mut prefab = Prefab::with_root(PrefabNode::group("Wire"));
        let tube = Shape::Tube {
            curve,
            tubular_segments: 20,
            radius: 0.03,
            radial_segments: 8,
        };
        let cable = self.part(FEATURE, "cable", tube, R::Wire)?;
        prefab.add_child(0, cable);

        for (t, intensity) in LAMPS {
            let position = curve.point(t);
            let spin = self.rng().random_range(0.0..PI);
            let star = Shape::ExtrudedStar {
                points: 5,
                outer_radius: 0.5,
                inner_radius: 0.2,
                depth: 0.1,
            };
            let star = self.part(FEATURE, "hanging_star", star, R::GoldEmissive)?;
            prefab.add_child(0, star.at(position).rotated_euler(0.0, 0.0, spin));

            if intensity > 0.0 {
                let glow = PrefabNode::light("star_lamp", Light::new_point(0xffd700, intensity, 10.0));
                prefab.add_child(0, glow.at(position));
            }
        }
        Ok(prefab)
    }
}
