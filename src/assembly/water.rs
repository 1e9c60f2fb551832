//! The waterfall at the heart of the square.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Vec2, Vec3};
use rand::RngExt;

use crate::assembly::Assembler;
use crate::assembly::layout::{Footprint, ensure_finite, ground};
use crate::errors::Result;
use crate::resources::appearance::AppearanceRole as R;
use crate::resources::geometry::Shape;
use crate::scene::{Motion, NodeTags, Prefab, PrefabNode};

pub const STONE_RING: f32 = 1.8;
pub const STONE_COUNT: usize = 12;
pub const SPLASH_COUNT: usize = 15;

const STONE_JITTER: f32 = 0.1;
const STONE_MAX_RADIUS: f32 = 1.0;

/// The stone ring at its widest.
#[must_use]
pub fn waterfall_footprint(origin: Vec3) -> Footprint {
    Footprint::circle("waterfall", ground(origin), STONE_RING + STONE_JITTER + STONE_MAX_RADIUS)
}

impl Assembler {
    /// Stone pool, water disc, falling column, foam cap and splash droplets.
    ///
    /// The column is tagged for texture scroll and pulse; each droplet gets
    /// a splash motion with its own phase in `[0, 2π)`.
    pub fn build_waterfall(&mut self, origin: Vec3) -> Result<Prefab> {
        const FEATURE: &str = "waterfall";
        ensure_finite(FEATURE, "origin", origin)?;

        let mut prefab = Prefab::with_root(PrefabNode::group("Waterfall").at(origin));

        let pool = prefab.add_child(0, PrefabNode::group("stones"));
        for i in 0..STONE_COUNT {
            let radius = self.rng().random_range(0.6..STONE_MAX_RADIUS);
            let ring = STONE_RING + self.rng().random_range(-STONE_JITTER..STONE_JITTER);
            let angle = i as f32 / STONE_COUNT as f32 * TAU;
            let offset = Vec2::from_angle(angle) * ring;
            let stone = self.part(FEATURE, "stone", Shape::Dodecahedron { radius }, R::Stone)?;
            prefab.add_child(pool, stone.at(Vec3::new(offset.x, 0.0, offset.y)));
        }

        let water = self.part(
            FEATURE,
            "pool_water",
            Shape::Circle {
                radius: 1.6,
                segments: 32,
            },
            R::Water,
        )?;
        prefab.add_child(
            0,
            water
                .at(Vec3::new(0.0, 0.2, 0.0))
                .rotated_euler(-FRAC_PI_2, 0.0, 0.0)
                .tagged(NodeTags::WATER),
        );

        let column = Shape::Cylinder {
            radius_top: 0.6,
            radius_bottom: 0.9,
            height: 6.0,
            radial_segments: 16,
            open_ended: true,
        };
        let column = self.part(FEATURE, "fall", column, R::Water)?;
        prefab.add_child(
            0,
            column
                .at(Vec3::new(0.0, 3.0, 0.0))
                .tagged(NodeTags::WATER)
                .with_motion(Motion::Pulse { rest_scale: Vec3::ONE }),
        );

        let foam = self.part(FEATURE, "foam_cap", Shape::torus(0.6, 0.15, 8, 24), R::Foam)?;
        prefab.add_child(0, foam.at(Vec3::new(0.0, 6.0, 0.0)).rotated_euler(FRAC_PI_2, 0.0, 0.0));

        for _ in 0..SPLASH_COUNT {
            let x = self.rng().random_range(-0.75..0.75);
            let z = self.rng().random_range(-0.75..0.75);
            let phase = self.rng().random_range(0.0..TAU);
            let rest = Vec3::new(x, 0.4, z);
            let droplet = self.part(FEATURE, "splash", Shape::sphere(0.3, 8), R::Mist)?;
            prefab.add_child(0, droplet.at(rest).with_motion(Motion::Splash { phase, rest }));
        }

        Ok(prefab)
    }
}
