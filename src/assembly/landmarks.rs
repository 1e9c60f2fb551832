//! Plinth, minaret, city gate and the roof carpet.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::{Vec2, Vec3};

use crate::assembly::Assembler;
use crate::assembly::layout::{Footprint, ensure_finite, ensure_positive, ground};
use crate::errors::Result;
use crate::resources::appearance::AppearanceRole as R;
use crate::resources::geometry::Shape;
use crate::scene::{Light, Prefab, PrefabNode};

pub const MINARET_HALF_WIDTH: f32 = 2.1;

#[must_use]
pub fn minaret_footprint(origin: Vec3) -> Footprint {
    Footprint::square("minaret", ground(origin), MINARET_HALF_WIDTH)
}

/// Wall plus the arch standing proud of its +Z face.
#[must_use]
pub fn gate_footprint(origin: Vec3) -> Footprint {
    Footprint::around("bab_gate", ground(origin), Vec2::new(-3.0, -1.5), Vec2::new(3.0, 1.95))
}

impl Assembler {
    /// Foundation drum with the carpeted top the city stands on.
    pub fn build_plinth(&mut self, radius: f32) -> Result<Prefab> {
        const FEATURE: &str = "plinth";
        ensure_positive(FEATURE, "radius", radius)?;

        let mut prefab = Prefab::with_root(PrefabNode::group("Plinth"));
        let base = self.part(FEATURE, "foundation", Shape::cylinder(radius, radius + 1.0, 5.0, 32), R::Foundation)?;
        prefab.add_child(0, base.at(Vec3::new(0.0, -2.5, 0.0)));

        let top = self
            .mesh(FEATURE, Shape::cylinder(radius, radius, 0.2, 32), R::Carpet)?
            .with_shadows(false, true);
        prefab.add_child(0, PrefabNode::mesh("carpet", top));
        Ok(prefab)
    }

    /// Square tower with ornament bands, a four-sided dome, the gold finial
    /// and its beacon light.
    pub fn build_minaret(&mut self, origin: Vec3) -> Result<Prefab> {
        const FEATURE: &str = "minaret";
        ensure_finite(FEATURE, "origin", origin)?;

        let mut prefab = Prefab::with_root(PrefabNode::group("Minaret").at(origin));

        let tower = self
            .mesh(FEATURE, Shape::cuboid(4.0, 18.0, 4.0), R::Clay)?
            .with_shadows(true, false);
        prefab.add_child(0, PrefabNode::mesh("tower", tower).at(Vec3::new(0.0, 9.0, 0.0)));

        for i in 0..3 {
            let band = self.part(FEATURE, "band", Shape::cuboid(4.2, 0.2, 4.2), R::ClayDark)?;
            prefab.add_child(0, band.at(Vec3::new(0.0, 12.0 + i as f32 * 2.0, 0.0)));
        }

        let dome = self.part(FEATURE, "dome", Shape::cylinder(1.5, 2.0, 2.5, 4), R::ClayDark)?;
        prefab.add_child(0, dome.at(Vec3::new(0.0, 19.0, 0.0)).rotated_euler(0.0, FRAC_PI_4, 0.0));

        let finial = self.part(FEATURE, "finial", Shape::sphere(0.5, 16), R::Beacon)?;
        prefab.add_child(0, finial.at(Vec3::new(0.0, 20.5, 0.0)));

        prefab.add_child(
            0,
            PrefabNode::light("beacon_light", Light::new_point(0xffd700, 50.0, 20.0)).at(Vec3::new(0.0, 21.0, 0.0)),
        );
        Ok(prefab)
    }

    /// Gate wall with a half-torus arch facing +Z.
    pub fn build_bab_gate(&mut self, origin: Vec3) -> Result<Prefab> {
        const FEATURE: &str = "bab_gate";
        ensure_finite(FEATURE, "origin", origin)?;

        let mut prefab = Prefab::with_root(PrefabNode::group("BabGate").at(origin));

        let wall = self
            .mesh(FEATURE, Shape::cuboid(6.0, 12.0, 3.0), R::Clay)?
            .with_shadows(true, false);
        prefab.add_child(0, PrefabNode::mesh("wall", wall).at(Vec3::new(0.0, 6.0, 0.0)));

        let arch = Shape::Torus {
            radius: 2.0,
            tube: 0.4,
            radial_segments: 8,
            tubular_segments: 24,
            arc: PI,
        };
        let arch = self.part(FEATURE, "arch", arch, R::Wood)?;
        prefab.add_child(0, arch.at(Vec3::new(0.0, 5.0, 1.55)));
        Ok(prefab)
    }

    /// Flag-textured carpet laid flat at `position`.
    pub fn build_flag_carpet(&mut self, position: Vec3) -> Result<Prefab> {
        const FEATURE: &str = "flag_carpet";
        ensure_finite(FEATURE, "position", position)?;

        let carpet = self.part(
            FEATURE,
            "FlagCarpet",
            Shape::Plane {
                width: 4.0,
                height: 2.7,
            },
            R::Flag,
        )?;
        Ok(Prefab::with_root(carpet.at(position).rotated_euler(-FRAC_PI_2, 0.0, 0.0)))
    }
}
