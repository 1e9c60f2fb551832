//! Riads: the courtyard houses filling the district, and what hangs on them.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use rand::RngExt;

use crate::assembly::Assembler;
use crate::assembly::layout::{RiadLot, RiadSize, SitePlan, ensure_finite, ensure_positive};
use crate::errors::{DioramaError, Result};
use crate::resources::appearance::AppearanceRole as R;
use crate::resources::geometry::Shape;
use crate::scene::{Prefab, PrefabNode};

/// Height of the zellige band around the base. Windows stay above it.
pub const ZELLIGE_HEIGHT: f32 = 1.2;

const MERLON: f32 = 0.4;
const RUG_WIDTH: f32 = 2.0;
const RUG_COLORS: [R; 3] = [R::RugRed, R::RugBlue, R::RugOchre];

/// Strict overlap of two 1D spans given as (centre, half-size).
fn spans_overlap(a: (f32, f32), b: (f32, f32)) -> bool {
    (a.0 - b.0).abs() < a.1 + b.1
}

impl Assembler {
    /// A riad of the given outer size with its origin on the ground at the
    /// centre of the body.
    ///
    /// Balcony (p = 0.5), AC unit (p = 0.7) and each window glow (p = 0.6)
    /// are drawn from the assembler's random source.
    pub fn build_complex_riad(&mut self, origin: Vec3, size: RiadSize) -> Result<Prefab> {
        const FEATURE: &str = "riad";
        ensure_finite(FEATURE, "origin", origin)?;
        ensure_positive(FEATURE, "width", size.width)?;
        ensure_positive(FEATURE, "depth", size.depth)?;
        ensure_positive(FEATURE, "height", size.height)?;
        if size.height <= ZELLIGE_HEIGHT {
            return Err(DioramaError::InvalidParameter {
                feature: FEATURE,
                parameter: "height",
                value: size.height,
            });
        }

        let RiadSize { height: h, width: w, depth: d } = size;
        let mut prefab = Prefab::with_root(PrefabNode::group("Riad").at(origin));

        let body = self.mesh(FEATURE, Shape::cuboid(w, h, d), R::Clay)?.with_shadows(true, true);
        prefab.add_child(0, PrefabNode::mesh("body", body).at(Vec3::new(0.0, h / 2.0, 0.0)));

        // Cedar beams run front to back and poke out of both faces.
        for i in 0..6 {
            let beam = self.part(FEATURE, "beam", Shape::cuboid(0.3, 0.3, d + 1.2), R::Wood)?;
            let x = (i as f32 - 2.5) * (w / 6.0);
            prefab.add_child(0, beam.at(Vec3::new(x, h * 0.85, 0.0)));
        }

        let merlon_slots = (w / MERLON).floor() as usize;
        for i in (0..merlon_slots).step_by(2) {
            let merlon = self.part(FEATURE, "merlon", Shape::cuboid(MERLON, MERLON, d + 0.1), R::Clay)?;
            let x = -w / 2.0 + MERLON / 2.0 + i as f32 * MERLON;
            prefab.add_child(0, merlon.at(Vec3::new(x, h + MERLON / 2.0, 0.0)));
        }

        let balcony_y = h * 0.5;
        let has_balcony = self.rng().random_bool(0.5);
        if has_balcony {
            let balcony = self.part(FEATURE, "mashrabiya", Shape::cuboid(1.5, 2.5, 3.0), R::Wood)?;
            prefab.add_child(0, balcony.at(Vec3::new(w / 2.0 + 0.6, balcony_y, 0.0)));
            let trim = self.part(FEATURE, "mashrabiya_trim", Shape::cuboid(1.6, 0.2, 3.1), R::Gold)?;
            prefab.add_child(0, trim.at(Vec3::new(w / 2.0 + 0.6, balcony_y + 1.25, 0.0)));
        }

        if self.rng().random_bool(0.7) {
            let ac = self.part(FEATURE, "ac_unit", Shape::cuboid(1.2, 0.8, 0.6), R::Metal)?;
            prefab.add_child(0, ac.at(Vec3::new(-w / 2.0 - 0.2, h * 0.4, d / 3.0)));
        }

        let zellige = self.part(FEATURE, "zellige", Shape::cuboid(w + 0.2, ZELLIGE_HEIGHT, d + 0.2), R::Gold)?;
        prefab.add_child(0, zellige.at(Vec3::new(0.0, ZELLIGE_HEIGHT / 2.0, 0.0)));

        for i in 0..4 {
            let y = h * 0.7 - i as f32 * 1.8;
            if y - 0.6 < ZELLIGE_HEIGHT {
                break;
            }
            let z = if i % 2 == 0 { d / 4.0 } else { -d / 4.0 };
            let behind_balcony =
                has_balcony && spans_overlap((y, 0.6), (balcony_y + 0.05, 1.3)) && spans_overlap((z, 0.4), (0.0, 1.55));
            if behind_balcony {
                continue;
            }

            let window = self.part(FEATURE, "window", Shape::cuboid(0.2, 1.2, 0.8), R::Wood)?;
            prefab.add_child(0, window.at(Vec3::new(w / 2.0 + 0.05, y, z)));

            if self.rng().random_bool(0.6) {
                let glow = self.part(
                    FEATURE,
                    "window_glow",
                    Shape::Plane {
                        width: 0.7,
                        height: 1.1,
                    },
                    R::GlowWindow,
                )?;
                prefab.add_child(
                    0,
                    glow.at(Vec3::new(w / 2.0 + 0.16, y, z)).rotated_euler(0.0, FRAC_PI_2, 0.0),
                );
            }
        }

        Ok(prefab)
    }

    /// Places one riad per lot, claiming each lot's footprint on `plan`.
    pub fn build_district(&mut self, plan: &mut SitePlan, lots: &[RiadLot]) -> Result<Prefab> {
        let mut prefab = Prefab::with_root(PrefabNode::group("District"));

        for (i, lot) in lots.iter().enumerate() {
            let mut riad = self.build_complex_riad(lot.origin, lot.size)?;

            let mut footprint = lot.footprint();
            footprint.label = format!("riad_{i}").into();
            plan.reserve(footprint)?;

            if let Some(root) = riad.root_mut() {
                root.name = format!("Riad{i}").into();
            }
            let RiadSize { height, depth, .. } = lot.size;
            if lot.rugs {
                let rugs = self.build_hanging_rugs(Vec3::new(0.0, 6.0, depth / 2.0 + 0.05), 2.6)?;
                riad.graft(0, rugs);
            }
            if lot.roof_carpet {
                let carpet = self.build_flag_carpet(Vec3::new(0.0, height + 0.45, 0.0))?;
                riad.graft(0, carpet);
            }
            prefab.graft(0, riad);
        }

        log::debug!("District holds {} riads", lots.len());
        Ok(prefab)
    }

    /// Three rugs side by side, centred on `origin`, facing +Z.
    pub fn build_hanging_rugs(&mut self, origin: Vec3, spacing: f32) -> Result<Prefab> {
        const FEATURE: &str = "hanging_rugs";
        ensure_finite(FEATURE, "origin", origin)?;
        ensure_positive(FEATURE, "spacing", spacing)?;
        if spacing < RUG_WIDTH {
            return Err(DioramaError::InvalidParameter {
                feature: FEATURE,
                parameter: "spacing",
                value: spacing,
            });
        }

        let mut prefab = Prefab::with_root(PrefabNode::group("Rugs").at(origin));
        for (i, role) in RUG_COLORS.into_iter().enumerate() {
            let rug = self.part(
                FEATURE,
                "rug",
                Shape::Plane {
                    width: RUG_WIDTH,
                    height: 3.5,
                },
                role,
            )?;
            prefab.add_child(0, rug.at(Vec3::new((i as f32 - 1.0) * spacing, 0.0, 0.0)));
        }
        Ok(prefab)
    }
}
