//! Market life: the merchant's stall, tajines and palms.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Vec2, Vec3};
use rand::RngExt;

use crate::assembly::Assembler;
use crate::assembly::layout::{
    Footprint, SiteLayout, SitePlan, ensure_count, ensure_finite, ensure_positive, ground, ring_slots,
};
use crate::errors::Result;
use crate::resources::appearance::AppearanceRole as R;
use crate::resources::geometry::Shape;
use crate::scene::{InteractiveTarget, Prefab, PrefabNode, TargetId};

/// Name of the merchant's head, the part that nods when clicked.
pub const MERCHANT_HEAD: &str = "merchant_head";

/// Crown radius of a palm measured on the ground.
pub const PALM_RADIUS: f32 = 1.1;

const PRODUCE: [R; 3] = [R::ProduceRed, R::ProduceGreen, R::ProduceAmber];

/// Counter, canopy and the merchant standing behind them.
#[must_use]
pub fn stall_footprint(origin: Vec3) -> Footprint {
    Footprint::around("merchant_stall", ground(origin), Vec2::new(-2.25, -2.6), Vec2::new(2.25, 1.5))
}

impl Assembler {
    /// Stall with canopy, three produce baskets, and the clickable merchant.
    ///
    /// The merchant group carries the interactive target; every body part
    /// below it resolves to the same target through its ancestor chain.
    pub fn build_merchant_stall(&mut self, origin: Vec3) -> Result<Prefab> {
        const FEATURE: &str = "merchant_stall";
        ensure_finite(FEATURE, "origin", origin)?;

        let mut prefab = Prefab::with_root(PrefabNode::group("MerchantStall").at(origin));

        let counter = self.part(FEATURE, "counter", Shape::cuboid(4.0, 1.5, 2.5), R::Wood)?;
        prefab.add_child(0, counter.at(Vec3::new(0.0, 0.75, 0.0)));
        let canopy = self.part(FEATURE, "canopy", Shape::cuboid(4.5, 0.2, 3.0), R::Canopy)?;
        prefab.add_child(0, canopy.at(Vec3::new(0.0, 3.5, 0.0)));

        for (i, role) in PRODUCE.into_iter().enumerate() {
            let x = -1.2 + i as f32 * 1.2;
            let basket = self.part(FEATURE, "basket", Shape::cuboid(0.8, 0.4, 1.2), R::ClayDark)?;
            prefab.add_child(0, basket.at(Vec3::new(x, 1.6, 0.4)));

            for _ in 0..6 {
                let dx = self.rng().random_range(-0.25..0.25);
                let dz = self.rng().random_range(-0.25..0.25);
                let produce = self.part(FEATURE, "produce", Shape::sphere(0.15, 8), role)?;
                prefab.add_child(0, produce.at(Vec3::new(x + dx, 1.8, 0.4 + dz)));
            }
        }

        let mut merchant = self.build_merchant()?;
        if let Some(root) = merchant.root_mut() {
            root.transform.position = Vec3::new(0.0, 0.0, -2.2);
        }
        prefab.graft(0, merchant);
        Ok(prefab)
    }

    fn build_merchant(&mut self) -> Result<Prefab> {
        const FEATURE: &str = "merchant";

        let target = InteractiveTarget::new(TargetId::MERCHANT).with_reaction_part(MERCHANT_HEAD);
        let mut prefab = Prefab::with_root(PrefabNode::group("merchant").interactive(target));

        let body = self.part(FEATURE, "torso", Shape::cuboid(0.7, 1.5, 0.4), R::Kaftan)?;
        prefab.add_child(0, body.at(Vec3::new(0.0, 1.6, 0.0)));

        let head = self.part(FEATURE, MERCHANT_HEAD, Shape::sphere(0.35, 16), R::Skin)?;
        prefab.add_child(0, head.at(Vec3::new(0.0, 2.6, 0.0)));

        let turban = self.part(FEATURE, "turban", Shape::torus(0.22, 0.12, 8, 24), R::White)?;
        prefab.add_child(
            0,
            turban
                .at(Vec3::new(0.0, 2.9, 0.0))
                .rotated_euler(FRAC_PI_2, 0.0, 0.0),
        );

        for side in [1.0_f32, -1.0] {
            let arm = self.part(FEATURE, "arm", Shape::cuboid(0.2, 1.1, 0.2), R::Kaftan)?;
            prefab.add_child(
                0,
                arm.at(Vec3::new(0.45 * side, 1.7, 0.0)).rotated_euler(0.0, 0.0, -0.15 * side),
            );
        }
        for side in [1.0_f32, -1.0] {
            let leg = self.part(FEATURE, "leg", Shape::cuboid(0.28, 1.0, 0.28), R::White)?;
            prefab.add_child(0, leg.at(Vec3::new(0.18 * side, 0.5, 0.0)));
        }
        Ok(prefab)
    }

    /// Dish, conical lid and knob, scaled uniformly by `scale`.
    pub fn build_tajine(&mut self, origin: Vec3, scale: f32) -> Result<Prefab> {
        const FEATURE: &str = "tajine";
        ensure_finite(FEATURE, "origin", origin)?;
        ensure_positive(FEATURE, "scale", scale)?;

        let mut prefab = Prefab::with_root(PrefabNode::group("Tajine").at(origin).scaled(Vec3::splat(scale)));
        let dish = self.part(FEATURE, "dish", Shape::cylinder(0.5, 0.4, 0.15, 32), R::Tajine)?;
        prefab.add_child(0, dish.at(Vec3::new(0.0, 0.075, 0.0)));
        let lid = self.part(FEATURE, "lid", Shape::cone(0.48, 0.8, 32), R::Tajine)?;
        prefab.add_child(0, lid.at(Vec3::new(0.0, 0.55, 0.0)));
        let knob = self.part(FEATURE, "knob", Shape::sphere(0.08, 16), R::Tajine)?;
        prefab.add_child(0, knob.at(Vec3::new(0.0, 0.95, 0.0)));
        Ok(prefab)
    }

    /// Trunk with a crown of six leaves, turned by a random yaw.
    pub fn build_palm(&mut self, origin: Vec3) -> Result<Prefab> {
        const FEATURE: &str = "palm";
        ensure_finite(FEATURE, "origin", origin)?;

        let yaw = self.rng().random_range(0.0..TAU);
        let mut prefab = Prefab::with_root(PrefabNode::group("Palm").at(origin).rotated_euler(0.0, yaw, 0.0));

        let trunk = self.part(FEATURE, "trunk", Shape::cylinder(0.15, 0.25, 6.0, 32), R::Wood)?;
        prefab.add_child(0, trunk.at(Vec3::new(0.0, 3.0, 0.0)));

        for j in 0..6 {
            let leaf = self.part(FEATURE, "leaf", Shape::cuboid(2.0, 0.1, 0.5), R::Leaf)?;
            let angle = j as f32 / 6.0 * TAU;
            prefab.add_child(0, leaf.at(Vec3::new(0.0, 6.0, 0.0)).rotated_euler(0.0, angle, 0.5));
        }
        Ok(prefab)
    }

    /// Palms on the outer ring, in the first free slots.
    pub fn build_palm_grove(&mut self, plan: &mut SitePlan, layout: &SiteLayout) -> Result<Prefab> {
        const FEATURE: &str = "palm_grove";
        ensure_positive(FEATURE, "ring", layout.palm_ring)?;
        ensure_count(FEATURE, "slots", layout.palm_slots)?;

        let mut prefab = Prefab::with_root(PrefabNode::group("Palms"));
        let slots = ring_slots(self.rng(), Vec2::ZERO, layout.palm_ring, layout.palm_slots, 0.2);

        let mut planted = 0;
        for slot in slots {
            if planted == layout.palm_count {
                break;
            }
            if plan.try_reserve(Footprint::circle(format!("palm_{planted}"), slot, PALM_RADIUS)) {
                let palm = self.build_palm(Vec3::new(slot.x, 0.0, slot.y))?;
                prefab.graft(0, palm);
                planted += 1;
            }
        }

        if planted < layout.palm_count {
            log::warn!("Only {planted} of {} palms found room", layout.palm_count);
        }
        Ok(prefab)
    }

    /// Tajines set out around the waterfall, one per configured scale.
    pub fn build_tajine_ring(&mut self, plan: &mut SitePlan, layout: &SiteLayout) -> Result<Prefab> {
        const FEATURE: &str = "tajine_ring";
        ensure_positive(FEATURE, "ring", layout.tajine_ring)?;
        ensure_count(FEATURE, "slots", layout.tajine_slots)?;

        let mut prefab = Prefab::with_root(PrefabNode::group("Tajines"));
        let center = ground(layout.waterfall);
        let slots = ring_slots(self.rng(), center, layout.tajine_ring, layout.tajine_slots, 0.25);

        let mut scales = layout.tajine_scales.iter().copied().peekable();
        for slot in slots {
            let Some(&scale) = scales.peek() else {
                break;
            };
            ensure_positive(FEATURE, "scale", scale)?;
            if plan.try_reserve(Footprint::circle("tajine", slot, 0.5 * scale)) {
                let tajine = self.build_tajine(Vec3::new(slot.x, 0.1, slot.y), scale)?;
                prefab.graft(0, tajine);
                scales.next();
            }
        }

        let missing = scales.count();
        if missing > 0 {
            log::warn!("{missing} tajines found no free slot");
        }
        Ok(prefab)
    }
}
