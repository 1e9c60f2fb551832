//! Ground plan
//!
//! Every feature standing on the plinth claims a footprint on the XZ plane.
//! [`SitePlan`] keeps the claimed footprints and refuses placements that
//! would intersect an earlier one or hang over the plinth edge. Fixed
//! landmarks go through [`SitePlan::reserve`] and fail the build on
//! conflict; scattered decoration uses [`SitePlan::try_reserve`] and simply
//! skips blocked slots.

use std::borrow::Cow;
use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::RngExt;

use crate::errors::{DioramaError, Result};
use crate::resources::geometry::QuadraticBezier;

/// Shape of a claimed ground area, in world XZ coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Area {
    Rect { min: Vec2, max: Vec2 },
    Circle { center: Vec2, radius: f32 },
}

/// A labelled ground area.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    pub label: Cow<'static, str>,
    pub area: Area,
}

impl Footprint {
    #[must_use]
    pub fn rect(label: impl Into<Cow<'static, str>>, min: Vec2, max: Vec2) -> Self {
        Self {
            label: label.into(),
            area: Area::Rect {
                min: min.min(max),
                max: min.max(max),
            },
        }
    }

    /// Rectangle around `center` reaching `min_offset`..`max_offset`.
    #[must_use]
    pub fn around(label: impl Into<Cow<'static, str>>, center: Vec2, min_offset: Vec2, max_offset: Vec2) -> Self {
        Self::rect(label, center + min_offset, center + max_offset)
    }

    #[must_use]
    pub fn square(label: impl Into<Cow<'static, str>>, center: Vec2, half: f32) -> Self {
        Self::around(label, center, Vec2::splat(-half), Vec2::splat(half))
    }

    #[must_use]
    pub fn circle(label: impl Into<Cow<'static, str>>, center: Vec2, radius: f32) -> Self {
        Self {
            label: label.into(),
            area: Area::Circle { center, radius },
        }
    }

    /// Strict intersection; touching edges do not count.
    #[must_use]
    pub fn overlaps(&self, other: &Footprint) -> bool {
        match (self.area, other.area) {
            (Area::Rect { min: a0, max: a1 }, Area::Rect { min: b0, max: b1 }) => {
                a0.x < b1.x && a1.x > b0.x && a0.y < b1.y && a1.y > b0.y
            }
            (Area::Circle { center: a, radius: ra }, Area::Circle { center: b, radius: rb }) => {
                a.distance_squared(b) < (ra + rb) * (ra + rb)
            }
            (Area::Rect { min, max }, Area::Circle { center, radius })
            | (Area::Circle { center, radius }, Area::Rect { min, max }) => {
                center.clamp(min, max).distance_squared(center) < radius * radius
            }
        }
    }

    /// Distance from the plinth centre to the farthest point of the area.
    #[must_use]
    pub fn reach(&self) -> f32 {
        match self.area {
            Area::Rect { min, max } => {
                let far = min.abs().max(max.abs());
                far.length()
            }
            Area::Circle { center, radius } => center.length() + radius,
        }
    }
}

/// Footprints claimed on a circular plinth.
#[derive(Debug, Clone)]
pub struct SitePlan {
    radius: f32,
    claimed: Vec<Footprint>,
}

impl SitePlan {
    #[must_use]
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            claimed: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[must_use]
    pub fn footprints(&self) -> &[Footprint] {
        &self.claimed
    }

    fn check(&self, footprint: &Footprint) -> Result<()> {
        if footprint.reach() > self.radius + 1e-4 {
            return Err(DioramaError::OffPlinth(footprint.label.to_string()));
        }
        if let Some(existing) = self.claimed.iter().find(|c| c.overlaps(footprint)) {
            return Err(DioramaError::PlacementOverlap {
                first: existing.label.to_string(),
                second: footprint.label.to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn is_clear(&self, footprint: &Footprint) -> bool {
        self.check(footprint).is_ok()
    }

    /// Claims a landmark footprint, failing on conflict.
    pub fn reserve(&mut self, footprint: Footprint) -> Result<()> {
        self.check(&footprint)?;
        log::debug!("Reserved footprint '{}'", footprint.label);
        self.claimed.push(footprint);
        Ok(())
    }

    /// Claims the footprint if it is free. Returns whether it was placed.
    pub fn try_reserve(&mut self, footprint: Footprint) -> bool {
        if self.is_clear(&footprint) {
            self.claimed.push(footprint);
            true
        } else {
            false
        }
    }
}

/// `count` evenly spaced points on a ring, each turned by up to
/// `jitter` of a slot's angle in either direction.
pub fn ring_slots(rng: &mut StdRng, center: Vec2, radius: f32, count: usize, jitter: f32) -> Vec<Vec2> {
    let step = TAU / count.max(1) as f32;
    let jitter = jitter.clamp(0.0, 0.5);
    (0..count)
        .map(|i| {
            let wobble = if jitter > 0.0 {
                rng.random_range(-jitter..jitter)
            } else {
                0.0
            };
            let angle = (i as f32 + wobble) * step;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

#[inline]
#[must_use]
pub fn ground(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}

pub(crate) fn ensure_positive(feature: &'static str, parameter: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DioramaError::InvalidParameter {
            feature,
            parameter,
            value,
        })
    }
}

pub(crate) fn ensure_finite(feature: &'static str, parameter: &'static str, value: Vec3) -> Result<()> {
    match value.to_array().into_iter().find(|v| !v.is_finite()) {
        Some(bad) => Err(DioramaError::InvalidParameter {
            feature,
            parameter,
            value: bad,
        }),
        None => Ok(()),
    }
}

pub(crate) fn ensure_count(feature: &'static str, parameter: &'static str, count: usize) -> Result<()> {
    if count == 0 {
        Err(DioramaError::InvalidParameter {
            feature,
            parameter,
            value: 0.0,
        })
    } else {
        Ok(())
    }
}

// ============================================================================
// Site layout
// ============================================================================

/// Outer dimensions of a riad body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiadSize {
    pub height: f32,
    pub width: f32,
    pub depth: f32,
}

impl RiadSize {
    #[must_use]
    pub const fn new(height: f32, width: f32, depth: f32) -> Self {
        Self { height, width, depth }
    }
}

/// One riad placed in the district.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiadLot {
    pub origin: Vec3,
    pub size: RiadSize,
    /// Hang the three rugs on the front (+Z) facade.
    pub rugs: bool,
    /// Lay the flag carpet on the roof.
    pub roof_carpet: bool,
}

impl RiadLot {
    #[must_use]
    pub const fn new(origin: Vec3, size: RiadSize) -> Self {
        Self {
            origin,
            size,
            rugs: false,
            roof_carpet: false,
        }
    }

    #[must_use]
    pub const fn with_rugs(mut self) -> Self {
        self.rugs = true;
        self
    }

    #[must_use]
    pub const fn with_roof_carpet(mut self) -> Self {
        self.roof_carpet = true;
        self
    }

    /// Body plus beams, balcony and AC unit.
    #[must_use]
    pub fn footprint(&self) -> Footprint {
        let RiadSize { width, depth, .. } = self.size;
        Footprint::around(
            "riad",
            ground(self.origin),
            Vec2::new(-width / 2.0 - 0.8, -depth / 2.0 - 0.6),
            Vec2::new(width / 2.0 + 1.4, depth / 2.0 + 0.6),
        )
    }
}

/// Where every feature of the diorama stands.
///
/// The defaults keep all landmark footprints disjoint and on the plinth.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteLayout {
    pub plinth_radius: f32,
    pub waterfall: Vec3,
    pub minaret: Vec3,
    pub gate: Vec3,
    pub merchant: Vec3,
    pub riads: Vec<RiadLot>,

    /// Ring radius and slot count for scattered palms.
    pub palm_ring: f32,
    pub palm_slots: usize,
    pub palm_count: usize,

    /// Tajines are set out on a ring around the waterfall.
    pub tajine_ring: f32,
    pub tajine_slots: usize,
    pub tajine_scales: Vec<f32>,

    pub ground_light_ring: f32,
    pub ground_light_count: usize,

    /// Lamp wire strung from the minaret towards the stall.
    pub wire: QuadraticBezier,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            plinth_radius: 15.0,
            waterfall: Vec3::ZERO,
            minaret: Vec3::new(-8.0, 0.0, -8.0),
            gate: Vec3::new(0.0, 0.0, -11.5),
            merchant: Vec3::new(9.0, 0.0, 5.5),
            riads: vec![
                RiadLot::new(Vec3::new(-9.0, 0.0, 0.5), RiadSize::new(15.0, 8.0, 8.0))
                    .with_rugs()
                    .with_roof_carpet(),
                RiadLot::new(Vec3::new(6.5, 0.0, -5.5), RiadSize::new(10.0, 6.0, 6.0)),
                RiadLot::new(Vec3::new(-0.5, 0.0, 9.0), RiadSize::new(8.0, 10.0, 6.0)),
            ],
            palm_ring: 13.2,
            palm_slots: 24,
            palm_count: 4,
            tajine_ring: 5.0,
            tajine_slots: 12,
            tajine_scales: vec![1.0, 0.82, 1.15, 0.95],
            ground_light_ring: 13.8,
            ground_light_count: 8,
            wire: QuadraticBezier {
                start: Vec3::new(-8.0, 14.0, -6.0),
                control: Vec3::new(0.0, 10.0, 0.0),
                end: Vec3::new(8.0, 12.0, 8.0),
            },
        }
    }
}
