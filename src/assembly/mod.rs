//! Procedural Assembly
//!
//! Composition functions that turn a handful of parameters into detached
//! [`Prefab`] subtrees. Every function lives on [`Assembler`], which owns
//! the appearance catalog, a geometry cache shared by identical shapes, and
//! the seeded random source every bounded random choice is drawn from.
//!
//! Same seed and same [`SiteLayout`] give the same scene, node for node.
//!
//! ```rust,ignore
//! let catalog = Arc::new(PrimitiveCatalog::standard(&CanvasTextureSource, 42)?);
//! let mut assembler = Assembler::new(catalog, 42);
//! let scene = assembler.build_scene(&SiteLayout::default(), &AtmosphereSettings::default())?;
//! ```

pub mod atmosphere;
pub mod bazaar;
pub mod landmarks;
pub mod layout;
pub mod riad;
pub mod water;

use std::borrow::Cow;
use std::sync::Arc;

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::resources::appearance::AppearanceRole;
use crate::resources::catalog::PrimitiveCatalog;
use crate::resources::geometry::{Geometry, Shape, ShapeKey};
use crate::resources::mesh::Mesh;
use crate::resources::texture::color_hex;
use crate::scene::{Fog, Motion, Prefab, PrefabNode, Scene};

pub use atmosphere::{AtmosphereSettings, DustVolume};
pub use layout::{Area, Footprint, RiadLot, RiadSize, SiteLayout, SitePlan};

/// Names of the top-level scene groups, in insertion order.
pub const ROOT_GROUPS: [&str; 6] = ["Diorama", "Stars", "Clouds", "Dust", "Moon", "Lighting"];

/// Builds diorama subtrees from the shared catalog.
pub struct Assembler {
    catalog: Arc<PrimitiveCatalog>,
    geometries: FxHashMap<ShapeKey, Arc<Geometry>>,
    rng: StdRng,
}

impl Assembler {
    #[must_use]
    pub fn new(catalog: Arc<PrimitiveCatalog>, seed: u64) -> Self {
        Self {
            catalog,
            geometries: FxHashMap::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<PrimitiveCatalog> {
        &self.catalog
    }

    /// Number of distinct tessellations handed out so far.
    #[must_use]
    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Validates `shape` and returns the shared geometry for it.
    pub fn geometry(&mut self, feature: &'static str, shape: Shape) -> Result<Arc<Geometry>> {
        shape.validate(feature)?;
        let geometry = self
            .geometries
            .entry(shape.cache_key())
            .or_insert_with(|| Arc::new(Geometry::new(shape)));
        Ok(Arc::clone(geometry))
    }

    pub fn mesh(&mut self, feature: &'static str, shape: Shape, role: AppearanceRole) -> Result<Mesh> {
        let geometry = self.geometry(feature, shape)?;
        Ok(Mesh::new(geometry, self.catalog.get(role)))
    }

    /// A named mesh node.
    pub(crate) fn part(
        &mut self,
        feature: &'static str,
        name: impl Into<Cow<'static, str>>,
        shape: Shape,
        role: AppearanceRole,
    ) -> Result<PrefabNode> {
        Ok(PrefabNode::mesh(name, self.mesh(feature, shape, role)?))
    }

    // ========================================================================
    // Top level
    // ========================================================================

    /// The plinth and everything standing on it, as one `Diorama` group.
    ///
    /// Landmark footprints are checked against each other and the plinth
    /// edge; scattered decoration fills whatever ring slots remain free.
    pub fn build_diorama(&mut self, layout: &SiteLayout) -> Result<Prefab> {
        let mut plan = SitePlan::new(layout.plinth_radius);

        let mut prefab = Prefab::with_root(PrefabNode::group("Diorama").with_motion(Motion::Vibrate {
            rest: Vec3::ZERO,
            amplitude: 0.08,
            rate: 0.8,
        }));

        let plinth = self.build_plinth(layout.plinth_radius)?;
        prefab.graft(0, plinth);

        plan.reserve(water::waterfall_footprint(layout.waterfall))?;
        plan.reserve(landmarks::minaret_footprint(layout.minaret))?;
        plan.reserve(landmarks::gate_footprint(layout.gate))?;
        plan.reserve(bazaar::stall_footprint(layout.merchant))?;

        let minaret = self.build_minaret(layout.minaret)?;
        prefab.graft(0, minaret);
        let gate = self.build_bab_gate(layout.gate)?;
        prefab.graft(0, gate);

        let district = self.build_district(&mut plan, &layout.riads)?;
        prefab.graft(0, district);

        let waterfall = self.build_waterfall(layout.waterfall)?;
        prefab.graft(0, waterfall);
        let stall = self.build_merchant_stall(layout.merchant)?;
        prefab.graft(0, stall);

        let lights = self.build_ground_lights(&mut plan, layout.ground_light_ring, layout.ground_light_count)?;
        prefab.graft(0, lights);
        let palms = self.build_palm_grove(&mut plan, layout)?;
        prefab.graft(0, palms);
        let tajines = self.build_tajine_ring(&mut plan, layout)?;
        prefab.graft(0, tajines);

        let wire = self.build_wire_with_lamps(layout.wire)?;
        prefab.graft(0, wire);

        log::info!(
            "Assembled diorama: {} nodes, {} footprints, {} shared geometries",
            prefab.len(),
            plan.footprints().len(),
            self.geometries.len()
        );
        Ok(prefab)
    }

    /// The whole scene: the diorama plus the sky, dust and lighting groups.
    pub fn build_scene(&mut self, layout: &SiteLayout, atmosphere: &AtmosphereSettings) -> Result<Scene> {
        let mut scene = Scene::new();
        scene.background = color_hex(0x050810);
        scene.fog = Some(Fog {
            color: color_hex(0x050810),
            near: 20.0,
            far: 110.0,
        });

        scene.insert_root(self.build_diorama(layout)?)?;
        scene.insert_root(self.build_stars(atmosphere)?)?;
        scene.insert_root(self.build_clouds(atmosphere)?)?;
        scene.insert_root(self.build_dust(atmosphere)?)?;
        scene.insert_root(self.build_moon(atmosphere.moon_position)?)?;
        scene.insert_root(Self::build_lighting())?;

        scene.update_matrix_world();
        log::info!("Scene ready with {} nodes", scene.len());
        Ok(scene)
    }
}
