//! Primitive Catalog
//!
//! Maps every [`AppearanceRole`] to one shared [`Appearance`]. The catalog is
//! built once, validated for completeness, and then only read.
//!
//! ```rust,ignore
//! let catalog = PrimitiveCatalog::standard(&CanvasTextureSource, 42)?;
//! let clay = catalog.get(AppearanceRole::Clay);
//! assert!(Arc::ptr_eq(&clay, &catalog.get(AppearanceRole::Clay)));
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::{DioramaError, Result};
use crate::resources::appearance::{Appearance, AppearanceRole, Blending, ShadingModel};
use crate::resources::texture::{Texture, TextureKind, TextureSource};

/// Read-only table of shared appearance presets.
#[derive(Debug)]
pub struct PrimitiveCatalog {
    /// Indexed by `AppearanceRole as usize`; complete by construction.
    presets: Vec<Arc<Appearance>>,
}

impl PrimitiveCatalog {
    /// The diorama's palette, with textures rasterised by `source`.
    pub fn standard(source: &dyn TextureSource, seed: u64) -> Result<Self> {
        CatalogBuilder::standard(source, seed).build()
    }

    /// Returns the shared appearance for `role`.
    ///
    /// Calling this twice for the same role yields the same `Arc`.
    #[inline]
    #[must_use]
    pub fn get(&self, role: AppearanceRole) -> Arc<Appearance> {
        Arc::clone(&self.presets[role as usize])
    }

    /// Resolves a role from its label, failing fast on unknown names.
    pub fn lookup(&self, label: &str) -> Result<Arc<Appearance>> {
        AppearanceRole::from_label(label)
            .map(|role| self.get(role))
            .ok_or_else(|| DioramaError::UnknownRole(label.to_string()))
    }

    /// The texture attached to the first preset using `kind`, if any.
    #[must_use]
    pub fn texture(&self, kind: TextureKind) -> Option<Arc<Texture>> {
        self.presets
            .iter()
            .filter_map(|a| a.texture.as_ref())
            .find(|t| t.kind() == kind)
            .cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AppearanceRole, &Arc<Appearance>)> {
        AppearanceRole::ALL.iter().copied().zip(self.presets.iter())
    }
}

/// Collects presets and validates that every role is covered.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    presets: FxHashMap<AppearanceRole, Appearance>,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled with the diorama palette.
    #[must_use]
    pub fn standard(source: &dyn TextureSource, seed: u64) -> Self {
        use AppearanceRole as R;

        let texture = |kind: TextureKind, salt: u64| {
            Arc::new(Texture::generate(source, kind.descriptor(seed.wrapping_add(salt))))
        };

        let presets = [
            Appearance::standard(R::Clay, 0xcc7a5c, 0.9),
            Appearance::standard(R::ClayDark, 0x9c5a4a, 0.9),
            Appearance::standard(R::Stone, 0x8a8a8a, 1.0),
            Appearance::standard(R::Wood, 0x543a2a, 0.9),
            Appearance::standard(R::Gold, 0xd4a017, 0.2).with_metalness(0.7),
            Appearance::standard(R::Moon, 0xe0eaff, 0.5)
                .with_emissive(0xe0eaff, 8.0)
                .with_texture(texture(TextureKind::Moon, 1)),
            Appearance::standard(R::White, 0xfafafa, 1.0),
            Appearance::standard(R::Carpet, 0xaa2222, 1.0).with_texture(texture(TextureKind::Carpet, 2)),
            Appearance::standard(R::Kaftan, 0x0044aa, 0.8),
            Appearance::standard(R::Skin, 0x8a5a4a, 0.6),
            Appearance::standard(R::Water, 0x88ccff, 0.1)
                .with_transmission(0.9, 1.33)
                .with_blending(Blending::Transparent { opacity: 1.0 })
                .with_texture(texture(TextureKind::Water, 3)),
            Appearance::standard(R::Metal, 0xcccccc, 0.2).with_metalness(0.8),
            Appearance::standard(R::Tajine, 0x8b4513, 0.3).with_metalness(0.1),
            Appearance::standard(R::Flag, 0xffffff, 1.0)
                .double_sided()
                .with_texture(texture(TextureKind::Flag, 4)),
            Appearance::standard(R::Foundation, 0x111111, 1.0),
            Appearance::standard(R::Leaf, 0x2d4a22, 1.0),
            Appearance::standard(R::Canopy, 0xaa2222, 1.0),
            Appearance::basic(R::Foam, 0xffffff),
            Appearance::basic(R::Mist, 0xffffff).with_blending(Blending::Transparent { opacity: 0.4 }),
            Appearance::basic(R::GlowWindow, 0xffaa44),
            Appearance::standard(R::GoldEmissive, 0xffd700, 1.0).with_emissive(0xffd700, 8.0),
            Appearance::standard(R::Beacon, 0xffd700, 1.0).with_emissive(0xffd700, 5.0),
            Appearance::basic(R::Wire, 0x000000),
            Appearance::basic(R::Star, 0xffffff),
            Appearance::standard(R::Cloud, 0x8899aa, 1.0)
                .with_shading(ShadingModel::Phong)
                .with_blending(Blending::Transparent { opacity: 0.35 }),
            Appearance::basic(R::Dust, 0xffffff).with_blending(Blending::Transparent { opacity: 0.3 }),
            Appearance::basic(R::Halo, 0xfffaf0)
                .with_blending(Blending::Additive { opacity: 1.0 })
                .with_texture(texture(TextureKind::Halo, 5)),
            Appearance::standard(R::RugRed, 0xaa2222, 1.0).double_sided(),
            Appearance::standard(R::RugBlue, 0x1155aa, 1.0).double_sided(),
            Appearance::standard(R::RugOchre, 0x998811, 1.0).double_sided(),
            Appearance::standard(R::ProduceRed, 0xff3300, 1.0),
            Appearance::standard(R::ProduceGreen, 0x44aa22, 1.0),
            Appearance::standard(R::ProduceAmber, 0xffaa00, 1.0),
        ];

        let mut builder = Self::new();
        for preset in presets {
            builder = builder.with(preset);
        }
        builder
    }

    /// Adds or replaces the preset for `appearance.role`.
    #[must_use]
    pub fn with(mut self, appearance: Appearance) -> Self {
        self.presets.insert(appearance.role, appearance);
        self
    }

    /// Freezes the presets. Fails if any role has no preset.
    pub fn build(mut self) -> Result<PrimitiveCatalog> {
        let mut presets = Vec::with_capacity(AppearanceRole::ALL.len());
        for role in AppearanceRole::ALL {
            let appearance = self.presets.remove(&role).ok_or(DioramaError::MissingRole(role))?;
            presets.push(Arc::new(appearance));
        }
        log::debug!("Appearance catalog built with {} presets", presets.len());
        Ok(PrimitiveCatalog { presets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::texture::CanvasTextureSource;

    #[test]
    fn incomplete_builder_reports_first_missing_role() {
        let err = CatalogBuilder::new()
            .with(Appearance::standard(AppearanceRole::Clay, 0xcc7a5c, 0.9))
            .build()
            .unwrap_err();
        assert_eq!(err, DioramaError::MissingRole(AppearanceRole::ClayDark));
    }

    #[test]
    fn overrides_replace_presets() {
        let catalog = CatalogBuilder::standard(&CanvasTextureSource, 1)
            .with(Appearance::standard(AppearanceRole::Clay, 0x000000, 0.5))
            .build()
            .unwrap();
        assert!((catalog.get(AppearanceRole::Clay).roughness - 0.5).abs() < f32::EPSILON);
    }
}
