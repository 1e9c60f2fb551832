//! Shared resource definitions
//!
//! Data that scene nodes reference by `Arc` and never own exclusively:
//! - Appearance: material presets keyed by role
//! - PrimitiveCatalog: the frozen role → appearance table
//! - Texture: procedural texture descriptors and their UV transform
//! - Geometry: analytic shapes, tessellated meshes, bounds and ray tests
//! - Mesh: the geometry + appearance pair a scene node draws

pub mod appearance;
pub mod catalog;
pub mod geometry;
pub mod mesh;
pub mod primitives;
pub mod texture;

pub use appearance::{Appearance, AppearanceRole, Blending, ShadingModel};
pub use catalog::{CatalogBuilder, PrimitiveCatalog};
pub use geometry::{BoundingBox, BoundingSphere, Geometry, MeshData, QuadraticBezier, Ray, Shape, ShapeKey};
pub use mesh::Mesh;
pub use texture::{
    CanvasTextureSource, PixelBuffer, Texture, TextureDescriptor, TextureKind, TextureSource, UvTransform,
    WrapMode,
};
