//! Picking
//!
//! Maps a pointer position to the interactive node under it. The router
//! only reads the scene, so it can run from input handlers between ticks.
//!
//! Screen pixels go to NDC through the [`Viewport`], NDC to a world ray
//! through the camera. Every visible mesh is tested: bounding sphere in
//! world space first, then the tessellated triangles in the mesh's local
//! space. Hits are sorted by distance and the nearest one with an
//! interactive node on its parent chain wins; nearer decoration does not
//! occlude a target behind it.

use glam::Vec2;

use crate::resources::geometry::Ray;
use crate::scene::{Camera, InteractiveTarget, NodeHandle, Scene};

/// Drawable area in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 { self.width / self.height } else { 1.0 }
    }

    /// Pixel position (origin top-left, +Y down) to NDC (+Y up).
    #[must_use]
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x / self.width * 2.0 - 1.0, 1.0 - y / self.height * 2.0)
    }

    fn is_valid(width: f32, height: f32) -> bool {
        width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// The winning hit of a pick.
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    /// Mesh node the ray struck.
    pub node: NodeHandle,
    /// The interactive node at or above `node`.
    pub target_node: NodeHandle,
    pub target: InteractiveTarget,
    /// World-space distance from the camera.
    pub distance: f32,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionRouter {
    viewport: Viewport,
}

impl InteractionRouter {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Applies a new drawable size. Degenerate sizes are ignored; applying
    /// the same size twice is a no-op. Returns true when the size changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !Viewport::is_valid(width, height) {
            log::warn!("Ignoring degenerate viewport {width}x{height}");
            return false;
        }
        let next = Viewport::new(width, height);
        if next == self.viewport {
            return false;
        }
        self.viewport = next;
        true
    }

    /// World ray under a pixel, or `None` for positions that do not map to
    /// a usable ray.
    #[must_use]
    pub fn ray(&self, x: f32, y: f32, camera: &Camera) -> Option<Ray> {
        if !x.is_finite() || !y.is_finite() || !Viewport::is_valid(self.viewport.width, self.viewport.height) {
            return None;
        }
        let ray = camera.ray_from_ndc(self.viewport.to_ndc(x, y));
        (ray.direction != glam::Vec3::ZERO && ray.direction.is_finite()).then_some(ray)
    }

    #[must_use]
    pub fn pick(&self, x: f32, y: f32, camera: &Camera, scene: &Scene) -> Option<InteractiveTarget> {
        self.pick_hit(x, y, camera, scene).map(|hit| hit.target)
    }

    /// Like [`pick`](Self::pick) with the node handles and distance.
    #[must_use]
    pub fn pick_hit(&self, x: f32, y: f32, camera: &Camera, scene: &Scene) -> Option<PickHit> {
        let ray = self.ray(x, y, camera)?;
        let mut hits = raycast_scene(&ray, scene);
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));

        hits.into_iter().find_map(|(node, distance)| {
            let target_node = scene.interactive_ancestor(node)?;
            let target = scene.get_node(target_node)?.interactive.clone()?;
            Some(PickHit {
                node,
                target_node,
                target,
                distance,
            })
        })
    }

    /// Whether an interactive target is under the pointer. Read-only.
    #[must_use]
    pub fn hover(&self, x: f32, y: f32, camera: &Camera, scene: &Scene) -> bool {
        self.pick_hit(x, y, camera, scene).is_some()
    }
}

/// Every visible mesh `ray` strikes, with its world distance, unsorted.
#[must_use]
pub fn raycast_scene(ray: &Ray, scene: &Scene) -> Vec<(NodeHandle, f32)> {
    scene
        .traverse_all()
        .filter_map(|(handle, node)| {
            let mesh = node.mesh.as_ref()?;
            let world = node.world_matrix();

            let sphere = mesh.geometry.bounding_sphere().transform(world);
            ray.intersect_sphere(&sphere)?;

            if world.matrix3.determinant().abs() <= f32::EPSILON {
                return None;
            }
            // The local ray keeps the world parametrisation, so `t` is
            // already a world distance.
            let local = ray.transformed(&world.inverse());
            let t = mesh.geometry.mesh().raycast(&local)?;
            scene.is_visible_in_hierarchy(handle).then_some((handle, t))
        })
        .collect()
}
