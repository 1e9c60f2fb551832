//! Experience
//!
//! [`Experience`] is the orchestrator the external frame pump drives. It has
//! no window or GPU of its own: the pump calls [`frame`](Experience::frame)
//! once per display refresh and forwards input events to the `on_*`
//! handlers; drawing and UI are delegated to collaborators.
//!
//! # Collaborators
//!
//! - [`RenderBackend`]: draws the scene, called exactly once per frame after
//!   all animation mutation
//! - [`Overlay`]: receives discrete UI notifications and never feeds back
//! - [`OrbitController`]: drives the camera once the intro is over
//!
//! # Example
//!
//! ```rust,ignore
//! let mut experience = Experience::new(
//!     DioramaSettings::default(),
//!     &CanvasTextureSource,
//!     MyRenderer::new(),
//!     MyOverlay::default(),
//! )?;
//!
//! loop {
//!     experience.frame(dt);
//! }
//! ```

use std::sync::Arc;

use crate::animation::{AnimationScheduler, ControlMode, FrameContext, Tick};
use crate::assembly::Assembler;
use crate::controls::{OrbitControls, OrbitController, PointerButtons, PointerInput};
use crate::errors::Result;
use crate::interaction::{InteractionRouter, PickHit, Viewport};
use crate::narration::{NarrationEvent, NarrationSequencer};
use crate::portal::{Card, PORTAL_TITLE, Portal, PortalTab};
use crate::resources::catalog::PrimitiveCatalog;
use crate::resources::texture::TextureSource;
use crate::scene::{Camera, Scene, TargetId};
use crate::settings::DioramaSettings;
use crate::status::{HudStatus, StatusBeacon};

/// Draws a frame.
pub trait RenderBackend {
    fn render(&mut self, scene: &Scene, camera: &Camera, viewport: &Viewport);
}

impl RenderBackend for () {
    fn render(&mut self, _scene: &Scene, _camera: &Camera, _viewport: &Viewport) {}
}

/// UI notifications. Every method defaults to a no-op.
#[allow(unused_variables)]
pub trait Overlay {
    fn beat_changed(&mut self, index: usize, text: &str) {}

    /// Fade envelope of the caption on screen, sent every intro frame.
    fn beat_opacity(&mut self, opacity: f32) {}

    /// The intro is over. `skipped` tells an explicit skip from the natural end.
    fn intro_ended(&mut self, skipped: bool) {}

    fn target_activated(&mut self, id: &TargetId) {}

    /// The archive panel opened, or switched to another tab.
    fn portal_tab(&mut self, title: &str, tab: PortalTab, cards: &[Card]) {}

    fn portal_closed(&mut self) {}

    fn hover_changed(&mut self, hovering: bool) {}

    fn status_changed(&mut self, status: &HudStatus) {}
}

impl Overlay for () {}

pub struct Experience<R: RenderBackend, O: Overlay> {
    settings: DioramaSettings,

    scene: Scene,
    camera: Camera,
    viewport: Viewport,

    scheduler: AnimationScheduler,
    narration: NarrationSequencer,
    router: InteractionRouter,
    orbit: Box<dyn OrbitController>,
    input: PointerInput,

    portal: Portal,
    status: StatusBeacon,
    hovering: bool,

    renderer: R,
    overlay: O,
}

impl<R: RenderBackend, O: Overlay> Experience<R, O> {
    /// Builds the catalog and the scene, then places the camera at its
    /// starting pose. Fails on any invalid layout parameter.
    pub fn new(settings: DioramaSettings, source: &dyn TextureSource, renderer: R, overlay: O) -> Result<Self> {
        let catalog = Arc::new(PrimitiveCatalog::standard(source, settings.seed)?);
        let mut assembler = Assembler::new(catalog, settings.seed);
        let scene = assembler.build_scene(&settings.layout, &settings.atmosphere)?;

        let viewport = Viewport::default();
        let camera = settings.camera.build(viewport.aspect());
        let mut input = PointerInput::new();
        input.handle_resize(viewport.width, viewport.height);

        let scheduler = AnimationScheduler::new(
            settings.scheduler.clone(),
            settings.atmosphere.dust_volume,
            &scene,
            camera.pose(),
        );
        let narration = NarrationSequencer::new(settings.narration.clone());
        let orbit: Box<dyn OrbitController> = Box::new(OrbitControls::new(settings.orbit.clone()));
        let status = StatusBeacon::new(settings.status, settings.seed);

        log::info!("Experience ready (seed {})", settings.seed);
        Ok(Self {
            settings,
            scene,
            camera,
            viewport,
            scheduler,
            narration,
            router: InteractionRouter::new(viewport),
            orbit,
            input,
            portal: Portal::new(),
            status,
            hovering: false,
            renderer,
            overlay,
        })
    }

    /// Replaces the free-camera collaborator, keeping the current camera
    /// position.
    #[must_use]
    pub fn with_orbit_controller(mut self, mut orbit: Box<dyn OrbitController>) -> Self {
        orbit.sync(&self.camera.pose());
        self.orbit = orbit;
        self
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advances everything by `dt` seconds and renders once.
    pub fn frame(&mut self, dt: f32) -> Tick {
        let tick = self.scheduler.tick(
            dt,
            FrameContext {
                scene: &mut self.scene,
                narration: &mut self.narration,
                orbit: self.orbit.as_mut(),
                input: &self.input,
            },
        );
        self.camera.set_pose(tick.pose);

        match tick.narration {
            Some(NarrationEvent::BeatStarted(index)) => {
                if let Some((_, beat)) = self.narration.current() {
                    self.overlay.beat_changed(index, &beat.text);
                }
            }
            Some(NarrationEvent::Completed) | None => {}
        }
        if self.narration.current().is_some() {
            self.overlay.beat_opacity(self.narration.opacity());
        }
        if tick.entered_free {
            self.overlay.intro_ended(false);
        }

        if let Some(status) = self.status.tick() {
            self.overlay.status_changed(status);
        }

        self.renderer.render(&self.scene, &self.camera, &self.viewport);
        self.input.end_frame();
        tick
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Activates the interactive target under the pointer, if any.
    ///
    /// Works during the intro as well. Activation tilts the target's
    /// reaction part, opens the archive and stops auto-rotation.
    pub fn on_click(&mut self, x: f32, y: f32) -> Option<TargetId> {
        let PickHit {
            target_node, target, ..
        } = self.router.pick_hit(x, y, &self.camera, &self.scene)?;

        log::info!("Activated target '{}'", target.id);
        self.orbit.set_auto_rotate(false);
        self.scheduler.trigger_reaction(&mut self.scene, target_node);

        self.overlay.target_activated(&target.id);
        self.portal.open();
        self.overlay.portal_tab(PORTAL_TITLE, self.portal.tab(), self.portal.cards());
        Some(target.id)
    }

    /// Tracks the cursor; in free mode also updates hover feedback.
    /// Returns whether an interactive target is under the pointer.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.input.handle_cursor_move(x, y);
        let hovering =
            self.scheduler.mode() == ControlMode::Free && self.router.hover(x, y, &self.camera, &self.scene);
        if hovering != self.hovering {
            self.hovering = hovering;
            self.overlay.hover_changed(hovering);
        }
        hovering
    }

    pub fn on_pointer_button(&mut self, button: PointerButtons, pressed: bool) {
        self.input.handle_button(button, pressed);
    }

    pub fn on_wheel(&mut self, delta: f32) {
        self.input.handle_wheel(delta);
    }

    /// Idempotent; degenerate sizes are ignored.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        if self.router.resize(width, height) {
            self.viewport = self.router.viewport();
            self.camera.set_aspect(self.viewport.aspect());
            self.input.handle_resize(width, height);
            log::debug!("Viewport resized to {width}x{height}");
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Ends the intro now. Returns false if it was already over.
    pub fn skip_intro(&mut self) -> bool {
        let skipped = self.scheduler.skip_intro(&mut self.narration, self.orbit.as_mut());
        if skipped {
            self.overlay.intro_ended(true);
        }
        skipped
    }

    /// Closes the archive and resumes auto-rotation.
    pub fn close_portal(&mut self) -> bool {
        if !self.portal.close() {
            return false;
        }
        self.orbit.set_auto_rotate(true);
        self.overlay.portal_closed();
        true
    }

    pub fn select_tab(&mut self, tab: PortalTab) -> bool {
        if !self.portal.select(tab) {
            return false;
        }
        self.overlay.portal_tab(PORTAL_TITLE, tab, tab.cards());
        true
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.orbit.set_auto_rotate(enabled);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn settings(&self) -> &DioramaSettings {
        &self.settings
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn mode(&self) -> ControlMode {
        self.scheduler.mode()
    }

    #[must_use]
    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn narration(&self) -> &NarrationSequencer {
        &self.narration
    }

    #[must_use]
    pub fn router(&self) -> &InteractionRouter {
        &self.router
    }

    #[must_use]
    pub fn portal(&self) -> &Portal {
        &self.portal
    }

    #[must_use]
    pub fn status(&self) -> &HudStatus {
        self.status.status()
    }

    #[must_use]
    pub fn auto_rotate(&self) -> bool {
        self.orbit.auto_rotate()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }
}
