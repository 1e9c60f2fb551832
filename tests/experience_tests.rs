//! Experience orchestration tests
//!
//! Tests for:
//! - The renderer is called exactly once per frame
//! - Overlay notification order over the intro
//! - Skip intro, click activation, portal tabs and close
//! - Hover feedback only in free mode
//! - Resize handling

use diorama::animation::ControlMode;
use diorama::assembly::AtmosphereSettings;
use diorama::assembly::bazaar::MERCHANT_HEAD;
use diorama::experience::{Experience, Overlay, RenderBackend};
use diorama::interaction::Viewport;
use diorama::narration::{Beat, NarrationSettings};
use diorama::portal::{Card, PORTAL_TITLE, PortalTab};
use diorama::resources::CanvasTextureSource;
use diorama::scene::{Camera, Scene, TargetId};
use diorama::settings::DioramaSettings;
use diorama::status::HudStatus;

// ============================================================================
// Helper
// ============================================================================

#[derive(Default)]
struct CountingRenderer {
    frames: usize,
    node_count: usize,
}

impl RenderBackend for CountingRenderer {
    fn render(&mut self, scene: &Scene, _camera: &Camera, _viewport: &Viewport) {
        self.frames += 1;
        self.node_count = scene.len();
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Note {
    Beat(usize, String),
    IntroEnded { skipped: bool },
    Activated(TargetId),
    Tab(PortalTab),
    Closed,
    Hover(bool),
}

#[derive(Default)]
struct Recorder {
    notes: Vec<Note>,
    opacity_updates: usize,
    status_updates: usize,
}

impl Overlay for Recorder {
    fn beat_changed(&mut self, index: usize, text: &str) {
        self.notes.push(Note::Beat(index, text.to_string()));
    }

    fn beat_opacity(&mut self, opacity: f32) {
        assert!((0.0..=1.0).contains(&opacity));
        self.opacity_updates += 1;
    }

    fn intro_ended(&mut self, skipped: bool) {
        self.notes.push(Note::IntroEnded { skipped });
    }

    fn target_activated(&mut self, id: &TargetId) {
        self.notes.push(Note::Activated(id.clone()));
    }

    fn portal_tab(&mut self, title: &str, tab: PortalTab, cards: &[Card]) {
        assert_eq!(title, PORTAL_TITLE);
        assert_eq!(cards, tab.cards());
        self.notes.push(Note::Tab(tab));
    }

    fn portal_closed(&mut self) {
        self.notes.push(Note::Closed);
    }

    fn hover_changed(&mut self, hovering: bool) {
        self.notes.push(Note::Hover(hovering));
    }

    fn status_changed(&mut self, _status: &HudStatus) {
        self.status_updates += 1;
    }
}

type TestExperience = Experience<CountingRenderer, Recorder>;

fn settings() -> DioramaSettings {
    DioramaSettings {
        seed: 21,
        atmosphere: AtmosphereSettings {
            star_attempts: 40,
            cloud_count: 2,
            dust_count: 20,
            ..AtmosphereSettings::default()
        },
        narration: NarrationSettings {
            start_delay: 0.1,
            fade_in: 0.05,
            fade_out: 0.05,
            beats: vec![Beat::new("first", 0.2), Beat::new("second", 0.2)],
        },
        ..DioramaSettings::default()
    }
}

fn experience() -> TestExperience {
    Experience::new(settings(), &CanvasTextureSource, CountingRenderer::default(), Recorder::default()).unwrap()
}

/// Pixel position of the merchant's head under the current camera.
fn merchant_pixel(exp: &TestExperience) -> (f32, f32) {
    let scene = exp.scene();
    let head = scene.find_by_name(MERCHANT_HEAD).unwrap();
    let world = scene.get_node(head).unwrap().transform.world_position();
    let ndc = exp.camera().project(world);
    let viewport = exp.viewport();
    (
        (ndc.x + 1.0) / 2.0 * viewport.width,
        (1.0 - ndc.y) / 2.0 * viewport.height,
    )
}

// ============================================================================
// Frames
// ============================================================================

#[test]
fn renderer_runs_once_per_frame() {
    let mut exp = experience();
    assert_eq!(exp.renderer().frames, 0);
    for dt in [1.0 / 60.0, -1.0, f32::NAN, 5.0, 0.0] {
        exp.frame(dt);
    }
    assert_eq!(exp.renderer().frames, 5);
    assert_eq!(exp.renderer().node_count, exp.scene().len());
}

#[test]
fn intro_notifications_arrive_in_order() {
    let mut exp = experience();
    let mut frames = 0;
    while exp.mode() == ControlMode::Scripted {
        exp.frame(0.05);
        frames += 1;
        assert!(frames < 200, "intro never ended");
    }

    assert_eq!(
        exp.overlay().notes,
        [
            Note::Beat(0, "first".into()),
            Note::Beat(1, "second".into()),
            Note::IntroEnded { skipped: false },
        ]
    );
    assert!(exp.overlay().opacity_updates > 0);
    assert_eq!(exp.renderer().frames, frames);
}

#[test]
fn skip_intro_notifies_once() {
    let mut exp = experience();
    exp.frame(0.15);
    assert!(exp.skip_intro());
    assert!(!exp.skip_intro());
    exp.frame(0.05);

    let ended: Vec<_> = exp
        .overlay()
        .notes
        .iter()
        .filter(|n| matches!(n, Note::IntroEnded { .. }))
        .collect();
    assert_eq!(ended, [&Note::IntroEnded { skipped: true }]);
    assert_eq!(exp.mode(), ControlMode::Free);
}

// ============================================================================
// Clicks & portal
// ============================================================================

#[test]
fn clicking_the_merchant_opens_the_archive() {
    let mut exp = experience();
    assert!(exp.auto_rotate());

    let (x, y) = merchant_pixel(&exp);
    assert_eq!(exp.on_click(x, y), Some(TargetId::MERCHANT));
    assert!(!exp.auto_rotate());
    assert!(exp.portal().is_open());
    assert_eq!(exp.portal().tab(), PortalTab::Overview);
    assert!(exp.scheduler().has_pending_reaction());

    assert_eq!(
        exp.overlay().notes,
        [Note::Activated(TargetId::MERCHANT), Note::Tab(PortalTab::Overview)]
    );

    assert!(exp.select_tab(PortalTab::TechnicalStack));
    assert!(!exp.select_tab(PortalTab::TechnicalStack));

    assert!(exp.close_portal());
    assert!(!exp.close_portal());
    assert!(exp.auto_rotate());
    assert_eq!(
        &exp.overlay().notes[2..],
        [Note::Tab(PortalTab::TechnicalStack), Note::Closed]
    );
}

#[test]
fn clicking_empty_sky_changes_nothing() {
    let mut exp = experience();
    assert_eq!(exp.on_click(2.0, 2.0), None);
    assert!(exp.auto_rotate());
    assert!(!exp.portal().is_open());
    assert!(!exp.select_tab(PortalTab::LegacyTrade));
    assert!(exp.overlay().notes.is_empty());
}

#[test]
fn head_restores_after_the_reaction() {
    let mut exp = experience();
    let head = exp.scene().find_by_name(MERCHANT_HEAD).unwrap();
    let rest = exp.scene().get_node(head).unwrap().transform.rotation;

    let (x, y) = merchant_pixel(&exp);
    exp.on_click(x, y);
    assert_ne!(exp.scene().get_node(head).unwrap().transform.rotation, rest);

    for _ in 0..30 {
        exp.frame(1.0 / 60.0);
    }
    assert!(!exp.scheduler().has_pending_reaction());
    assert_eq!(exp.scene().get_node(head).unwrap().transform.rotation, rest);
}

// ============================================================================
// Hover
// ============================================================================

#[test]
fn hover_feedback_waits_for_free_mode() {
    let mut exp = experience();
    let (x, y) = merchant_pixel(&exp);
    assert!(!exp.on_pointer_move(x, y));

    exp.skip_intro();
    exp.frame(0.0);
    let (x, y) = merchant_pixel(&exp);
    assert!(exp.on_pointer_move(x, y));
    assert!(exp.on_pointer_move(x, y));
    assert!(!exp.on_pointer_move(2.0, 2.0));

    let hovers: Vec<_> = exp
        .overlay()
        .notes
        .iter()
        .filter(|n| matches!(n, Note::Hover(_)))
        .cloned()
        .collect();
    assert_eq!(hovers, [Note::Hover(true), Note::Hover(false)]);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_updates_viewport_and_aspect() {
    let mut exp = experience();
    exp.on_resize(1024.0, 768.0);
    assert_eq!(exp.viewport(), Viewport::new(1024.0, 768.0));
    assert!((exp.camera().aspect - 1024.0 / 768.0).abs() < 1e-6);

    exp.on_resize(0.0, 0.0);
    assert_eq!(exp.viewport(), Viewport::new(1024.0, 768.0));
}

#[test]
fn same_seed_same_status_flicker() {
    let mut a = experience();
    let mut b = experience();
    for _ in 0..200 {
        a.frame(1.0 / 60.0);
        b.frame(1.0 / 60.0);
    }
    assert_eq!(a.overlay().status_updates, b.overlay().status_updates);
    assert_eq!(a.status(), b.status());
}
