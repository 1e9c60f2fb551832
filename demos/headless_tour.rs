//! Runs the diorama without a window: plays the intro at 60 Hz, orbits for
//! a few seconds, then clicks the merchant and browses the archive.
//!
//! ```sh
//! RUST_LOG=info cargo run --example headless_tour
//! ```

use diorama::assembly::bazaar::MERCHANT_HEAD;
use diorama::portal::{Card, PortalTab};
use diorama::scene::TargetId;
use diorama::status::HudStatus;
use diorama::{Camera, CanvasTextureSource, ControlMode, DioramaSettings, Experience, Overlay, RenderBackend, Scene, Viewport};

const FRAME: f32 = 1.0 / 60.0;

/// Counts frames and logs the camera once a second.
#[derive(Default)]
struct LogRenderer {
    frames: u64,
}

impl RenderBackend for LogRenderer {
    fn render(&mut self, scene: &Scene, camera: &Camera, _viewport: &Viewport) {
        self.frames += 1;
        if self.frames.is_multiple_of(60) {
            let p = camera.pose().position;
            log::info!(
                "frame {:>5}: {} nodes, camera at ({:.1}, {:.1}, {:.1})",
                self.frames,
                scene.len(),
                p.x,
                p.y,
                p.z
            );
        }
    }
}

struct PrintOverlay;

impl Overlay for PrintOverlay {
    fn beat_changed(&mut self, index: usize, text: &str) {
        println!("[{index}] {text}");
    }

    fn intro_ended(&mut self, skipped: bool) {
        println!("-- intro {} --", if skipped { "skipped" } else { "over" });
    }

    fn target_activated(&mut self, id: &TargetId) {
        println!("activated {id}");
    }

    fn portal_tab(&mut self, title: &str, tab: PortalTab, cards: &[Card]) {
        println!("{title} / {tab}");
        for card in cards {
            println!("  {} [{}]\n    {}", card.heading, card.tag, card.body);
        }
    }

    fn portal_closed(&mut self) {
        println!("archive closed");
    }

    fn status_changed(&mut self, status: &HudStatus) {
        log::debug!("{}", status.lines().join(" | "));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut experience = Experience::new(DioramaSettings::default(), &CanvasTextureSource, LogRenderer::default(), PrintOverlay)?;

    while experience.mode() == ControlMode::Scripted {
        experience.frame(FRAME);
    }
    for _ in 0..180 {
        experience.frame(FRAME);
    }

    let scene = experience.scene();
    let head = scene
        .find_by_name(MERCHANT_HEAD)
        .and_then(|handle| scene.get_node(handle))
        .map(|node| node.transform.world_position())
        .ok_or_else(|| anyhow::anyhow!("scene has no merchant"))?;
    let ndc = experience.camera().project(head);
    let viewport = experience.viewport();
    let (x, y) = ((ndc.x + 1.0) / 2.0 * viewport.width, (1.0 - ndc.y) / 2.0 * viewport.height);

    if experience.on_click(x, y).is_none() {
        println!("missed the merchant at ({x:.0}, {y:.0})");
        return Ok(());
    }
    for tab in [PortalTab::TechnicalStack, PortalTab::LegacyTrade] {
        experience.select_tab(tab);
    }
    for _ in 0..30 {
        experience.frame(FRAME);
    }
    experience.close_portal();

    println!("{} frames rendered", experience.renderer().frames);
    Ok(())
}
