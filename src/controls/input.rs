use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// Pointer buttons currently held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PointerButtons: u8 {
        /// Rotates the orbit camera.
        const PRIMARY   = 1 << 0;
        /// Pans the orbit target.
        const SECONDARY = 1 << 1;
        const MIDDLE    = 1 << 2;
    }
}

/// Pointer state accumulated between frames.
///
/// Event handlers write into it; the orbit controller reads it once per
/// frame and [`end_frame`](Self::end_frame) clears the per-frame deltas.
#[derive(Default, Debug, Clone)]
pub struct PointerInput {
    /// Cursor position in viewport pixels, origin top-left.
    pub cursor_position: Vec2,
    /// Cursor movement since the last frame.
    pub cursor_delta: Vec2,
    /// Wheel movement since the last frame; positive zooms in.
    pub scroll_delta: f32,
    pub screen_size: Vec2,
    pub buttons: PointerButtons,
    has_cursor: bool,
}

impl PointerInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears per-frame deltas so released drags stop rotating.
    pub fn end_frame(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    pub fn handle_resize(&mut self, width: f32, height: f32) {
        self.screen_size = Vec2::new(width, height);
    }

    pub fn handle_cursor_move(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        // The first event only establishes where the cursor is.
        if self.has_cursor {
            self.cursor_delta += position - self.cursor_position;
        }
        self.cursor_position = position;
        self.has_cursor = true;
    }

    pub fn handle_button(&mut self, button: PointerButtons, pressed: bool) {
        self.buttons.set(button, pressed);
    }

    pub fn handle_wheel(&mut self, delta: f32) {
        if delta.is_finite() {
            self.scroll_delta += delta;
        }
    }

    #[inline]
    #[must_use]
    pub fn is_pressed(&self, button: PointerButtons) -> bool {
        self.buttons.contains(button)
    }

    /// True while any button is held, i.e. the user is steering the camera.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !self.buttons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_move_has_no_delta() {
        let mut input = PointerInput::new();
        input.handle_cursor_move(100.0, 50.0);
        assert_eq!(input.cursor_delta, Vec2::ZERO);
        input.handle_cursor_move(110.0, 45.0);
        assert_eq!(input.cursor_delta, Vec2::new(10.0, -5.0));
        input.end_frame();
        assert_eq!(input.cursor_delta, Vec2::ZERO);
    }

    #[test]
    fn buttons_track_press_and_release() {
        let mut input = PointerInput::new();
        input.handle_button(PointerButtons::SECONDARY, true);
        assert!(input.is_pressed(PointerButtons::SECONDARY));
        assert!(input.is_dragging());
        input.handle_button(PointerButtons::SECONDARY, false);
        assert!(!input.is_dragging());
    }
}
