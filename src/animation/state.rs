use crate::animation::clock::FrameClock;
use crate::scene::CameraPose;

/// Who drives the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// The intro path; initial.
    #[default]
    Scripted,
    /// Orbit controls; terminal.
    Free,
}

/// Per-experience animation state, mutated only by the scheduler.
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub clock: FrameClock,
    mode: ControlMode,
    pub camera: CameraPose,
    /// Beat on screen during the intro.
    pub narration_index: Option<usize>,
}

impl AnimationState {
    #[must_use]
    pub fn new(clock: FrameClock, camera: CameraPose) -> Self {
        Self {
            clock,
            mode: ControlMode::Scripted,
            camera,
            narration_index: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed_secs()
    }

    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count
    }

    /// Switches to free mode. Returns false if already there; the switch
    /// never goes back.
    pub fn enter_free_mode(&mut self) -> bool {
        if self.mode == ControlMode::Free {
            return false;
        }
        self.mode = ControlMode::Free;
        self.narration_index = None;
        true
    }
}
