//! Animation
//!
//! Per-frame driving of everything that moves:
//! - FrameClock: sanitised frame deltas and elapsed time
//! - ScriptedPath: the intro camera orbit
//! - AnimationState: clock, control mode and camera pose
//! - AnimationScheduler: narration hand-over, motions, water and reactions

pub mod camera_path;
pub mod clock;
pub mod scheduler;
pub mod state;

pub use camera_path::ScriptedPath;
pub use clock::{FrameClock, TimingAnomaly};
pub use scheduler::{AnimationScheduler, DustSettings, FrameContext, SchedulerSettings, Tick, step_dust};
pub use state::{AnimationState, ControlMode};
