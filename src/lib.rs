#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod assembly;
pub mod controls;
pub mod errors;
pub mod experience;
pub mod interaction;
pub mod narration;
pub mod portal;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod status;

pub use animation::{AnimationScheduler, ControlMode, FrameClock, ScriptedPath, SchedulerSettings};
pub use assembly::{Assembler, AtmosphereSettings, SiteLayout};
pub use controls::{OrbitControls, OrbitController, PointerInput};
pub use errors::{DioramaError, Result};
pub use experience::{Experience, Overlay, RenderBackend};
pub use interaction::{InteractionRouter, PickHit, Viewport};
pub use narration::{Beat, NarrationSequencer, NarrationSettings};
pub use resources::{Appearance, AppearanceRole, CanvasTextureSource, Geometry, Mesh, PrimitiveCatalog, Shape};
pub use scene::{Camera, CameraPose, Node, NodeHandle, NodeTags, Scene};
pub use settings::DioramaSettings;
