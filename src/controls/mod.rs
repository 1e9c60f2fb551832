//! Camera controls
//!
//! - [`PointerInput`]: pointer state accumulated from input events
//! - [`OrbitController`]: the free-camera seam used after the intro
//! - [`OrbitControls`]: damped spherical orbit implementing it

pub mod input;
pub mod orbit;

pub use input::{PointerButtons, PointerInput};
pub use orbit::{OrbitControls, OrbitController, OrbitSettings};
