use std::sync::Arc;

use crate::resources::appearance::Appearance;
use crate::resources::geometry::Geometry;

/// A drawable: shared geometry plus shared appearance.
///
/// Both halves are mandatory, so a node either renders something complete or
/// carries no mesh at all and acts as a pure group.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Arc<Geometry>,
    pub appearance: Arc<Appearance>,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: Arc<Geometry>, appearance: Arc<Appearance>) -> Self {
        Self {
            geometry,
            appearance,
            cast_shadows: false,
            receive_shadows: false,
        }
    }

    #[must_use]
    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadows = cast;
        self.receive_shadows = receive;
        self
    }
}
