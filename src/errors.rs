//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! Every variant of [`DioramaError`] is a configuration error: it is raised
//! while the scene is being assembled and aborts the build with a clear
//! diagnostic. Nothing that happens during a frame is reported through this
//! type:
//!
//! - a picking ray that misses everything is simply `None`,
//! - a malformed frame delta is clamped and logged by the scheduler.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, DioramaError>`.
//!
//! ```rust,ignore
//! use diorama::errors::Result;
//!
//! fn build() -> Result<()> {
//!     let tower = assembler.build_minaret(Vec3::new(-8.0, 0.0, -8.0))?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::resources::appearance::AppearanceRole;

/// The main error type for the diorama core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DioramaError {
    // ========================================================================
    // Catalog Errors
    // ========================================================================
    /// A role label did not name any appearance preset.
    #[error("Unknown appearance role: {0}")]
    UnknownRole(String),

    /// A catalog was built without a preset for this role.
    #[error("Appearance catalog has no preset for role '{0}'")]
    MissingRole(AppearanceRole),

    // ========================================================================
    // Assembly Errors
    // ========================================================================
    /// An assembly function received a size, count or position it cannot use.
    #[error("Invalid parameter for {feature}: {parameter} = {value}")]
    InvalidParameter {
        /// The feature being assembled (e.g. "riad")
        feature: &'static str,
        /// Name of the offending parameter
        parameter: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Two placed features claim intersecting ground footprints.
    #[error("Footprints overlap: '{first}' and '{second}'")]
    PlacementOverlap {
        /// Label of the first footprint
        first: String,
        /// Label of the second footprint
        second: String,
    },

    /// A feature footprint extends past the edge of the plinth.
    #[error("Footprint '{0}' extends beyond the plinth")]
    OffPlinth(String),

    // ========================================================================
    // Scene Graph Errors
    // ========================================================================
    /// A hierarchy edit would break the tree shape of the scene.
    #[error("Invalid attach: {0}")]
    InvalidAttach(String),
}

/// Alias for `Result<T, DioramaError>`.
pub type Result<T> = std::result::Result<T, DioramaError>;
