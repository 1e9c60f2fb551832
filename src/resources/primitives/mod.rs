//! Primitive tessellators.
//!
//! Each generator returns an indexed, counter-clockwise [`MeshData`] centred
//! on the local origin, following the three.js conventions the diorama's
//! dimensions were authored against.
//!
//! [`MeshData`]: crate::resources::geometry::MeshData

pub mod box_shape;
pub mod circle;
pub mod cylinder;
pub mod extrude;
pub mod plane;
pub mod polyhedron;
pub mod sphere;
pub mod torus;
pub mod tube;

pub use box_shape::create_box;
pub use circle::create_circle;
pub use cylinder::{CylinderOptions, create_cylinder};
pub use extrude::create_extruded_star;
pub use plane::create_plane;
pub use polyhedron::create_dodecahedron;
pub use sphere::create_sphere;
pub use torus::{TorusOptions, create_torus};
pub use tube::create_tube;
