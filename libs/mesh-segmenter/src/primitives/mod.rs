//! # Primitives
//!
//! Small reference meshes (box, quad) with known planar structure.

pub mod cube;
pub mod quad;

pub use cube::create_cube;
pub use quad::create_quad;
