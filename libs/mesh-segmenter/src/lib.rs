//! # Mesh Segmenter
//!
//! Splits a triangle mesh into planar patches: maximal groups of
//! vertex-connected faces whose normals agree within an angular tolerance.
//!
//! ## Architecture
//!
//! ```text
//! TriangleMesh → cluster (normals) → bucket (faces) → graph (adjacency)
//!              → segments (components) → Vec<TriangleMesh>
//! ```
//!
//! ## Parallelism
//!
//! Every data-parallel phase runs on the rayon global pool. Results are
//! collected in input order, so a given mesh and worker count always give
//! the same segments, numbered the same way.
//!
//! ## Usage
//!
//! ```rust
//! use mesh_segmenter::{segment_mesh, SegmenterConfig};
//! use mesh_segmenter::primitives::create_cube;
//! use glam::DVec3;
//!
//! let cube = create_cube(DVec3::splat(2.0), true).unwrap();
//! let faces = segment_mesh(&cube, SegmenterConfig::default()).unwrap();
//! assert_eq!(faces.len(), 6);
//! assert!(faces.iter().all(|f| f.triangle_count() == 2));
//! ```

pub mod bucket;
pub mod cluster;
pub mod colormap;
pub mod error;
pub mod graph;
pub mod mesh;
pub mod model;
pub mod primitives;
pub mod segmenter;
pub mod segments;
pub mod timer;

mod partition;

pub use config::constants::{
    BucketingStrategy, ConfigError, DegenerateFacePolicy, GraphBackend, SegmenterConfig,
};
pub use error::{MeshError, SegmentError, SegmentResult};
pub use mesh::{Material, Triangle, TriangleMesh};
pub use model::Model;
pub use segmenter::{segment_mesh, Segmenter};
pub use timer::{NoopTimer, Phase, PhaseStopwatch, PhaseTimer};
