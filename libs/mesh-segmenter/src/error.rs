//! # Segmentation Errors
//!
//! Error types for mesh handling and the segmentation pipeline.
//!
//! ## Error Policy
//!
//! - Bad configuration and malformed input are reported, never patched up
//! - Internal invariant violations surface as explicit errors
//! - No retries and no partial results

use config::constants::ConfigError;
use thiserror::Error;

/// Errors raised by [`TriangleMesh`](crate::TriangleMesh) checks and builders.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A triangle references a vertex that does not exist.
    #[error("Triangle {triangle} references vertex {index} (vertex count: {vertex_count})")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    Degenerate { message: String },
}

impl MeshError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate {
            message: message.into(),
        }
    }
}

/// Errors that can occur while segmenting a mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SegmentError {
    /// Rejected configuration.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Malformed input mesh.
    #[error("Invalid mesh: {0}")]
    Mesh(#[from] MeshError),

    /// A zero-area face was found while degenerate faces are rejected.
    #[error("Face {face} is degenerate and has no normal")]
    DegenerateFace { face: usize },

    /// An adjacency list points past the end of its bucket.
    #[error("Triangle {triangle} lists neighbor {neighbor} outside the graph (len: {len})")]
    AdjacencyOutOfRange {
        triangle: usize,
        neighbor: usize,
        len: usize,
    },

    /// Capability that exists only as an interface for now.
    #[error("Unsupported: {operation}")]
    Unsupported { operation: String },
}

impl SegmentError {
    /// Creates an unsupported operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }
}

/// Result type alias for segmentation operations.
pub type SegmentResult<T> = Result<T, SegmentError>;
