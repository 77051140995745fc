//! # Face-Adjacency Graphs
//!
//! Vertex-adjacency between the triangles of one bucket. Two triangles are
//! adjacent when they share at least one vertex position (exact float
//! equality, inherited from upstream deduplication).
//!
//! ## Construction
//!
//! 1. Map every vertex position to the triangles incident on it.
//! 2. For each triangle, union the incidence lists of its three vertices,
//!    excluding itself.
//!
//! ## Variants
//!
//! - [`HostFaceGraph`] - baseline
//! - [`DeviceFaceGraph`] - same adjacency, carries a vertex-count hint for a
//!   device-resident traversal that does not exist yet
//!
//! The driver only sees the [`FaceGraph`] trait, so a device-backed variant
//! can replace the host one without touching it.

mod device;
mod host;


pub use device::DeviceFaceGraph;
pub use host::HostFaceGraph;

use config::constants::GraphBackend;
use hashbrown::HashMap;
use rayon::prelude::*;

use crate::error::SegmentResult;
use crate::mesh::{Triangle, VertexKey};
use crate::segments::{extract, SegmentUnion};

/// Common interface of the face-graph variants.
pub trait FaceGraph: Send + Sync {
    /// Triangles of the bucket, indexed like the adjacency lists.
    fn triangles(&self) -> &[Triangle];

    /// Adjacency list per triangle.
    fn adjacency(&self) -> &[Vec<usize>];

    /// Neighbors of one triangle. Empty when out of range.
    fn neighbors(&self, triangle: usize) -> &[usize] {
        self.adjacency()
            .get(triangle)
            .map_or(&[], Vec::as_slice)
    }

    /// Number of triangles.
    fn len(&self) -> usize {
        self.adjacency().len()
    }

    /// Returns true for an empty bucket.
    fn is_empty(&self) -> bool {
        self.adjacency().is_empty()
    }

    /// Labels connected components.
    fn segment_union(&self) -> SegmentResult<SegmentUnion> {
        extract(self.adjacency())
    }

    /// Triangles grouped by connected component.
    fn segments(&self) -> SegmentResult<Vec<Vec<Triangle>>>;
}

/// Builds the graph variant selected by `backend`.
///
/// `vertex_hint` is only read by the device variant.
pub fn build_face_graph(
    backend: GraphBackend,
    triangles: Vec<Triangle>,
    vertex_hint: usize,
) -> Box<dyn FaceGraph> {
    match backend {
        GraphBackend::Host => Box::new(HostFaceGraph::build(triangles)),
        GraphBackend::Device => Box::new(DeviceFaceGraph::build(triangles, vertex_hint)),
    }
}

/// Vertex position to incident triangle indices (ascending).
pub(crate) fn vertex_to_triangles(triangles: &[Triangle]) -> HashMap<VertexKey, Vec<usize>> {
    let mut incidence: HashMap<VertexKey, Vec<usize>> =
        HashMap::with_capacity(triangles.len());
    for (index, triangle) in triangles.iter().enumerate() {
        for &position in triangle.vertices() {
            let list = incidence.entry(VertexKey::from(position)).or_default();
            if list.last() != Some(&index) {
                list.push(index);
            }
        }
    }
    incidence
}

/// Per-triangle adjacency derived from the incidence map.
///
/// Lists are sorted and deduplicated; a triangle never lists itself.
pub(crate) fn adjacent_triangles(
    incidence: &HashMap<VertexKey, Vec<usize>>,
    triangles: &[Triangle],
) -> Vec<Vec<usize>> {
    triangles
        .par_iter()
        .enumerate()
        .map(|(index, triangle)| {
            let mut adjacent = Vec::new();
            for &position in triangle.vertices() {
                if let Some(incident) = incidence.get(&VertexKey::from(position)) {
                    adjacent.extend(incident.iter().copied().filter(|&other| other != index));
                }
            }
            adjacent.sort_unstable();
            adjacent.dedup();
            adjacent
        })
        .collect()
}

/// Groups triangles by the labels of `union`.
pub(crate) fn group_triangles(triangles: &[Triangle], union: &SegmentUnion) -> Vec<Vec<Triangle>> {
    union
        .groups()
        .into_iter()
        .map(|group| group.into_iter().map(|index| triangles[index]).collect())
        .collect()
}
