use tracing::trace;

use super::{adjacent_triangles, group_triangles, vertex_to_triangles, FaceGraph};
use crate::error::SegmentResult;
use crate::mesh::Triangle;

/// Baseline face graph: host adjacency and host traversal.
///
/// # Example
///
/// ```rust
/// use mesh_segmenter::graph::{FaceGraph, HostFaceGraph};
/// use mesh_segmenter::Triangle;
/// use glam::DVec3;
///
/// let a = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y);
/// let b = Triangle::new(DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y);
/// let graph = HostFaceGraph::build(vec![a, b]);
/// assert_eq!(graph.neighbors(0), &[1]);
/// assert_eq!(graph.segments().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct HostFaceGraph {
    triangles: Vec<Triangle>,
    adjacency: Vec<Vec<usize>>,
}

impl HostFaceGraph {
    /// Builds the adjacency for one bucket.
    pub fn build(triangles: Vec<Triangle>) -> Self {
        let incidence = vertex_to_triangles(&triangles);
        let adjacency = adjacent_triangles(&incidence, &triangles);
        trace!(
            triangles = triangles.len(),
            vertices = incidence.len(),
            "Built host face graph"
        );
        Self {
            triangles,
            adjacency,
        }
    }
}

impl FaceGraph for HostFaceGraph {
    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    fn segments(&self) -> SegmentResult<Vec<Vec<Triangle>>> {
        let union = self.segment_union()?;
        Ok(group_triangles(&self.triangles, &union))
    }
}
