use tracing::trace;

use super::{adjacent_triangles, vertex_to_triangles, FaceGraph};
use crate::error::{SegmentError, SegmentResult};
use crate::mesh::Triangle;

/// Face graph prepared for a device-offloaded traversal.
///
/// Adjacency is computed on the host exactly like [`HostFaceGraph`]
/// (identical result). The vertex-count hint is kept to size device buffers
/// once an offloaded traversal exists; until then [`segment_union`] runs the
/// host DFS and [`segments`] reports [`SegmentError::Unsupported`].
///
/// [`HostFaceGraph`]: super::HostFaceGraph
/// [`segment_union`]: FaceGraph::segment_union
/// [`segments`]: FaceGraph::segments
#[derive(Debug, Clone)]
pub struct DeviceFaceGraph {
    triangles: Vec<Triangle>,
    adjacency: Vec<Vec<usize>>,
    total_vertex_count: usize,
}

impl DeviceFaceGraph {
    /// Builds the adjacency for one bucket, recording the expected total
    /// vertex count. The hint does not influence the adjacency.
    pub fn build(triangles: Vec<Triangle>, total_vertex_count: usize) -> Self {
        let incidence = vertex_to_triangles(&triangles);
        let adjacency = adjacent_triangles(&incidence, &triangles);
        trace!(
            triangles = triangles.len(),
            vertices = incidence.len(),
            vertex_hint = total_vertex_count,
            "Built device face graph"
        );
        Self {
            triangles,
            adjacency,
            total_vertex_count,
        }
    }

    /// Expected total vertex count passed at construction.
    pub fn vertex_count_hint(&self) -> usize {
        self.total_vertex_count
    }
}

impl FaceGraph for DeviceFaceGraph {
    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    fn segments(&self) -> SegmentResult<Vec<Vec<Triangle>>> {
        Err(SegmentError::unsupported(
            "device-offloaded segment retrieval",
        ))
    }
}
