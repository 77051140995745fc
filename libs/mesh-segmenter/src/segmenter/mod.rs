//! # Segmentation Driver
//!
//! Runs the full pipeline on one mesh:
//!
//! ```text
//! faces -> normals -> cluster map -> buckets -> face graph per bucket
//!       -> segment labels -> one TriangleMesh per segment -> colors
//! ```
//!
//! Every phase except the per-bucket loop is data-parallel on the rayon
//! pool. Buckets are processed one after another; the graph and labels of a
//! bucket are dropped before the next bucket starts.


use config::constants::{
    DegenerateFacePolicy, SegmenterConfig, SEGMENT_AMBIENT, SEGMENT_MATERIAL_PREFIX,
    SEGMENT_NAME_INFIX, SEGMENT_SPECULAR,
};
use glam::DVec3;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::bucket::bucket_triangles;
use crate::cluster::cluster_normals;
use crate::colormap::jet;
use crate::error::{SegmentError, SegmentResult};
use crate::graph::build_face_graph;
use crate::mesh::{Material, Triangle, TriangleMesh};
use crate::segments::SegmentUnion;
use crate::timer::{NoopTimer, Phase, PhaseTimer};

/// Splits meshes into planar segments with a fixed configuration.
///
/// # Example
///
/// ```rust
/// use config::constants::SegmenterConfig;
/// use mesh_segmenter::primitives::create_cube;
/// use mesh_segmenter::timer::NoopTimer;
/// use mesh_segmenter::Segmenter;
/// use glam::DVec3;
///
/// let cube = create_cube(DVec3::ONE, false).unwrap();
/// let segmenter = Segmenter::new(SegmenterConfig::default()).unwrap();
/// let segments = segmenter.segment(&cube, &mut NoopTimer).unwrap();
/// assert_eq!(segments.len(), 6);
/// assert_eq!(segments[0].name, "cube_seg_0");
/// ```
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    /// Creates a segmenter, validating the configuration.
    pub fn new(config: SegmenterConfig) -> SegmentResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segments `mesh`, reporting phase boundaries to `timer`.
    ///
    /// The input mesh is not modified. Output meshes are named
    /// `<mesh.name>_seg_<n>` with material `sub_materials_<n>`, `n` counting
    /// up across all buckets.
    ///
    /// # Errors
    ///
    /// - [`SegmentError::Mesh`] when an index is out of range
    /// - [`SegmentError::DegenerateFace`] under [`DegenerateFacePolicy::Reject`]
    /// - [`SegmentError::AdjacencyOutOfRange`] on an internal invariant breach
    pub fn segment(
        &self,
        mesh: &TriangleMesh,
        timer: &mut dyn PhaseTimer,
    ) -> SegmentResult<Vec<TriangleMesh>> {
        timer.start(Phase::Total);
        let result = self.run(mesh, timer);
        timer.stop(Phase::Total);
        result
    }

    fn run(
        &self,
        mesh: &TriangleMesh,
        timer: &mut dyn PhaseTimer,
    ) -> SegmentResult<Vec<TriangleMesh>> {
        mesh.validate()?;
        let tolerance = self.config.tolerance_degrees;
        let workers = self.config.workers;

        info!(
            mesh = %mesh.name,
            faces = mesh.triangle_count(),
            vertices = mesh.vertex_count(),
            tolerance,
            "Starting planar segmentation"
        );
        if mesh.is_empty() {
            return Ok(Vec::new());
        }

        timer.start(Phase::Preprocessing);

        timer.start(Phase::NormalComputation);
        let normals = self.face_normals(mesh)?;
        timer.stop(Phase::NormalComputation);

        timer.start(Phase::MapCount);
        let present: Vec<DVec3> = normals.iter().flatten().copied().collect();
        let clusters = cluster_normals(&present, tolerance, workers);
        timer.stop(Phase::MapCount);
        debug!(clusters = clusters.len(), "Map count done");

        timer.start(Phase::NormalMapInsertion);
        let buckets = bucket_triangles(
            mesh,
            &normals,
            &clusters,
            tolerance,
            self.config.bucketing,
            workers,
        );
        timer.stop(Phase::NormalMapInsertion);
        let bucket_count = buckets.len();

        timer.stop(Phase::Preprocessing);

        timer.start(Phase::ConnectivityAndMeshGeneration);
        let mut segments: Vec<TriangleMesh> = Vec::new();
        for (index, bucket) in buckets.into_iter().enumerate() {
            timer.start(Phase::FaceGraphBuild);
            let graph = build_face_graph(
                self.config.graph_backend,
                bucket.triangles,
                mesh.vertex_count(),
            );
            timer.stop(Phase::FaceGraphBuild);

            timer.start(Phase::SegmentExtraction);
            let union = graph.segment_union()?;
            timer.stop(Phase::SegmentExtraction);

            debug!(
                bucket = index,
                representative = ?bucket.representative,
                triangles = graph.len(),
                segments = union.group_count(),
                "Segmented bucket"
            );

            timer.start(Phase::TriangleMeshGeneration);
            let meshes = materialize(&mesh.name, graph.triangles(), &union, segments.len());
            segments.extend(meshes);
            timer.stop(Phase::TriangleMeshGeneration);
        }
        timer.stop(Phase::ConnectivityAndMeshGeneration);

        timer.start(Phase::SegmentColoring);
        color_segments(&mut segments);
        timer.stop(Phase::SegmentColoring);

        info!(
            mesh = %mesh.name,
            clusters = clusters.len(),
            buckets = bucket_count,
            segments = segments.len(),
            "Finished planar segmentation"
        );
        Ok(segments)
    }

    /// Unit normal per face, `None` for skipped degenerate faces.
    fn face_normals(&self, mesh: &TriangleMesh) -> SegmentResult<Vec<Option<DVec3>>> {
        let normals = mesh.face_normals();

        let degenerate = normals.iter().filter(|n| n.is_none()).count();
        if degenerate > 0 {
            match self.config.degenerate_faces {
                DegenerateFacePolicy::Reject => {
                    let face = normals.iter().position(Option::is_none).unwrap_or_default();
                    return Err(SegmentError::DegenerateFace { face });
                }
                DegenerateFacePolicy::Skip => {
                    warn!(
                        mesh = %mesh.name,
                        faces = degenerate,
                        "Skipping degenerate faces without a normal"
                    );
                }
            }
        }
        Ok(normals)
    }
}

/// Segments `mesh` with `config` and no timing.
pub fn segment_mesh(
    mesh: &TriangleMesh,
    config: SegmenterConfig,
) -> SegmentResult<Vec<TriangleMesh>> {
    Segmenter::new(config)?.segment(mesh, &mut NoopTimer)
}

/// One mesh per group of `union`, numbered from `first_number`.
fn materialize(
    source: &str,
    triangles: &[Triangle],
    union: &SegmentUnion,
    first_number: usize,
) -> Vec<TriangleMesh> {
    union
        .groups()
        .into_par_iter()
        .enumerate()
        .map(|(offset, group)| {
            let number = first_number + offset;
            let members: Vec<Triangle> = group.iter().map(|&index| triangles[index]).collect();
            TriangleMesh::from_triangles(
                format!("{source}{SEGMENT_NAME_INFIX}{number}"),
                Material::placeholder(format!("{SEGMENT_MATERIAL_PREFIX}{number}")),
                &members,
            )
        })
        .collect()
}

/// Gives every mesh a distinct jet color by its position in the list.
pub fn color_segments(meshes: &mut [TriangleMesh]) {
    let total = meshes.len() as f32;
    meshes
        .par_iter_mut()
        .enumerate()
        .for_each(|(index, mesh)| {
            mesh.material.diffuse = jet(index as f32, 0.0, total);
            mesh.material.ambient = SEGMENT_AMBIENT;
            mesh.material.specular = SEGMENT_SPECULAR;
        });
}
