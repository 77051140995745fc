//! # Model
//!
//! An ordered collection of meshes, one per shape and material, as a scene
//! loader produces them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SegmentResult;
use crate::mesh::TriangleMesh;
use crate::segmenter::Segmenter;
use crate::timer::PhaseTimer;

/// Meshes of one scene, in load order. Never holds a mesh without faces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    meshes: Vec<TriangleMesh>,
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mesh. Meshes without faces are discarded; returns whether the
    /// mesh was kept.
    pub fn push(&mut self, mesh: TriangleMesh) -> bool {
        if mesh.is_empty() {
            debug!(mesh = %mesh.name, "Discarding mesh without faces");
            return false;
        }
        self.meshes.push(mesh);
        true
    }

    /// The kept meshes.
    pub fn meshes(&self) -> &[TriangleMesh] {
        &self.meshes
    }

    /// Number of kept meshes.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Returns true if no mesh was kept.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Segments every mesh in order and concatenates the segments.
    ///
    /// Segment names derive from their source mesh, so numbering restarts
    /// at zero for each mesh. The first failing mesh aborts the run.
    pub fn segment(
        &self,
        segmenter: &Segmenter,
        timer: &mut dyn PhaseTimer,
    ) -> SegmentResult<Vec<TriangleMesh>> {
        let mut segments = Vec::new();
        for mesh in &self.meshes {
            segments.extend(segmenter.segment(mesh, timer)?);
        }
        Ok(segments)
    }
}

impl FromIterator<TriangleMesh> for Model {
    fn from_iter<I: IntoIterator<Item = TriangleMesh>>(iter: I) -> Self {
        let mut model = Model::new();
        for mesh in iter {
            model.push(mesh);
        }
        model
    }
}
