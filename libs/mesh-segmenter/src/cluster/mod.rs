//! # Normal Clustering
//!
//! Groups face normals into a small set of representative directions under
//! an angular tolerance.
//!
//! ## Algorithm
//!
//! Leader clustering: a normal joins the first representative (in insertion
//! order) that lies strictly within the tolerance, otherwise it becomes a new
//! representative. The parallel build runs in two phases:
//!
//! 1. Each contiguous chunk of normals is clustered into a thread-local map at
//!    half the tolerance.
//! 2. After the parallel region, one thread folds the local maps, in chunk
//!    order, into the global map at the full tolerance, summing counts.
//!
//! Halving the local tolerance keeps a chunk's clustering from being coarser
//! than the global merge allows. The result approximates tolerance-bounded
//! clustering; it is not a nearest-representative clustering.


use glam::DVec3;
use rayon::prelude::*;
use tracing::debug;

use crate::partition::chunk_len;

/// One representative direction and the number of faces mapped onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalCluster {
    pub representative: DVec3,
    pub count: usize,
}

/// Insertion-ordered map from representative normal to face count.
///
/// # Example
///
/// ```rust
/// use mesh_segmenter::cluster::ClusterMap;
/// use glam::DVec3;
///
/// let mut map = ClusterMap::new();
/// map.insert(DVec3::Z, 1, 5.0);
/// map.insert(DVec3::new(0.0, 0.01, 1.0).normalize(), 1, 5.0);
/// map.insert(DVec3::X, 1, 5.0);
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(0).unwrap().count, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterMap {
    clusters: Vec<NormalCluster>,
}

impl ClusterMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of representatives.
    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns true when no representative exists yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Returns the cluster at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&NormalCluster> {
        self.clusters.get(index)
    }

    /// Iterates clusters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &NormalCluster> {
        self.clusters.iter()
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> usize {
        self.clusters.iter().map(|c| c.count).sum()
    }

    /// Index of the first representative equal to `query` or strictly
    /// within `tolerance` degrees of it.
    pub fn find(&self, query: DVec3, tolerance: f64) -> Option<usize> {
        self.clusters.iter().position(|cluster| {
            cluster.representative == query
                || angle_degrees(cluster.representative, query) < tolerance
        })
    }

    /// Index of the representative with the smallest angle to `query`.
    pub fn nearest(&self, query: DVec3) -> Option<usize> {
        self.clusters
            .iter()
            .enumerate()
            .map(|(index, cluster)| (index, angle_degrees(cluster.representative, query)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Adds `count` faces under the representative matching `normal`,
    /// making `normal` a new representative if none matches.
    ///
    /// Returns the index of the representative that received the count.
    pub fn insert(&mut self, normal: DVec3, count: usize, tolerance: f64) -> usize {
        match self.find(normal, tolerance) {
            Some(index) => {
                self.clusters[index].count += count;
                index
            }
            None => {
                self.clusters.push(NormalCluster {
                    representative: normal,
                    count,
                });
                self.clusters.len() - 1
            }
        }
    }

    /// Folds every cluster of `other` into `self` at `tolerance`.
    pub fn merge(&mut self, other: &ClusterMap, tolerance: f64) {
        for cluster in &other.clusters {
            self.insert(cluster.representative, cluster.count, tolerance);
        }
    }
}

/// Angle between two directions in degrees, in `[0, 180]`.
///
/// The cosine is clamped so nearly parallel unit vectors never produce NaN.
pub fn angle_degrees(a: DVec3, b: DVec3) -> f64 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Maps `query` to the representative it belongs to under `tolerance`.
///
/// Representatives are scanned in insertion order and the first match wins.
/// If nothing matches, `query` is its own representative.
///
/// # Example
///
/// ```rust
/// use mesh_segmenter::cluster::{assign_normal, ClusterMap};
/// use glam::DVec3;
///
/// let mut map = ClusterMap::new();
/// map.insert(DVec3::Z, 1, 10.0);
///
/// let tilted = DVec3::new(0.0, 0.05, 1.0).normalize();
/// assert_eq!(assign_normal(&map, tilted, 10.0), DVec3::Z);
/// assert_eq!(assign_normal(&map, DVec3::X, 10.0), DVec3::X);
/// ```
pub fn assign_normal(map: &ClusterMap, query: DVec3, tolerance: f64) -> DVec3 {
    map.find(query, tolerance)
        .map_or(query, |index| map.clusters[index].representative)
}

/// Builds the global cluster map for `normals` with the two-phase parallel
/// scheme described in the module docs.
///
/// `workers` is the number of contiguous chunks (zero: one per pool thread).
/// For a fixed `workers` the result is deterministic.
pub fn cluster_normals(normals: &[DVec3], tolerance: f64, workers: usize) -> ClusterMap {
    let half_tolerance = tolerance / 2.0;
    let chunk = chunk_len(normals.len(), workers);

    let partials: Vec<ClusterMap> = normals
        .par_chunks(chunk)
        .map(|part| {
            let mut local = ClusterMap::new();
            for &normal in part {
                local.insert(normal, 1, half_tolerance);
            }
            local
        })
        .collect();

    let mut global = ClusterMap::new();
    for partial in &partials {
        global.merge(partial, tolerance);
    }

    debug!(
        normals = normals.len(),
        partials = partials.len(),
        clusters = global.len(),
        "Clustered face normals"
    );
    global
}
