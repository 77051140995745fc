//! # Normal Bucketing
//!
//! Distributes the faces of a mesh into buckets keyed by their
//! representative normal.
//!
//! Each face's representative is recomputed against the fixed global
//! [`ClusterMap`] at full tolerance. The two-phase clustering can leave a
//! face with no representative strictly within tolerance; such a face goes
//! to its nearest representative.
//!
//! ## Strategies
//!
//! - [`BucketingStrategy::PartitionedMerge`]: every contiguous chunk fills
//!   private buckets, then one thread concatenates them in chunk order.
//! - [`BucketingStrategy::Sharded`]: all threads insert into one lock-striped
//!   map; only the shard owning the representative is locked per insertion.
//!
//! Both produce the same buckets: representative order, face order inside.


use std::sync::atomic::{AtomicUsize, Ordering};

use config::constants::{BucketingStrategy, MAX_LOCK_STRIPES};
use dashmap::DashMap;
use glam::DVec3;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::cluster::ClusterMap;
use crate::mesh::{Triangle, TriangleMesh};
use crate::partition::chunk_len;

/// Triangles sharing one representative normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub representative: DVec3,
    pub triangles: Vec<Triangle>,
}

/// Buckets every face of `mesh` that has a normal.
///
/// `normals[face]` is `None` for faces excluded from segmentation; those are
/// not bucketed. Empty buckets are dropped.
pub fn bucket_triangles(
    mesh: &TriangleMesh,
    normals: &[Option<DVec3>],
    clusters: &ClusterMap,
    tolerance: f64,
    strategy: BucketingStrategy,
    workers: usize,
) -> Vec<Bucket> {
    debug_assert_eq!(mesh.triangle_count(), normals.len());
    let fallbacks = AtomicUsize::new(0);
    let resolve = |normal: DVec3| -> Option<usize> {
        clusters.find(normal, tolerance).or_else(|| {
            fallbacks.fetch_add(1, Ordering::Relaxed);
            clusters.nearest(normal)
        })
    };

    let filled = match strategy {
        BucketingStrategy::PartitionedMerge => {
            partitioned_merge(mesh, normals, clusters.len(), workers, &resolve)
        }
        BucketingStrategy::Sharded => sharded(mesh, normals, clusters.len(), &resolve),
    };

    let fallbacks = fallbacks.load(Ordering::Relaxed);
    if fallbacks > 0 {
        warn!(
            faces = fallbacks,
            tolerance, "Faces outside every representative's tolerance; using nearest"
        );
    }

    let buckets: Vec<Bucket> = filled
        .into_iter()
        .enumerate()
        .filter(|(_, triangles)| !triangles.is_empty())
        .filter_map(|(index, triangles)| {
            clusters.get(index).map(|cluster| Bucket {
                representative: cluster.representative,
                triangles,
            })
        })
        .collect();

    debug!(?strategy, buckets = buckets.len(), "Bucketed triangles");
    buckets
}

fn partitioned_merge<F>(
    mesh: &TriangleMesh,
    normals: &[Option<DVec3>],
    bucket_count: usize,
    workers: usize,
    resolve: &F,
) -> Vec<Vec<Triangle>>
where
    F: Fn(DVec3) -> Option<usize> + Sync,
{
    let chunk = chunk_len(normals.len(), workers);

    let partials: Vec<Vec<Vec<Triangle>>> = normals
        .par_chunks(chunk)
        .enumerate()
        .map(|(chunk_index, part)| {
            let mut local = vec![Vec::new(); bucket_count];
            for (offset, normal) in part.iter().enumerate() {
                let Some(normal) = *normal else { continue };
                if let Some(bucket) = resolve(normal) {
                    local[bucket].push(mesh.triangle(chunk_index * chunk + offset));
                }
            }
            local
        })
        .collect();

    let mut buckets: Vec<Vec<Triangle>> = vec![Vec::new(); bucket_count];
    for partial in partials {
        for (bucket, triangles) in buckets.iter_mut().zip(partial) {
            bucket.extend(triangles);
        }
    }
    buckets
}

/// Shard count for a map with one key per bucket.
///
/// Keys are bucket indices, so stripes beyond `bucket_count` would never be
/// contended. dashmap needs a power of two greater than one.
fn stripe_count(bucket_count: usize) -> usize {
    bucket_count
        .max(2)
        .next_power_of_two()
        .min(MAX_LOCK_STRIPES)
}

fn sharded<F>(
    mesh: &TriangleMesh,
    normals: &[Option<DVec3>],
    bucket_count: usize,
    resolve: &F,
) -> Vec<Vec<Triangle>>
where
    F: Fn(DVec3) -> Option<usize> + Sync,
{
    let shared: DashMap<usize, Vec<(usize, Triangle)>> =
        DashMap::with_capacity_and_shard_amount(bucket_count, stripe_count(bucket_count));

    normals.par_iter().enumerate().for_each(|(face, normal)| {
        let Some(normal) = *normal else { return };
        if let Some(bucket) = resolve(normal) {
            let triangle = mesh.triangle(face);
            shared.entry(bucket).or_default().push((face, triangle));
        }
    });

    let mut buckets: Vec<Vec<Triangle>> = vec![Vec::new(); bucket_count];
    for (bucket, mut entries) in shared {
        entries.sort_unstable_by_key(|&(face, _)| face);
        buckets[bucket] = entries.into_iter().map(|(_, triangle)| triangle).collect();
    }
    buckets
}
