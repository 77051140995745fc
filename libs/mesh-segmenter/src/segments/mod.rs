//! # Segment Extraction
//!
//! Connected components over a face-adjacency graph, labeled with an
//! explicit-stack depth-first search. Recursion is never used: a single
//! connected region can span millions of triangles.

#[cfg(test)]
mod tests;

use crate::error::{SegmentError, SegmentResult};

/// Label of a triangle that no traversal has reached yet.
pub const UNASSIGNED: u32 = u32::MAX;

/// Per-triangle group labels for one bucket.
///
/// After [`extract`] every label is a group id below
/// [`group_count`](Self::group_count), and two triangles share a label iff a
/// path of adjacency edges connects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentUnion {
    labels: Vec<u32>,
    group_count: u32,
}

impl SegmentUnion {
    /// Creates a union of `len` unassigned triangles.
    pub fn new(len: usize) -> Self {
        Self {
            labels: vec![UNASSIGNED; len],
            group_count: 0,
        }
    }

    /// Number of triangles covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true for an empty bucket.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of groups found.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.group_count as usize
    }

    /// Raw labels, [`UNASSIGNED`] where not yet visited.
    #[inline]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Group id of a triangle, `None` when unassigned or out of range.
    pub fn label(&self, triangle: usize) -> Option<usize> {
        self.labels
            .get(triangle)
            .filter(|&&label| label != UNASSIGNED)
            .map(|&label| label as usize)
    }

    /// True once every triangle carries a group id.
    pub fn is_complete(&self) -> bool {
        self.labels.iter().all(|&label| label != UNASSIGNED)
    }

    /// Number of triangles in each group.
    pub fn group_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.group_count()];
        for &label in &self.labels {
            if label != UNASSIGNED {
                sizes[label as usize] += 1;
            }
        }
        sizes
    }

    /// Triangle indices of every group, ascending within each group.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = self
            .group_sizes()
            .into_iter()
            .map(Vec::with_capacity)
            .collect();
        for (triangle, &label) in self.labels.iter().enumerate() {
            if label != UNASSIGNED {
                groups[label as usize].push(triangle);
            }
        }
        groups
    }
}

/// Labels the connected components of `adjacency`.
///
/// Triangles are scanned in index order; each unlabeled one seeds a new
/// group, so group ids increase with each component's lowest index.
///
/// # Errors
///
/// [`SegmentError::AdjacencyOutOfRange`] when a neighbor index is not a
/// triangle of this graph.
///
/// # Example
///
/// ```rust
/// use mesh_segmenter::segments::extract;
///
/// // 0-1 connected, 2 alone, 3-4 connected
/// let adjacency = vec![vec![1], vec![0], vec![], vec![4], vec![3]];
/// let union = extract(&adjacency).unwrap();
/// assert_eq!(union.group_count(), 3);
/// assert_eq!(union.labels(), &[0, 0, 1, 2, 2]);
/// ```
pub fn extract(adjacency: &[Vec<usize>]) -> SegmentResult<SegmentUnion> {
    let len = adjacency.len();
    let mut union = SegmentUnion::new(len);
    let mut stack: Vec<usize> = Vec::new();

    for seed in 0..len {
        if union.labels[seed] != UNASSIGNED {
            continue;
        }
        let group = union.group_count;
        stack.push(seed);

        while let Some(current) = stack.pop() {
            if union.labels[current] != UNASSIGNED {
                continue;
            }
            union.labels[current] = group;

            for &neighbor in &adjacency[current] {
                if neighbor >= len {
                    return Err(SegmentError::AdjacencyOutOfRange {
                        triangle: current,
                        neighbor,
                        len,
                    });
                }
                if union.labels[neighbor] == UNASSIGNED {
                    stack.push(neighbor);
                }
            }
        }
        union.group_count += 1;
    }

    Ok(union)
}
