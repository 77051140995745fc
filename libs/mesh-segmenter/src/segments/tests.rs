//! # Segment Extraction Tests

use super::*;

/// Symmetric adjacency for an undirected edge list.
fn adjacency_from_edges(len: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); len];
    for &(a, b) in edges {
        adjacency[a].push(b);
        adjacency[b].push(a);
    }
    adjacency
}

#[test]
fn test_empty_graph() {
    let union = extract(&[]).unwrap();
    assert!(union.is_empty());
    assert_eq!(union.group_count(), 0);
    assert!(union.groups().is_empty());
}

#[test]
fn test_singletons_are_segments() {
    let union = extract(&vec![Vec::new(); 4]).unwrap();
    assert_eq!(union.group_count(), 4);
    assert_eq!(union.labels(), &[0, 1, 2, 3]);
    assert_eq!(union.group_sizes(), vec![1, 1, 1, 1]);
}

#[test]
fn test_group_ids_follow_lowest_member() {
    // Components {1, 4}, {0, 3}, {2}
    let adjacency = adjacency_from_edges(5, &[(1, 4), (3, 0)]);
    let union = extract(&adjacency).unwrap();
    assert_eq!(union.labels(), &[0, 1, 2, 0, 1]);
    assert_eq!(union.groups(), vec![vec![0, 3], vec![1, 4], vec![2]]);
}

#[test]
fn test_duplicate_and_cyclic_edges() {
    let mut adjacency = adjacency_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
    adjacency[0].push(1);
    adjacency[0].push(1);
    let union = extract(&adjacency).unwrap();
    assert_eq!(union.group_count(), 1);
    assert!(union.is_complete());
}

#[test]
fn test_partition_property() {
    let edges: Vec<(usize, usize)> = (0..60)
        .filter(|i| i % 7 != 0)
        .map(|i| (i, i + 1))
        .collect();
    let adjacency = adjacency_from_edges(61, &edges);
    let union = extract(&adjacency).unwrap();

    let groups = union.groups();
    let total: usize = groups.iter().map(Vec::len).sum();
    assert_eq!(total, 61);

    let mut seen: Vec<usize> = groups.into_iter().flatten().collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..61).collect::<Vec<_>>());
}

#[test]
fn test_long_chain_does_not_overflow_stack() {
    let len = 500_000;
    let edges: Vec<(usize, usize)> = (0..len - 1).map(|i| (i, i + 1)).collect();
    let adjacency = adjacency_from_edges(len, &edges);
    let union = extract(&adjacency).unwrap();
    assert_eq!(union.group_count(), 1);
    assert_eq!(union.group_sizes(), vec![len]);
}

#[test]
fn test_out_of_range_neighbor_fails_loudly() {
    let adjacency = vec![vec![1], vec![0, 7]];
    let err = extract(&adjacency).unwrap_err();
    assert_eq!(
        err,
        SegmentError::AdjacencyOutOfRange {
            triangle: 1,
            neighbor: 7,
            len: 2,
        }
    );
}

#[test]
fn test_label_lookup() {
    let union = extract(&adjacency_from_edges(3, &[(0, 2)])).unwrap();
    assert_eq!(union.label(2), Some(0));
    assert_eq!(union.label(1), Some(1));
    assert_eq!(union.label(9), None);
    assert_eq!(SegmentUnion::new(2).label(0), None);
    assert!(!SegmentUnion::new(2).is_complete());
}
