use approx::assert_relative_eq;
use glam::{DVec2, DVec3};
use mesh_segmenter::primitives::{create_cube, create_quad};
use mesh_segmenter::{
    segment_mesh, BucketingStrategy, DegenerateFacePolicy, GraphBackend, Material, MeshError,
    Model, Phase, PhaseStopwatch, SegmentError, Segmenter, SegmenterConfig, Triangle,
    TriangleMesh,
};

fn mesh_of(name: &str, triangles: &[Triangle]) -> TriangleMesh {
    TriangleMesh::from_triangles(name, Material::named(name), triangles)
}

fn square(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> [Triangle; 2] {
    [Triangle::new(a, b, c), Triangle::new(a, c, d)]
}

fn tolerance(degrees: f64) -> SegmenterConfig {
    SegmenterConfig::new(degrees).unwrap()
}

/// Flat `n` x `n` grid of unit squares on z = 0.
fn flat_grid(n: usize) -> TriangleMesh {
    let mut triangles = Vec::with_capacity(2 * n * n);
    for i in 0..n {
        for j in 0..n {
            let (x, y) = (i as f64, j as f64);
            triangles.extend(square(
                DVec3::new(x, y, 0.0),
                DVec3::new(x + 1.0, y, 0.0),
                DVec3::new(x + 1.0, y + 1.0, 0.0),
                DVec3::new(x, y + 1.0, 0.0),
            ));
        }
    }
    mesh_of("grid", &triangles)
}

/// Two unit squares sharing the edge x = 1, the second bent up by `degrees`.
fn bent_pair(degrees: f64) -> TriangleMesh {
    let rise = degrees.to_radians().tan();
    let mut triangles = Vec::new();
    triangles.extend(square(
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
    ));
    triangles.extend(square(
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, rise),
        DVec3::new(2.0, 1.0, rise),
        DVec3::new(1.0, 1.0, 0.0),
    ));
    mesh_of("bent", &triangles)
}

#[test]
fn quad_is_one_segment() {
    let quad = create_quad(DVec2::ONE).unwrap();
    let segments = segment_mesh(&quad, tolerance(5.0)).unwrap();

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].triangle_count(), 2);
    assert_eq!(segments[0].vertex_count(), 4);
    assert_eq!(segments[0].name, "quad_seg_0");
    assert_eq!(segments[0].material.name, "sub_materials_0");
}

#[test]
fn cube_splits_into_six_faces() {
    let cube = create_cube(DVec3::ONE, false).unwrap();
    let segments = segment_mesh(&cube, tolerance(5.0)).unwrap();

    assert_eq!(segments.len(), 6);
    for segment in &segments {
        assert_eq!(segment.triangle_count(), 2);
        assert_eq!(segment.vertex_count(), 4);
        assert!(segment.validate().is_ok());
    }
    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            assert_ne!(a.material.diffuse, b.material.diffuse);
        }
    }
}

#[test]
fn disjoint_coplanar_triangles_are_separate_segments() {
    let triangles = [
        Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y),
        Triangle::new(
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(11.0, 0.0, 0.0),
            DVec3::new(10.0, 1.0, 0.0),
        ),
    ];
    let segments = segment_mesh(&mesh_of("pair", &triangles), tolerance(5.0)).unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].triangle(0), triangles[0]);
    assert_eq!(segments[1].triangle(0), triangles[1]);
    assert_eq!(segments[0].name, "pair_seg_0");
    assert_eq!(segments[1].name, "pair_seg_1");
}

#[test]
fn a_single_shared_vertex_connects() {
    let triangles = [
        Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y),
        Triangle::new(DVec3::X, DVec3::new(2.0, -1.0, 0.0), DVec3::new(2.0, 0.0, 0.0)),
    ];
    let segments = segment_mesh(&mesh_of("bowtie", &triangles), tolerance(5.0)).unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].vertex_count(), 5);
}

#[test]
fn tolerance_decides_whether_a_bend_splits() {
    let mesh = bent_pair(2.0);
    assert_eq!(segment_mesh(&mesh, tolerance(5.0)).unwrap().len(), 1);
    assert_eq!(segment_mesh(&mesh, tolerance(1.0)).unwrap().len(), 2);
}

#[test]
fn staircase_treads_are_separate_segments() {
    let mut triangles = Vec::new();
    // lower tread, riser, upper tread
    triangles.extend(square(
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
    ));
    triangles.extend(square(
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 1.0),
        DVec3::new(1.0, 1.0, 1.0),
        DVec3::new(1.0, 1.0, 0.0),
    ));
    triangles.extend(square(
        DVec3::new(1.0, 0.0, 1.0),
        DVec3::new(2.0, 0.0, 1.0),
        DVec3::new(2.0, 1.0, 1.0),
        DVec3::new(1.0, 1.0, 1.0),
    ));
    let segments = segment_mesh(&mesh_of("stairs", &triangles), tolerance(5.0)).unwrap();

    assert_eq!(segments.len(), 3);
    let treads = segments
        .iter()
        .filter(|s| s.triangles().all(|t| t.normal() == Some(DVec3::Z)))
        .count();
    assert_eq!(treads, 2);
}

#[test]
fn every_face_lands_in_exactly_one_segment() {
    let mut triangles: Vec<Triangle> = create_cube(DVec3::new(3.0, 2.0, 1.0), true)
        .unwrap()
        .triangles()
        .collect();
    triangles.extend(bent_pair(30.0).triangles());
    let mesh = mesh_of("mixed", &triangles);
    let segments = segment_mesh(&mesh, tolerance(5.0)).unwrap();

    let mut seen: Vec<Triangle> = segments.iter().flat_map(|s| s.triangles()).collect();
    assert_eq!(seen.len(), triangles.len());
    for triangle in &triangles {
        let position = seen.iter().position(|t| t == triangle).unwrap();
        seen.swap_remove(position);
    }
    assert!(seen.is_empty());
}

#[test]
fn large_grid_is_one_segment_for_any_worker_count() {
    let grid = flat_grid(40);
    for workers in [1, 3, 16, 0] {
        let segments = segment_mesh(&grid, tolerance(5.0).with_workers(workers)).unwrap();
        assert_eq!(segments.len(), 1, "workers = {workers}");
        assert_eq!(segments[0].triangle_count(), 3200);
        assert_eq!(segments[0].vertex_count(), 41 * 41);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let mut triangles: Vec<Triangle> = flat_grid(6).triangles().collect();
    triangles.extend(create_cube(DVec3::ONE, false).unwrap().triangles());
    triangles.extend(bent_pair(12.0).triangles());
    let mesh = mesh_of("scene", &triangles);
    let config = tolerance(5.0).with_workers(4);

    let first = segment_mesh(&mesh, config).unwrap();
    let second = segment_mesh(&mesh, config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn all_strategy_and_backend_combinations_agree() {
    let mut triangles: Vec<Triangle> = flat_grid(5).triangles().collect();
    triangles.extend(create_cube(DVec3::splat(2.0), true).unwrap().triangles());
    let mesh = mesh_of("combo", &triangles);

    let baseline = segment_mesh(&mesh, tolerance(5.0)).unwrap();
    for bucketing in [BucketingStrategy::PartitionedMerge, BucketingStrategy::Sharded] {
        for backend in [GraphBackend::Host, GraphBackend::Device] {
            let config = tolerance(5.0)
                .with_bucketing(bucketing)
                .with_graph_backend(backend);
            assert_eq!(segment_mesh(&mesh, config).unwrap(), baseline);
        }
    }
}

#[test]
fn input_mesh_is_untouched() {
    let cube = create_cube(DVec3::ONE, false).unwrap();
    let before = cube.clone();
    segment_mesh(&cube, tolerance(5.0)).unwrap();
    assert_eq!(cube, before);
}

#[test]
fn degenerate_faces_follow_policy() {
    let mut triangles: Vec<Triangle> = create_quad(DVec2::ONE).unwrap().triangles().collect();
    triangles.insert(1, Triangle::new(DVec3::X, DVec3::X, DVec3::Y));
    let mesh = mesh_of("sliver", &triangles);

    let skipped = segment_mesh(&mesh, tolerance(5.0)).unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].triangle_count(), 2);

    let rejected = segment_mesh(
        &mesh,
        tolerance(5.0).with_degenerate_faces(DegenerateFacePolicy::Reject),
    );
    assert_eq!(rejected, Err(SegmentError::DegenerateFace { face: 1 }));
}

#[test]
fn sub_millimetre_cube_keeps_every_face() {
    for edge in [5.0e-4, 1.0e-6] {
        let cube = create_cube(DVec3::splat(edge), false).unwrap();
        let skipped = segment_mesh(&cube, tolerance(5.0)).unwrap();
        assert_eq!(skipped.len(), 6, "edge = {edge}");
        assert!(skipped.iter().all(|s| s.triangle_count() == 2));

        let strict = tolerance(5.0).with_degenerate_faces(DegenerateFacePolicy::Reject);
        assert_eq!(segment_mesh(&cube, strict).unwrap().len(), 6, "edge = {edge}");
    }
}

#[test]
fn segments_cover_the_input_surface() {
    let mut triangles: Vec<Triangle> = create_cube(DVec3::new(3.0, 2.0, 1.0), true)
        .unwrap()
        .triangles()
        .collect();
    triangles.extend(flat_grid(4).triangles());
    let mesh = mesh_of("cover", &triangles);
    let segments = segment_mesh(&mesh, tolerance(5.0)).unwrap();

    let total: f64 = segments.iter().map(TriangleMesh::surface_area).sum();
    assert_relative_eq!(total, mesh.surface_area(), max_relative = 1e-12);

    let (min, max) = mesh.bounding_box();
    for segment in &segments {
        let (lo, hi) = segment.bounding_box();
        assert!(lo.cmpge(min).all() && hi.cmple(max).all(), "{}", segment.name);
    }
}

#[test]
fn out_of_range_index_is_rejected() {
    let mut mesh = TriangleMesh::new("broken", Material::default());
    mesh.add_vertex(DVec3::ZERO);
    mesh.add_vertex(DVec3::X);
    mesh.add_triangle(0, 1, 5);

    let err = segment_mesh(&mesh, tolerance(5.0)).unwrap_err();
    assert_eq!(
        err,
        SegmentError::Mesh(MeshError::IndexOutOfRange {
            triangle: 0,
            index: 5,
            vertex_count: 2,
        })
    );
}

#[test]
fn invalid_tolerance_is_rejected() {
    assert!(SegmenterConfig::new(0.0).is_err());
    assert!(SegmenterConfig::new(-3.0).is_err());
    assert!(SegmenterConfig::new(181.0).is_err());

    let forced = SegmenterConfig {
        tolerance_degrees: f64::INFINITY,
        ..SegmenterConfig::default()
    };
    assert!(matches!(Segmenter::new(forced), Err(SegmentError::Config(_))));
}

#[test]
fn stopwatch_reports_phases() {
    let segmenter = Segmenter::new(tolerance(5.0)).unwrap();
    let mut stopwatch = PhaseStopwatch::new();
    segmenter
        .segment(&create_cube(DVec3::ONE, false).unwrap(), &mut stopwatch)
        .unwrap();

    assert_eq!(stopwatch.runs(Phase::Total), 1);
    assert!(stopwatch.elapsed(Phase::Total) >= stopwatch.elapsed(Phase::Preprocessing));
    assert!(stopwatch.report().contains("connectivity checking and mesh generation"));
}

#[test]
fn model_segments_every_mesh() {
    let mut model = Model::new();
    model.push(create_cube(DVec3::ONE, false).unwrap());
    model.push(TriangleMesh::new("empty", Material::default()));
    model.push(flat_grid(3));

    let segmenter = Segmenter::new(tolerance(5.0)).unwrap();
    let mut stopwatch = PhaseStopwatch::new();
    let segments = model.segment(&segmenter, &mut stopwatch).unwrap();

    assert_eq!(model.len(), 2);
    assert_eq!(segments.len(), 7);
    assert_eq!(segments.last().map(|s| s.name.as_str()), Some("grid_seg_0"));
    assert_eq!(stopwatch.runs(Phase::Total), 2);
}
