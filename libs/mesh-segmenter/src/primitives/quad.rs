//! # Quad Primitive
//!
//! Flat rectangle on the z = 0 plane, split into two triangles.

use crate::error::MeshError;
use crate::mesh::{Material, TriangleMesh};
use glam::{DVec2, DVec3};

/// Creates a rectangle from the origin to `size`, facing +Z.
///
/// The two triangles share the diagonal edge (vertices 0 and 2).
///
/// # Example
///
/// ```rust
/// use mesh_segmenter::primitives::create_quad;
/// use glam::DVec2;
///
/// let mesh = create_quad(DVec2::ONE).unwrap();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
pub fn create_quad(size: DVec2) -> Result<TriangleMesh, MeshError> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Quad size must be positive: {:?}",
            size
        )));
    }

    let mut mesh = TriangleMesh::with_capacity("quad", Material::named("quad"), 4, 2);
    let v0 = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
    let v1 = mesh.add_vertex(DVec3::new(size.x, 0.0, 0.0));
    let v2 = mesh.add_vertex(DVec3::new(size.x, size.y, 0.0));
    let v3 = mesh.add_vertex(DVec3::new(0.0, size.y, 0.0));

    mesh.add_triangle(v0, v1, v2);
    mesh.add_triangle(v0, v2, v3);

    Ok(mesh)
}
