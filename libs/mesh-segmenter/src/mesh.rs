//! # Mesh Data Structures
//!
//! Geometry primitives consumed and produced by the segmenter: a value-type
//! [`Triangle`], the [`Material`] record and the indexed [`TriangleMesh`].

use config::constants::{DEGENERATE_SINE_EPSILON, PLACEHOLDER_DIFFUSE};
use glam::DVec3;
use hashbrown::HashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

// =============================================================================
// TRIANGLE
// =============================================================================

/// Three vertex positions. No identity beyond its coordinates.
///
/// # Example
///
/// ```rust
/// use mesh_segmenter::Triangle;
/// use glam::DVec3;
///
/// let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y);
/// assert_eq!(tri.normal(), Some(DVec3::Z));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    vertices: [DVec3; 3],
}

impl Triangle {
    /// Creates a triangle from three positions (counter-clockwise winding
    /// gives an outward normal).
    #[inline]
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Returns the three positions.
    #[inline]
    pub fn vertices(&self) -> &[DVec3; 3] {
        &self.vertices
    }

    /// Unit normal of the triangle's plane.
    ///
    /// Returns `None` for collinear, zero-length or non-finite triangles,
    /// whose normal is undefined. The collinearity test is relative to the
    /// edge lengths, so scaling a triangle never changes the outcome.
    pub fn normal(&self) -> Option<DVec3> {
        let [a, b, c] = self.vertices;
        let (ab, ac) = (b - a, c - a);
        let cross = ab.cross(ac);
        let len_sq = cross.length_squared();
        if !cross.is_finite()
            || len_sq == 0.0
            || len_sq <= DEGENERATE_SINE_EPSILON * ab.length_squared() * ac.length_squared()
        {
            return None;
        }
        Some(cross.normalize())
    }

    /// Surface area.
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a).length() * 0.5
    }
}

// =============================================================================
// VERTEX IDENTITY
// =============================================================================

/// Hashable identity of a vertex position.
///
/// Two positions share a key iff they compare equal as floats, so `-0.0`
/// is folded onto `0.0` before taking the bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct VertexKey([u64; 3]);

impl From<DVec3> for VertexKey {
    #[inline]
    fn from(v: DVec3) -> Self {
        Self([
            (v.x + 0.0).to_bits(),
            (v.y + 0.0).to_bits(),
            (v.z + 0.0).to_bits(),
        ])
    }
}

// =============================================================================
// MATERIAL
// =============================================================================

/// Surface material record carried by every mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub diffuse: [f32; 3],
    pub ambient: [f32; 3],
    pub specular: [f32; 3],
    pub emission: [f32; 3],
    pub shininess: f32,
    pub dissolve: f32,
    pub illumination_model: i32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            diffuse: [0.8, 0.8, 0.8],
            ambient: [0.0; 3],
            specular: [0.0; 3],
            emission: [0.0; 3],
            shininess: 1.0,
            dissolve: 1.0,
            illumination_model: 0,
        }
    }
}

impl Material {
    /// Creates a default material with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Material given to a segment before the coloring pass runs.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            diffuse: PLACEHOLDER_DIFFUSE,
            ..Self::named(name)
        }
    }
}

// =============================================================================
// TRIANGLE MESH
// =============================================================================

/// An indexed triangle mesh owning one material.
///
/// # Example
///
/// ```rust
/// use mesh_segmenter::{Material, TriangleMesh};
/// use glam::DVec3;
///
/// let mut mesh = TriangleMesh::new("plate", Material::named("steel"));
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Mesh name, also used to derive segment names.
    pub name: String,
    /// Surface material.
    pub material: Material,
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Creates an empty mesh.
    pub fn new(name: impl Into<String>, material: Material) -> Self {
        Self {
            name: name.into(),
            material,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(
        name: impl Into<String>,
        material: Material,
        vertex_count: usize,
        triangle_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            material,
            vertices: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(triangle_count),
        }
    }

    /// Builds an indexed mesh from loose triangles, sharing positions that
    /// compare exactly equal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mesh_segmenter::{Material, Triangle, TriangleMesh};
    /// use glam::DVec3;
    ///
    /// let a = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y);
    /// let b = Triangle::new(DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y);
    /// let mesh = TriangleMesh::from_triangles("quad", Material::default(), &[a, b]);
    /// assert_eq!(mesh.vertex_count(), 4);
    /// assert_eq!(mesh.triangle_count(), 2);
    /// ```
    pub fn from_triangles(
        name: impl Into<String>,
        material: Material,
        triangles: &[Triangle],
    ) -> Self {
        let mut mesh = Self::with_capacity(name, material, triangles.len() * 3, triangles.len());
        let mut known: HashMap<VertexKey, u32> = HashMap::with_capacity(triangles.len() * 3);

        for triangle in triangles {
            let mut face = [0u32; 3];
            for (slot, &position) in face.iter_mut().zip(triangle.vertices()) {
                *slot = *known
                    .entry(VertexKey::from(position))
                    .or_insert_with(|| mesh.add_vertex(position));
            }
            mesh.indices.push(face);
        }
        mesh
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.indices.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the index triples.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// Returns the triangle at the given face index.
    ///
    /// Panics if the face or its indices are out of range; call
    /// [`validate`](Self::validate) first on untrusted meshes.
    #[inline]
    pub fn triangle(&self, face: usize) -> Triangle {
        let [a, b, c] = self.indices[face];
        Triangle::new(
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        )
    }

    /// Iterates over all faces as triangles.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        (0..self.indices.len()).map(move |face| self.triangle(face))
    }

    /// Unit normal per face in face order, `None` for degenerate faces.
    pub fn face_normals(&self) -> Vec<Option<DVec3>> {
        (0..self.indices.len())
            .into_par_iter()
            .map(|face| self.triangle(face).normal())
            .collect()
    }

    /// Checks that every index refers to an existing vertex.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        for (triangle, face) in self.indices.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Total surface area of all faces.
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|t| t.area()).sum()
    }
}
