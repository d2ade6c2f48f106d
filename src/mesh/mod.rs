mod validate;

pub use validate::{orient_outward, validate, Validate, ValidationParams};

use std::collections::BTreeSet;

use crate::math::polygon_3d::{polygon_centroid, polygon_normal, signed_volume_x6};
use crate::math::{Point3, Vector3};
use crate::operations::query::BoundingBox;

/// A polygonal face: vertex indices in counter-clockwise order seen from outside.
pub type Face = Vec<usize>;

/// An undirected edge, stored with the smaller vertex index first.
pub type EdgeKey = (usize, usize);

/// An immutable polygon mesh.
///
/// Vertex order is index order and face order is significant: downstream
/// consumers map a face index to the value printed on that face. Neither is
/// ever reordered once the mesh exists; operations that change geometry
/// return a new mesh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
    vertices: Vec<Point3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Creates a mesh from raw parts without checking any invariant.
    ///
    /// Use [`validate`] before handing the result to a consumer.
    #[must_use]
    pub fn new(vertices: Vec<Point3>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Vertex positions in index order.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Faces in emission order.
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Distinct undirected edges, sorted.
    #[must_use]
    pub fn edges(&self) -> BTreeSet<EdgeKey> {
        self.faces
            .iter()
            .flat_map(|face| face_edges(face))
            .map(|(a, b)| edge_key(a, b))
            .collect()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Positions of a face's vertices, or `None` if the face or any index is out of range.
    #[must_use]
    pub fn face_points(&self, face: usize) -> Option<Vec<Point3>> {
        self.faces
            .get(face)?
            .iter()
            .map(|&i| self.vertices.get(i).copied())
            .collect()
    }

    /// Unit outward normal of a face (from its winding).
    #[must_use]
    pub fn face_normal(&self, face: usize) -> Option<Vector3> {
        polygon_normal(&self.face_points(face)?)
    }

    /// Mean of a face's vertex positions.
    #[must_use]
    pub fn face_centroid(&self, face: usize) -> Option<Point3> {
        polygon_centroid(&self.face_points(face)?)
    }

    /// Signed enclosed volume. Positive when faces wind outward.
    ///
    /// Faces with out-of-range indices contribute nothing.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let x6: f64 = (0..self.faces.len())
            .filter_map(|f| self.face_points(f))
            .map(|points| signed_volume_x6(&points))
            .sum();
        x6 / 6.0
    }

    /// Diagonal length of the axis-aligned bounding box, the mesh's length scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        BoundingBox::new(self).execute().map_or(0.0, |aabb| aabb.diagonal())
    }

    /// Returns a copy with every coordinate multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| p * factor).collect(),
            faces: self.faces.clone(),
        }
    }

    /// Returns a copy with every face wound the opposite way.
    ///
    /// Each face keeps its leading vertex so face-relative conventions survive.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let faces = self
            .faces
            .iter()
            .map(|face| {
                let mut flipped = face.clone();
                if let Some(tail) = flipped.get_mut(1..) {
                    tail.reverse();
                }
                flipped
            })
            .collect();
        Self {
            vertices: self.vertices.clone(),
            faces,
        }
    }

    /// Consumes the mesh, returning its vertex and face lists.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Point3>, Vec<Face>) {
        (self.vertices, self.faces)
    }
}

/// Directed edges of a face, closing back to its first vertex.
pub(crate) fn face_edges(face: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = face.len();
    (0..n).map(move |i| (face[i], face[(i + 1) % n]))
}

pub(crate) fn edge_key(a: usize, b: usize) -> EdgeKey {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
