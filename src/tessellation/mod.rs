mod tessellate_mesh;

pub use tessellate_mesh::TessellateMesh;

use crate::math::{Point3, Vector3};

/// A flat-shaded triangle approximation of a polygon mesh.
///
/// Vertices are duplicated per face so every triangle carries its face's
/// normal. `face_of_triangle[t]` is the source face of triangle `t`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
    /// Source polygon face of each triangle.
    pub face_of_triangle: Vec<usize>,
}

impl TriangleMesh {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Appends another mesh, offsetting its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
        self.face_of_triangle
            .extend_from_slice(&other.face_of_triangle);
    }
}
