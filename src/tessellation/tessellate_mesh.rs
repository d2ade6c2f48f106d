use tracing::{debug, instrument};

use crate::error::{Defect, Result};
use crate::mesh::Mesh;

use super::TriangleMesh;

/// Fan-triangulates every face of a polygon mesh.
///
/// Each face is fanned from its first vertex, which keeps its winding.
/// Planar faces (Platonic solids, planar kites) are covered exactly. The
/// default kite layout and the stitched band quads are not planar; their
/// fan triangles only approximate the face, and all of them carry the
/// face's averaged normal rather than their own.
pub struct TessellateMesh<'a> {
    mesh: &'a Mesh,
}

impl<'a> TessellateMesh<'a> {
    /// Creates a new `TessellateMesh` operation.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeometryError::DegenerateGeometry`] if a face has an
    /// out-of-range index, fewer than three vertices, or no defined normal.
    #[allow(clippy::cast_possible_truncation)]
    #[instrument(skip_all, fields(faces = self.mesh.face_count()))]
    pub fn execute(&self) -> Result<TriangleMesh> {
        let mut out = TriangleMesh::default();

        for (face, indices) in self.mesh.faces().iter().enumerate() {
            if indices.len() < 3 {
                return Err(Defect::TooFewVertices {
                    face,
                    count: indices.len(),
                }
                .into());
            }
            let points = self.mesh.face_points(face).ok_or_else(|| {
                let index = indices
                    .iter()
                    .copied()
                    .find(|&i| i >= self.mesh.vertex_count())
                    .unwrap_or_default();
                Defect::IndexOutOfRange {
                    face,
                    index,
                    vertex_count: self.mesh.vertex_count(),
                }
            })?;
            let normal = self
                .mesh
                .face_normal(face)
                .ok_or(Defect::ZeroAreaFace { face })?;

            let base = out.vertices.len() as u32;
            out.vertices.extend_from_slice(&points);
            out.normals.extend(std::iter::repeat_n(normal, points.len()));
            for k in 1..points.len() as u32 - 1 {
                out.indices.push([base, base + k, base + k + 1]);
                out.face_of_triangle.push(face);
            }
        }

        debug!(triangles = out.triangle_count(), "tessellated mesh");
        Ok(out)
    }
}
