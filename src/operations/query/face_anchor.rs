use crate::math::polygon_3d::{polygon_centroid, polygon_normal};
use crate::math::{Point3, Vector3};
use crate::mesh::Mesh;

/// Where and how to place a label on a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceAnchor {
    pub face: usize,
    /// Mean of the face's vertices.
    pub centroid: Point3,
    /// Unit outward normal.
    pub normal: Vector3,
    /// Unit in-plane direction from the centroid toward the face's lead vertex.
    pub up: Vector3,
}

/// Computes a label anchor for every face of a mesh, in face order.
///
/// Faces whose normal or up direction cannot be formed (zero area, or the
/// lead vertex at the centroid) are skipped.
pub struct FaceAnchors<'a> {
    mesh: &'a Mesh,
}

impl<'a> FaceAnchors<'a> {
    /// Creates a new `FaceAnchors` query.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    #[must_use]
    pub fn execute(&self) -> Vec<FaceAnchor> {
        (0..self.mesh.face_count())
            .filter_map(|face| self.anchor(face))
            .collect()
    }

    fn anchor(&self, face: usize) -> Option<FaceAnchor> {
        let points = self.mesh.face_points(face)?;
        let centroid = polygon_centroid(&points)?;
        let normal = polygon_normal(&points)?;
        let to_lead = points[0] - centroid;
        let up = (to_lead - normal * to_lead.dot(&normal)).try_normalize(0.0)?;
        Some(FaceAnchor {
            face,
            centroid,
            normal,
            up,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tests::corner_tetrahedron;
    use approx::assert_relative_eq;

    #[test]
    fn one_anchor_per_face() {
        let mesh = corner_tetrahedron();
        let anchors = FaceAnchors::new(&mesh).execute();
        assert_eq!(anchors.len(), 4);
        for (i, anchor) in anchors.iter().enumerate() {
            assert_eq!(anchor.face, i);
            assert_relative_eq!(anchor.normal.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(anchor.up.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(anchor.up.dot(&anchor.normal), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn bottom_face_anchor() {
        let mesh = corner_tetrahedron();
        let anchor = FaceAnchors::new(&mesh).execute()[0];
        assert_relative_eq!(anchor.normal, -Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(anchor.centroid, Point3::new(1.0 / 3.0, 1.0 / 3.0, 0.0), epsilon = 1e-12);
        // The lead vertex is the origin corner.
        let k = -1.0 / 2f64.sqrt();
        assert_relative_eq!(anchor.up, Vector3::new(k, k, 0.0), epsilon = 1e-12);
    }
}
