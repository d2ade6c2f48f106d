use crate::error::{GeometryError, Result};
use crate::math::{Matrix4, TOLERANCE};
use crate::mesh::Mesh;

/// Applies an arbitrary 4x4 affine transformation to a mesh.
pub struct GeneralTransform {
    matrix: Matrix4,
}

impl GeneralTransform {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    /// Executes the transformation, returning a new mesh.
    ///
    /// Face order and vertex order are preserved. A mirroring transform
    /// (negative determinant) would turn the faces inside out, so every face
    /// is reversed to keep the winding outward.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidParameter`] if the linear part of the
    /// matrix is singular or not finite.
    pub fn execute(&self, mesh: &Mesh) -> Result<Mesh> {
        let det = self.matrix.fixed_view::<3, 3>(0, 0).clone_owned().determinant();
        if !det.is_finite() || det.abs() < TOLERANCE {
            return Err(GeometryError::InvalidParameter {
                parameter: "matrix",
                value: det,
                reason: "linear part must be invertible",
            });
        }

        let vertices = mesh
            .vertices()
            .iter()
            .map(|p| self.matrix.transform_point(p))
            .collect();
        let transformed = Mesh::new(vertices, mesh.faces().to_vec());

        Ok(if det < 0.0 {
            transformed.reversed()
        } else {
            transformed
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::mesh::tests::corner_tetrahedron;
    use crate::mesh::validate;
    use approx::assert_relative_eq;

    #[test]
    fn translation_keeps_volume() {
        let matrix = Matrix4::new_translation(&Vector3::new(3.0, -2.0, 1.0));
        let mesh = GeneralTransform::new(matrix)
            .execute(&corner_tetrahedron())
            .unwrap();
        assert_relative_eq!(mesh.vertices()[0], Point3::new(3.0, -2.0, 1.0));
        assert_relative_eq!(mesh.signed_volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn mirror_keeps_winding_outward() {
        let matrix = Matrix4::new_nonuniform_scaling(&Vector3::new(-1.0, 1.0, 1.0));
        let mesh = GeneralTransform::new(matrix)
            .execute(&corner_tetrahedron())
            .unwrap();
        assert!(mesh.signed_volume() > 0.0);
        assert!(validate(&mesh).is_ok());
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let matrix = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 0.0, 1.0));
        let err = GeneralTransform::new(matrix)
            .execute(&corner_tetrahedron())
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidParameter {
                parameter: "matrix",
                ..
            }
        ));
    }
}
