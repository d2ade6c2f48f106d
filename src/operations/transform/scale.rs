use crate::error::{GeometryError, Result};
use crate::math::{Matrix4, Point3, TOLERANCE};
use crate::mesh::Mesh;

use super::GeneralTransform;

/// Scales a mesh uniformly from a center point.
pub struct Scale {
    center: Point3,
    factor: f64,
}

impl Scale {
    /// Creates a new `Scale` operation.
    #[must_use]
    pub fn new(center: Point3, factor: f64) -> Self {
        Self { center, factor }
    }

    /// Executes the scaling, returning a new mesh.
    ///
    /// A negative factor mirrors through the center; faces are re-wound so
    /// they still face outward.
    ///
    /// # Errors
    ///
    /// Returns an error if the factor is zero or not finite.
    pub fn execute(&self, mesh: &Mesh) -> Result<Mesh> {
        if !self.factor.is_finite() || self.factor.abs() < TOLERANCE {
            return Err(GeometryError::InvalidParameter {
                parameter: "factor",
                value: self.factor,
                reason: "scale factor must be finite and non-zero",
            });
        }
        let t_neg = Matrix4::new_translation(&(-self.center.coords));
        let scaling = Matrix4::new_scaling(self.factor);
        let t_pos = Matrix4::new_translation(&self.center.coords);

        GeneralTransform::new(t_pos * scaling * t_neg).execute(mesh)
    }
}
