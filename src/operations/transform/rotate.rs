use nalgebra::{Rotation3, Unit, UnitQuaternion};

use crate::error::{GeometryError, Result};
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};
use crate::mesh::Mesh;

use super::GeneralTransform;

/// Rotates a mesh around an axis.
pub struct Rotate {
    axis_origin: Point3,
    axis_direction: Vector3,
    angle: f64,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `angle` - Rotation angle in radians.
    #[must_use]
    pub fn new(axis_origin: Point3, axis_direction: Vector3, angle: f64) -> Self {
        Self {
            axis_origin,
            axis_direction,
            angle,
        }
    }

    /// Rotation about the origin from XYZ Euler angles (radians), applied
    /// as `roll` about x, then `pitch` about y, then `yaw` about z.
    #[must_use]
    pub fn from_euler_angles(roll: f64, pitch: f64, yaw: f64) -> Self {
        let (axis, angle) = UnitQuaternion::from_euler_angles(roll, pitch, yaw)
            .axis_angle()
            .map_or((Vector3::z(), 0.0), |(axis, angle)| (axis.into_inner(), angle));
        Self::new(Point3::origin(), axis, angle)
    }

    /// Executes the rotation, returning a new mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis direction is zero-length.
    pub fn execute(&self, mesh: &Mesh) -> Result<Mesh> {
        if self.axis_direction.norm() < TOLERANCE {
            return Err(GeometryError::InvalidParameter {
                parameter: "axis_direction",
                value: self.axis_direction.norm(),
                reason: "rotation axis must be non-zero",
            });
        }
        let axis = Unit::new_normalize(self.axis_direction);

        let t_neg = Matrix4::new_translation(&(-self.axis_origin.coords));
        let rot = Rotation3::from_axis_angle(&axis, self.angle).to_homogeneous();
        let t_pos = Matrix4::new_translation(&self.axis_origin.coords);

        GeneralTransform::new(t_pos * rot * t_neg).execute(mesh)
    }
}
