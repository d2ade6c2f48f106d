pub mod polygon_3d;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Absolute tolerance for comparisons that are independent of model scale.
pub const TOLERANCE: f64 = 1e-10;

/// Default relative epsilon: lengths below `scale * RELATIVE_EPSILON` count as zero.
pub const RELATIVE_EPSILON: f64 = 1e-6;

/// Returns `(x, y)` of a point at `angle` on a circle of `radius` around the z-axis.
#[must_use]
pub fn polar(radius: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (radius * cos, radius * sin)
}
