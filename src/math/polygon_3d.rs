use super::{Point3, Vector3};

/// Vector area of a closed 3D polygon.
///
/// The direction follows the right-hand rule over the vertex order and the
/// magnitude is twice the polygon area. The polygon need not be planar.
#[must_use]
pub fn vector_area(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut cross_sum = Vector3::zeros();
    if n < 3 {
        return cross_sum;
    }
    let o = &points[0];
    for i in 1..n - 1 {
        let a = points[i] - o;
        let b = points[i + 1] - o;
        cross_sum += a.cross(&b);
    }
    cross_sum
}

/// Area of a 3D polygon (half the magnitude of its vector area).
#[must_use]
pub fn polygon_area_3d(points: &[Point3]) -> f64 {
    0.5 * vector_area(points).norm()
}

/// Unit normal of a polygon, or `None` when its area vanishes.
#[must_use]
pub fn polygon_normal(points: &[Point3]) -> Option<Vector3> {
    vector_area(points).try_normalize(0.0)
}

/// Arithmetic mean of the polygon vertices.
#[must_use]
pub fn polygon_centroid(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / n))
}

/// Distance from `corner` to the line through `prev` and `next`.
///
/// Returns `0.0` if `prev` and `next` coincide.
#[must_use]
pub fn corner_deviation(prev: &Point3, corner: &Point3, next: &Point3) -> f64 {
    let base = next - prev;
    let len = base.norm();
    if len == 0.0 {
        return 0.0;
    }
    (corner - prev).cross(&base).norm() / len
}

/// Six times the signed volume swept by a polygon against the origin.
///
/// The polygon is fan-triangulated from its first vertex. Summed over the
/// faces of a closed mesh the result is independent of the origin.
#[must_use]
pub fn signed_volume_x6(points: &[Point3]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let v0 = points[0].coords;
    let mut det_sum = 0.0;
    for i in 1..n - 1 {
        let v1 = points[i].coords;
        let v2 = points[i + 1].coords;
        det_sum += v0.dot(&v1.cross(&v2));
    }
    det_sum
}
