use crate::math::{Point3, Vector3};
use crate::mesh::Mesh;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    #[must_use]
    pub fn extent(&self) -> Vector3 {
        self.max - self.min
    }

    /// Length of the box diagonal.
    ///
    /// The extent is divided by its largest component before squaring, so
    /// the result stays finite for any box whose diagonal is representable.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        let extent = self.extent();
        let largest = extent.amax();
        if largest == 0.0 || !largest.is_finite() {
            return largest;
        }
        largest * (extent / largest).norm()
    }

    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Computes the axis-aligned bounding box of a mesh's vertices.
pub struct BoundingBox<'a> {
    mesh: &'a Mesh,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning `None` for a mesh without vertices.
    #[must_use]
    pub fn execute(&self) -> Option<Aabb> {
        let (first, rest) = self.mesh.vertices().split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)));
        Some(Aabb { min, max })
    }
}
