mod bounding_box;
mod face_anchor;
mod is_valid;

pub use bounding_box::{Aabb, BoundingBox};
pub use face_anchor::{FaceAnchor, FaceAnchors};
pub use is_valid::IsValid;
