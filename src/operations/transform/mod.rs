mod general;
mod rotate;
mod scale;

pub use general::GeneralTransform;
pub use rotate::Rotate;
pub use scale::Scale;
