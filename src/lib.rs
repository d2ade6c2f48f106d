pub mod dice;
pub mod error;
pub mod math;
pub mod mesh;
pub mod operations;
pub mod render;
pub mod solid;
pub mod tessellation;

pub use dice::DieKind;
pub use error::{Defect, GeometryError, Result};
pub use mesh::{Mesh, ValidationParams};
pub use operations::creation::{FaceLayout, TrapezohedronParams};
pub use render::{MeshBuffers, RenderTarget};
pub use solid::{SolidBuilder, SolidDescriptor, SolidFamily};
