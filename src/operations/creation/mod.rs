mod make_regular_solid;
mod make_trapezohedron;
mod platonic;

pub use make_regular_solid::{MakeRegularSolid, PlatonicSolid};
pub use make_trapezohedron::{FaceLayout, MakeTrapezohedron, TrapezohedronParams, MAX_LOBE_COUNT};

use crate::error::{Defect, GeometryError, Result};
use crate::mesh::Mesh;

/// Rejects negative or non-finite construction parameters.
fn check_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(GeometryError::InvalidParameter {
            parameter,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(GeometryError::InvalidParameter {
            parameter,
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}

/// Checks `(vertices, edges, faces)` against the solid's combinatorics.
fn check_counts(mesh: &Mesh, (vertices, edges, faces): (usize, usize, usize)) -> Result<()> {
    let found = [
        ("vertices", vertices, mesh.vertex_count()),
        ("edges", edges, mesh.edge_count()),
        ("faces", faces, mesh.face_count()),
    ];
    for (entity, expected, actual) in found {
        if expected != actual {
            return Err(Defect::CountMismatch {
                entity,
                expected,
                actual,
            }
            .into());
        }
    }
    Ok(())
}
