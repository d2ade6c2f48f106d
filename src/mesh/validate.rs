use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::error::{Defect, GeometryError, Result};
use crate::math::polygon_3d::{corner_deviation, polygon_area_3d};
use crate::math::{Point3, RELATIVE_EPSILON};
use crate::operations::query::BoundingBox;

use super::{edge_key, face_edges, EdgeKey, Mesh};

/// Parameters controlling validation tolerances.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationParams {
    /// Fraction of the mesh scale below which a length counts as zero.
    ///
    /// Checks run on a copy of the mesh centred on its bounding box and
    /// divided by the box diagonal, so lengths, areas and volumes are all
    /// compared against `relative_epsilon` in that unit frame.
    pub relative_epsilon: f64,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            relative_epsilon: RELATIVE_EPSILON,
        }
    }
}

/// Checks a mesh against the closed-solid invariants.
///
/// In order: index validity and per-face non-degeneracy, edge closure and
/// winding consistency, Euler characteristic, and finally the sign of the
/// enclosed volume. The first violation found is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validate {
    params: ValidationParams,
}

/// How often an undirected edge is walked in each direction.
#[derive(Debug, Default, Clone, Copy)]
struct EdgeUse {
    forward: usize,
    backward: usize,
}

impl Validate {
    /// Creates a new `Validate` operation.
    #[must_use]
    pub fn new(params: ValidationParams) -> Self {
        Self { params }
    }

    /// Executes the validation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateGeometry`] carrying the first
    /// violated invariant. [`Defect::InvertedWinding`] is recoverable via
    /// [`orient_outward`].
    #[instrument(skip_all, fields(vertices = mesh.vertex_count(), faces = mesh.face_count()))]
    pub fn execute(&self, mesh: &Mesh) -> Result<()> {
        if mesh.vertex_count() == 0 || mesh.face_count() == 0 {
            return Err(Defect::Empty.into());
        }
        if let Some(vertex) = mesh
            .vertices()
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(Defect::NonFiniteVertex { vertex }.into());
        }

        check_indices(mesh)?;

        let (unit, scale) = normalized(mesh);
        let epsilon = scale * self.params.relative_epsilon;
        check_face_shapes(&unit, epsilon, scale)?;

        let edges = collect_edge_uses(mesh);
        check_edges(&edges)?;
        check_euler(mesh, edges.len())?;

        let volume = unit.signed_volume();
        let volume_epsilon = epsilon * scale * scale;
        if volume.abs() <= volume_epsilon {
            return Err(Defect::ZeroVolume { volume }.into());
        }
        if volume < 0.0 {
            return Err(Defect::InvertedWinding { volume }.into());
        }

        debug!(volume, edges = edges.len(), "mesh valid");
        Ok(())
    }
}

/// Validates a mesh with default tolerances.
///
/// # Errors
///
/// See [`Validate::execute`].
pub fn validate(mesh: &Mesh) -> Result<()> {
    Validate::default().execute(mesh)
}

/// Validates a mesh, reversing every face if it only fails by winding inward.
///
/// # Errors
///
/// Returns any non-recoverable defect, either of the input or of the
/// reversed mesh.
pub fn orient_outward(mesh: Mesh, params: ValidationParams) -> Result<Mesh> {
    let validator = Validate::new(params);
    match validator.execute(&mesh) {
        Ok(()) => Ok(mesh),
        Err(GeometryError::DegenerateGeometry(Defect::InvertedWinding { volume })) => {
            debug!(volume, "reversing inward-wound faces");
            let flipped = mesh.reversed();
            validator.execute(&flipped)?;
            Ok(flipped)
        }
        Err(err) => Err(err),
    }
}

/// Recentres the mesh on its bounding box and divides by the box diagonal,
/// returning the normalised mesh and its scale.
///
/// Shape and volume checks run on the normalised copy so that products of
/// coordinates neither overflow nor underflow. A mesh whose diagonal is zero
/// or not finite is returned as is, with its raw scale.
fn normalized(mesh: &Mesh) -> (Mesh, f64) {
    let Some(aabb) = BoundingBox::new(mesh).execute() else {
        return (mesh.clone(), 0.0);
    };
    let scale = aabb.diagonal();
    if scale == 0.0 || !scale.is_finite() {
        return (mesh.clone(), scale);
    }
    let center = aabb.center();
    let vertices = mesh
        .vertices()
        .iter()
        .map(|p| Point3::from((p - center) / scale))
        .collect();
    (Mesh::new(vertices, mesh.faces().to_vec()), 1.0)
}

fn check_indices(mesh: &Mesh) -> Result<()> {
    let vertex_count = mesh.vertex_count();
    let mut referenced = vec![false; vertex_count];

    for (face_idx, face) in mesh.faces().iter().enumerate() {
        if face.len() < 3 {
            return Err(Defect::TooFewVertices {
                face: face_idx,
                count: face.len(),
            }
            .into());
        }
        for (k, &index) in face.iter().enumerate() {
            if index >= vertex_count {
                return Err(Defect::IndexOutOfRange {
                    face: face_idx,
                    index,
                    vertex_count,
                }
                .into());
            }
            if face[..k].contains(&index) {
                return Err(Defect::RepeatedVertex {
                    face: face_idx,
                    vertex: index,
                }
                .into());
            }
            referenced[index] = true;
        }
    }

    match referenced.iter().position(|used| !used) {
        Some(vertex) => Err(Defect::UnreferencedVertex { vertex }.into()),
        None => Ok(()),
    }
}

/// Zero-length edges, collinear corners and zero-area faces.
fn check_face_shapes(mesh: &Mesh, epsilon: f64, scale: f64) -> Result<()> {
    let vertices = mesh.vertices();
    for (face_idx, face) in mesh.faces().iter().enumerate() {
        for (from, to) in face_edges(face) {
            if (vertices[to] - vertices[from]).norm() <= epsilon {
                return Err(Defect::ZeroLengthEdge {
                    face: face_idx,
                    from,
                    to,
                }
                .into());
            }
        }

        let n = face.len();
        for k in 0..n {
            let prev = &vertices[face[(k + n - 1) % n]];
            let corner = &vertices[face[k]];
            let next = &vertices[face[(k + 1) % n]];
            if corner_deviation(prev, corner, next) <= epsilon {
                return Err(Defect::CollinearCorner {
                    face: face_idx,
                    vertex: face[k],
                }
                .into());
            }
        }

        let points: Vec<_> = face.iter().map(|&i| vertices[i]).collect();
        if polygon_area_3d(&points) <= epsilon * scale {
            return Err(Defect::ZeroAreaFace { face: face_idx }.into());
        }
    }
    Ok(())
}

fn collect_edge_uses(mesh: &Mesh) -> BTreeMap<EdgeKey, EdgeUse> {
    let mut edges: BTreeMap<EdgeKey, EdgeUse> = BTreeMap::new();
    for face in mesh.faces() {
        for (a, b) in face_edges(face) {
            let entry = edges.entry(edge_key(a, b)).or_default();
            if a < b {
                entry.forward += 1;
            } else {
                entry.backward += 1;
            }
        }
    }
    edges
}

/// Every edge borders exactly two faces, which walk it in opposite directions.
fn check_edges(edges: &BTreeMap<EdgeKey, EdgeUse>) -> Result<()> {
    for (&(a, b), usage) in edges {
        let count = usage.forward + usage.backward;
        if count == 1 {
            return Err(Defect::OpenEdge { a, b }.into());
        }
        if count != 2 {
            return Err(Defect::NonManifoldEdge { a, b, count }.into());
        }
        if usage.forward != 1 {
            return Err(Defect::InconsistentWinding { a, b }.into());
        }
    }
    Ok(())
}

#[allow(clippy::cast_possible_wrap)]
fn check_euler(mesh: &Mesh, edge_count: usize) -> Result<()> {
    let actual = mesh.vertex_count() as i64 - edge_count as i64 + mesh.face_count() as i64;
    if actual == 2 {
        Ok(())
    } else {
        Err(Defect::EulerCharacteristic { actual }.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::mesh::tests::corner_tetrahedron;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn defect_of(mesh: &Mesh) -> Defect {
        match validate(mesh) {
            Err(GeometryError::DegenerateGeometry(defect)) => defect,
            other => panic!("expected a defect, got {other:?}"),
        }
    }

    fn with_faces(faces: Vec<Vec<usize>>) -> Mesh {
        let (vertices, _) = corner_tetrahedron().into_parts();
        Mesh::new(vertices, faces)
    }

    #[test]
    fn tetrahedron_is_valid() {
        assert!(validate(&corner_tetrahedron()).is_ok());
    }

    #[test]
    fn empty_mesh() {
        assert_eq!(defect_of(&Mesh::new(vec![], vec![])), Defect::Empty);
    }

    #[test]
    fn non_finite_vertex() {
        let (mut vertices, faces) = corner_tetrahedron().into_parts();
        vertices[2] = p(f64::NAN, 0.0, 0.0);
        assert_eq!(
            defect_of(&Mesh::new(vertices, faces)),
            Defect::NonFiniteVertex { vertex: 2 }
        );
    }

    // ── indices ──

    #[test]
    fn two_vertex_face() {
        let mesh = with_faces(vec![vec![0, 1]]);
        assert_eq!(defect_of(&mesh), Defect::TooFewVertices { face: 0, count: 2 });
    }

    #[test]
    fn index_out_of_range() {
        let mesh = with_faces(vec![vec![0, 2, 1], vec![0, 1, 9]]);
        assert_eq!(
            defect_of(&mesh),
            Defect::IndexOutOfRange {
                face: 1,
                index: 9,
                vertex_count: 4
            }
        );
    }

    #[test]
    fn repeated_vertex() {
        let mesh = with_faces(vec![vec![0, 2, 0]]);
        assert_eq!(defect_of(&mesh), Defect::RepeatedVertex { face: 0, vertex: 0 });
    }

    #[test]
    fn unreferenced_vertex() {
        let (mut vertices, faces) = corner_tetrahedron().into_parts();
        vertices.push(p(5.0, 5.0, 5.0));
        assert_eq!(
            defect_of(&Mesh::new(vertices, faces)),
            Defect::UnreferencedVertex { vertex: 4 }
        );
    }

    // ── face shapes ──

    #[test]
    fn coincident_vertices_make_zero_length_edge() {
        let (mut vertices, faces) = corner_tetrahedron().into_parts();
        vertices[2] = vertices[0];
        assert_eq!(
            defect_of(&Mesh::new(vertices, faces)),
            Defect::ZeroLengthEdge {
                face: 0,
                from: 0,
                to: 2
            }
        );
    }

    #[test]
    fn collinear_corner() {
        let (mut vertices, faces) = corner_tetrahedron().into_parts();
        vertices[2] = p(2.0, 0.0, 0.0);
        assert_eq!(
            defect_of(&Mesh::new(vertices, faces)),
            Defect::CollinearCorner { face: 0, vertex: 0 }
        );
    }

    #[test]
    fn tolerance_follows_scale() {
        for scale in [1e-150, 1e-9, 1e9, 1e150] {
            let mesh = corner_tetrahedron().scaled(scale);
            assert!(validate(&mesh).is_ok(), "scale {scale}: {:?}", validate(&mesh));
        }
    }

    #[test]
    fn extreme_scales_keep_the_real_defect() {
        let defect = defect_of(&corner_tetrahedron().scaled(1e150).reversed());
        assert!(matches!(defect, Defect::InvertedWinding { volume } if volume.is_finite()));

        let (mut vertices, faces) = corner_tetrahedron().scaled(1e-150).into_parts();
        vertices[2] = p(2e-150, 0.0, 0.0);
        assert_eq!(
            defect_of(&Mesh::new(vertices, faces)),
            Defect::CollinearCorner { face: 0, vertex: 0 }
        );
    }

    // ── edges ──

    #[test]
    fn missing_face_leaves_open_edges() {
        let mesh = with_faces(vec![vec![0, 2, 1], vec![0, 1, 3], vec![0, 3, 2]]);
        assert_eq!(defect_of(&mesh), Defect::OpenEdge { a: 1, b: 2 });
    }

    #[test]
    fn duplicated_face_is_non_manifold() {
        let mut faces = corner_tetrahedron().into_parts().1;
        faces.push(vec![1, 2, 3]);
        assert_eq!(
            defect_of(&with_faces(faces)),
            Defect::NonManifoldEdge { a: 1, b: 2, count: 3 }
        );
    }

    #[test]
    fn single_flipped_face_is_inconsistent() {
        let mesh = with_faces(vec![vec![0, 2, 1], vec![0, 1, 3], vec![0, 3, 2], vec![1, 3, 2]]);
        assert_eq!(defect_of(&mesh), Defect::InconsistentWinding { a: 1, b: 2 });
    }

    // ── volume ──

    #[test]
    fn fully_reversed_mesh_is_inverted() {
        let defect = defect_of(&corner_tetrahedron().reversed());
        assert!(matches!(defect, Defect::InvertedWinding { volume } if volume < 0.0));
        assert!(defect.is_recoverable());
    }

    #[test]
    fn orient_outward_repairs_inverted_mesh() {
        let mesh = orient_outward(corner_tetrahedron().reversed(), ValidationParams::default())
            .unwrap();
        assert_eq!(mesh, corner_tetrahedron());
    }

    #[test]
    fn orient_outward_keeps_valid_mesh() {
        let mesh = orient_outward(corner_tetrahedron(), ValidationParams::default()).unwrap();
        assert_eq!(mesh, corner_tetrahedron());
    }

    #[test]
    fn orient_outward_rejects_open_mesh() {
        let mesh = with_faces(vec![vec![0, 2, 1], vec![0, 1, 3], vec![0, 3, 2]]);
        let err = orient_outward(mesh, ValidationParams::default()).unwrap_err();
        assert!(!err.is_recoverable());
    }
}
