//! Combinatorial templates for the five Platonic solids.
//!
//! Every template is centred on the origin with all vertices on a common
//! sphere; callers rescale to the requested circumradius. Faces come out
//! wound counter-clockwise seen from outside.

use crate::math::polygon_3d::{polygon_centroid, vector_area};
use crate::math::{Point3, Vector3};
use crate::mesh::Face;

/// Golden ratio.
const PHI: f64 = 1.618_033_988_749_895;

pub(super) fn tetrahedron() -> (Vec<Point3>, Vec<Face>) {
    let vertices = vec![
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(-1.0, -1.0, 1.0),
    ];
    let faces = deltahedron_faces(&vertices, 2.0 * 2f64.sqrt());
    (vertices, faces)
}

/// Unit cube with faces ordered so that faces `i` and `5 - i` are opposite.
pub(super) fn cube() -> (Vec<Point3>, Vec<Face>) {
    let vertices = vec![
        Point3::new(-1.0, -1.0, -1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(1.0, 1.0, -1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(-1.0, -1.0, 1.0),
        Point3::new(1.0, -1.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(-1.0, 1.0, 1.0),
    ];
    let mut faces = vec![
        vec![4, 5, 6, 7], // +z
        vec![0, 1, 5, 4], // -y
        vec![1, 2, 6, 5], // +x
        vec![3, 0, 4, 7], // -x
        vec![2, 3, 7, 6], // +y
        vec![0, 3, 2, 1], // -z
    ];
    for face in &mut faces {
        wind_outward(&vertices, face);
    }
    (vertices, faces)
}

pub(super) fn octahedron() -> (Vec<Point3>, Vec<Face>) {
    let vertices = vec![
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, -1.0),
    ];
    let faces = deltahedron_faces(&vertices, 2f64.sqrt());
    (vertices, faces)
}

pub(super) fn icosahedron() -> (Vec<Point3>, Vec<Face>) {
    let mut vertices = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-PHI, PHI] {
            vertices.push(Point3::new(0.0, a, b));
            vertices.push(Point3::new(a, b, 0.0));
            vertices.push(Point3::new(b, 0.0, a));
        }
    }
    let faces = deltahedron_faces(&vertices, 2.0);
    (vertices, faces)
}

/// Dual of the icosahedron: one vertex per icosahedron face centroid, one
/// pentagon per icosahedron vertex.
pub(super) fn dodecahedron() -> (Vec<Point3>, Vec<Face>) {
    let (ico_vertices, ico_faces) = icosahedron();

    let vertices: Vec<Point3> = ico_faces
        .iter()
        .filter_map(|face| {
            let points: Vec<Point3> = face.iter().map(|&i| ico_vertices[i]).collect();
            polygon_centroid(&points)
        })
        .collect();

    let mut faces = Vec::with_capacity(ico_vertices.len());
    for (vi, apex) in ico_vertices.iter().enumerate() {
        let ring: Vec<usize> = ico_faces
            .iter()
            .enumerate()
            .filter(|(_, face)| face.contains(&vi))
            .map(|(fi, _)| fi)
            .collect();
        let mut face = sort_around_axis(&vertices, ring, &apex.coords);
        wind_outward(&vertices, &mut face);
        faces.push(face);
    }
    (vertices, faces)
}

/// Every vertex triple whose pairwise distances all equal `edge_length`.
///
/// For the tetrahedron, octahedron and icosahedron the edge graph has no
/// triangles other than the faces, so this recovers the face list exactly.
fn deltahedron_faces(vertices: &[Point3], edge_length: f64) -> Vec<Face> {
    let is_edge = |a: usize, b: usize| {
        ((vertices[a] - vertices[b]).norm() - edge_length).abs() < 1e-9 * edge_length
    };
    let n = vertices.len();
    let mut faces = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            if !is_edge(i, j) {
                continue;
            }
            for k in j + 1..n {
                if is_edge(i, k) && is_edge(j, k) {
                    let mut face = vec![i, j, k];
                    wind_outward(vertices, &mut face);
                    faces.push(face);
                }
            }
        }
    }
    faces
}

/// Orders vertex indices counter-clockwise around `axis`.
fn sort_around_axis(vertices: &[Point3], indices: Vec<usize>, axis: &Vector3) -> Face {
    let axis = axis.normalize();
    let Some(&first) = indices.first() else {
        return indices;
    };
    let radial = |i: usize| {
        let v = vertices[i].coords;
        v - axis * v.dot(&axis)
    };
    let u = radial(first).normalize();
    let w = axis.cross(&u);
    let angle = |i: usize| {
        let d = radial(i);
        d.dot(&w).atan2(d.dot(&u))
    };

    let mut keyed: Vec<(f64, usize)> = indices.into_iter().map(|i| (angle(i), i)).collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, i)| i).collect()
}

/// Reverses a face's tail (keeping its lead vertex) if its normal points
/// toward the origin. Only meaningful for convex, origin-centred solids.
fn wind_outward(vertices: &[Point3], face: &mut Face) {
    let points: Vec<Point3> = face.iter().map(|&i| vertices[i]).collect();
    let Some(centroid) = polygon_centroid(&points) else {
        return;
    };
    if vector_area(&points).dot(&centroid.coords) < 0.0 {
        face[1..].reverse();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mesh::{validate, Mesh};

    fn check(template: (Vec<Point3>, Vec<Face>), counts: (usize, usize, usize)) {
        let (vertices, faces) = template;
        let radius = vertices[0].coords.norm();
        for v in &vertices {
            assert!((v.coords.norm() - radius).abs() < 1e-9, "vertex off sphere");
        }
        let mesh = Mesh::new(vertices, faces);
        assert_eq!(
            (mesh.vertex_count(), mesh.edge_count(), mesh.face_count()),
            counts
        );
        assert!(validate(&mesh).is_ok(), "{:?}", validate(&mesh));
    }

    #[test]
    fn tetrahedron_template() {
        check(tetrahedron(), (4, 6, 4));
    }

    #[test]
    fn cube_template() {
        check(cube(), (8, 12, 6));
    }

    #[test]
    fn octahedron_template() {
        check(octahedron(), (6, 12, 8));
    }

    #[test]
    fn icosahedron_template() {
        check(icosahedron(), (12, 30, 20));
    }

    #[test]
    fn dodecahedron_template() {
        check(dodecahedron(), (20, 30, 12));
    }

    #[test]
    fn dodecahedron_faces_are_planar_pentagons() {
        let (vertices, faces) = dodecahedron();
        for face in &faces {
            assert_eq!(face.len(), 5);
            let points: Vec<Point3> = face.iter().map(|&i| vertices[i]).collect();
            let normal = vector_area(&points).normalize();
            for p in &points[1..] {
                assert!((p - points[0]).dot(&normal).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn cube_opposite_faces_are_antiparallel() {
        let (vertices, faces) = cube();
        let mesh = Mesh::new(vertices, faces);
        for i in 0..3 {
            let a = mesh.face_normal(i).unwrap();
            let b = mesh.face_normal(5 - i).unwrap();
            assert!((a + b).norm() < 1e-9, "faces {i} and {} not opposite", 5 - i);
        }
    }
}
