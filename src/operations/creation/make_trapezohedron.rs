use std::f64::consts::{PI, TAU};

use tracing::{debug, instrument};

use crate::error::{GeometryError, Result};
use crate::math::{polar, Point3};
use crate::mesh::{orient_outward, Face, Mesh, ValidationParams};

use super::{check_counts, check_non_negative};

/// How the faces of a trapezohedron are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaceLayout {
    /// `2n` kites, alternating between the top and bottom apex.
    ///
    /// Face `2i` is `[top, u(i), l(i), u(i+1)]` and face `2i + 1` is
    /// `[bottom, l(i+1), u(i+1), l(i)]`, where `u` is the upper ring and `l`
    /// the lower ring. Each face leads with its apex.
    #[default]
    Kite,
    /// Two `n`-triangle pyramid caps stitched by `n` band quads.
    ///
    /// Faces `0..n` are the top cap, `n..2n` the bottom cap and `2n..3n`
    /// the band quads `[u(i), l(i-1), l(i), u(i+1)]`.
    Stitched,
}

/// Upper bound on `lobe_count`.
///
/// Far below any allocation limit. Past a few thousand lobes the ring
/// corners are already straight at the default tolerance.
pub const MAX_LOBE_COUNT: usize = 1 << 16;

/// Shape parameters of an `n`-gonal trapezohedron centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapezohedronParams {
    /// Number of lobes `n`: vertices per ring, and kites per half.
    pub lobe_count: usize,
    /// Distance of every ring vertex from the z-axis.
    pub ring_radius: f64,
    /// Height of the upper ring; the lower ring sits at `-apex_height`.
    pub apex_height: f64,
    /// Extra height of each apex beyond its ring.
    pub apex_extension: f64,
    pub layout: FaceLayout,
}

impl TrapezohedronParams {
    #[must_use]
    pub fn new(lobe_count: usize, ring_radius: f64, apex_height: f64, apex_extension: f64) -> Self {
        Self {
            lobe_count,
            ring_radius,
            apex_height,
            apex_extension,
            layout: FaceLayout::Kite,
        }
    }

    /// Parameters whose kite faces are exactly planar.
    ///
    /// With rings at `±h` the apex must sit at `h (1 + cos(π/n)) / (1 - cos(π/n))`
    /// for each apex, its two upper-ring neighbours and the lower-ring vertex
    /// between them to share a plane.
    #[must_use]
    pub fn with_planar_kites(lobe_count: usize, ring_radius: f64, ring_offset: f64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let c = (PI / lobe_count as f64).cos();
        let apex_extension = ring_offset * 2.0 * c / (1.0 - c);
        Self::new(lobe_count, ring_radius, ring_offset, apex_extension)
    }

    #[must_use]
    pub fn with_layout(mut self, layout: FaceLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Expected `(vertices, edges, faces)` for the chosen layout.
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        let n = self.lobe_count;
        match self.layout {
            FaceLayout::Kite => (2 * n + 2, 4 * n, 2 * n),
            FaceLayout::Stitched => (2 * n + 2, 5 * n, 3 * n),
        }
    }

    /// Height of the top apex above the origin.
    #[must_use]
    pub fn apex_z(&self) -> f64 {
        self.apex_height + self.apex_extension
    }

    #[allow(clippy::cast_precision_loss)]
    fn check(&self) -> Result<()> {
        if self.lobe_count < 3 {
            return Err(GeometryError::InvalidParameter {
                parameter: "lobe_count",
                value: self.lobe_count as f64,
                reason: "a trapezohedron needs at least 3 lobes",
            });
        }
        if self.lobe_count > MAX_LOBE_COUNT {
            return Err(GeometryError::InvalidParameter {
                parameter: "lobe_count",
                value: self.lobe_count as f64,
                reason: "too many lobes to build",
            });
        }
        check_non_negative("ring_radius", self.ring_radius)?;
        check_non_negative("apex_height", self.apex_height)?;
        check_non_negative("apex_extension", self.apex_extension)
    }
}

/// Builds an `n`-gonal trapezohedron; with `n = 5` this is the d10.
///
/// Vertex order: top apex, bottom apex, upper ring (`n` vertices at angles
/// `2πi/n`), lower ring (`n` vertices rotated by half a step). The half-step
/// rotation is what turns the faces into interlocking kites.
pub struct MakeTrapezohedron {
    params: TrapezohedronParams,
    validation: ValidationParams,
}

impl MakeTrapezohedron {
    /// Creates a new `MakeTrapezohedron` operation.
    #[must_use]
    pub fn new(params: TrapezohedronParams) -> Self {
        Self {
            params,
            validation: ValidationParams::default(),
        }
    }

    /// Sets the tolerances used to check the result.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationParams) -> Self {
        self.validation = validation;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidParameter`] for fewer than 3 lobes or
    /// a negative or non-finite dimension, checked before anything is built,
    /// and [`GeometryError::DegenerateGeometry`] if the parameters collapse
    /// the solid (zero ring radius, or everything flat).
    #[instrument(skip(self), fields(lobes = self.params.lobe_count, layout = ?self.params.layout))]
    pub fn execute(&self) -> Result<Mesh> {
        let params = &self.params;
        params.check()?;

        let n = params.lobe_count;
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / n as f64;
        let apex_z = params.apex_z();

        let mut vertices = Vec::with_capacity(2 * n + 2);
        vertices.push(Point3::new(0.0, 0.0, apex_z));
        vertices.push(Point3::new(0.0, 0.0, -apex_z));
        for i in 0..n {
            #[allow(clippy::cast_precision_loss)]
            let (x, y) = polar(params.ring_radius, step * i as f64);
            vertices.push(Point3::new(x, y, params.apex_height));
        }
        for i in 0..n {
            #[allow(clippy::cast_precision_loss)]
            let (x, y) = polar(params.ring_radius, step * i as f64 + step / 2.0);
            vertices.push(Point3::new(x, y, -params.apex_height));
        }

        let faces = match params.layout {
            FaceLayout::Kite => kite_faces(n),
            FaceLayout::Stitched => stitched_faces(n),
        };

        let mesh = orient_outward(Mesh::new(vertices, faces), self.validation)?;
        check_counts(&mesh, params.counts())?;

        debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            volume = mesh.signed_volume(),
            "built trapezohedron"
        );
        Ok(mesh)
    }
}

const TOP_APEX: usize = 0;
const BOTTOM_APEX: usize = 1;

/// Index of upper-ring vertex `i` (wrapping).
fn upper(n: usize, i: usize) -> usize {
    2 + i % n
}

/// Index of lower-ring vertex `i` (wrapping).
fn lower(n: usize, i: usize) -> usize {
    2 + n + i % n
}

fn kite_faces(n: usize) -> Vec<Face> {
    let mut faces = Vec::with_capacity(2 * n);
    for i in 0..n {
        faces.push(vec![TOP_APEX, upper(n, i), lower(n, i), upper(n, i + 1)]);
        faces.push(vec![
            BOTTOM_APEX,
            lower(n, i + 1),
            upper(n, i + 1),
            lower(n, i),
        ]);
    }
    faces
}

fn stitched_faces(n: usize) -> Vec<Face> {
    let mut faces = Vec::with_capacity(3 * n);
    faces.extend((0..n).map(|i| vec![TOP_APEX, upper(n, i), upper(n, i + 1)]));
    faces.extend((0..n).map(|i| vec![BOTTOM_APEX, lower(n, i + 1), lower(n, i)]));
    faces.extend(
        (0..n).map(|i| vec![upper(n, i), lower(n, i + n - 1), lower(n, i), upper(n, i + 1)]),
    );
    faces
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Defect;
    use crate::math::TOLERANCE;
    use crate::mesh::validate;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn d10() -> Mesh {
        MakeTrapezohedron::new(TrapezohedronParams::new(5, 0.5, 0.5, 0.3))
            .execute()
            .unwrap()
    }

    // ── kite layout ──

    #[test]
    fn d10_counts_and_apices() {
        let mesh = d10();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 10);
        assert_eq!(mesh.edge_count(), 20);
        assert_relative_eq!(mesh.vertices()[0], p(0.0, 0.0, 0.8), epsilon = TOLERANCE);
        assert_relative_eq!(mesh.vertices()[1], p(0.0, 0.0, -0.8), epsilon = TOLERANCE);
        assert!(mesh.faces().iter().all(|f| f.len() == 4));
    }

    #[test]
    fn d10_rings() {
        let mesh = d10();
        assert_relative_eq!(mesh.vertices()[2], p(0.5, 0.0, 0.5), epsilon = TOLERANCE);
        let (x, y) = polar(0.5, PI / 5.0);
        assert_relative_eq!(mesh.vertices()[7], p(x, y, -0.5), epsilon = TOLERANCE);
        for v in &mesh.vertices()[2..] {
            assert_relative_eq!(v.x.hypot(v.y), 0.5, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn kites_alternate_lead_apex() {
        let mesh = d10();
        for (i, face) in mesh.faces().iter().enumerate() {
            let expected = if i % 2 == 0 { TOP_APEX } else { BOTTOM_APEX };
            assert_eq!(face[0], expected, "face {i}");
        }
    }

    #[test]
    fn d10_is_valid_and_encloses_volume() {
        let mesh = d10();
        assert!(validate(&mesh).is_ok());
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn every_lobe_count_builds() {
        for n in 3..=16 {
            let mesh = MakeTrapezohedron::new(TrapezohedronParams::new(n, 1.0, 0.2, 1.0))
                .execute()
                .unwrap();
            assert_eq!(mesh.vertex_count(), 2 * n + 2);
            assert_eq!(mesh.face_count(), 2 * n);
        }
    }

    #[test]
    fn single_ring_variant() {
        // Both rings in the equator plane form one 2n-gon.
        let mesh = MakeTrapezohedron::new(TrapezohedronParams::new(5, 0.5, 0.0, 0.7))
            .execute()
            .unwrap();
        assert!(mesh.vertices()[2..].iter().all(|v| v.z.abs() < TOLERANCE));
        assert_eq!(mesh.face_count(), 10);
    }

    #[test]
    fn planar_kites() {
        let params = TrapezohedronParams::with_planar_kites(5, 0.5, 0.075);
        let mesh = MakeTrapezohedron::new(params).execute().unwrap();
        for f in 0..mesh.face_count() {
            let points = mesh.face_points(f).unwrap();
            let normal = mesh.face_normal(f).unwrap();
            for q in &points[1..] {
                assert!((q - points[0]).dot(&normal).abs() < 1e-9, "face {f} is bent");
            }
        }
    }

    #[test]
    fn planar_d10_apex_height() {
        let params = TrapezohedronParams::with_planar_kites(5, 0.5, 0.1);
        let c = (PI / 5.0).cos();
        assert_relative_eq!(params.apex_z(), 0.1 * (1.0 + c) / (1.0 - c), epsilon = TOLERANCE);
    }

    // ── stitched layout ──

    #[test]
    fn stitched_counts() {
        let params = TrapezohedronParams::new(5, 0.5, 0.5, 0.3).with_layout(FaceLayout::Stitched);
        let mesh = MakeTrapezohedron::new(params).execute().unwrap();
        assert_eq!(
            (mesh.vertex_count(), mesh.edge_count(), mesh.face_count()),
            (12, 25, 15)
        );
        assert!(mesh.faces()[..10].iter().all(|f| f.len() == 3));
        assert!(mesh.faces()[10..].iter().all(|f| f.len() == 4));
        assert!(validate(&mesh).is_ok());
    }

    // ── rejection ──

    #[test]
    fn two_lobes_is_invalid() {
        let err = MakeTrapezohedron::new(TrapezohedronParams::new(2, 0.5, 0.5, 0.3))
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidParameter {
                parameter: "lobe_count",
                ..
            }
        ));
    }

    #[test]
    fn absurd_lobe_counts_are_invalid() {
        for lobes in [MAX_LOBE_COUNT + 1, usize::MAX / 2, usize::MAX] {
            let err = MakeTrapezohedron::new(TrapezohedronParams::new(lobes, 0.5, 0.5, 0.3))
                .execute()
                .unwrap_err();
            assert!(matches!(
                err,
                GeometryError::InvalidParameter {
                    parameter: "lobe_count",
                    ..
                }
            ));
        }
    }

    #[test]
    fn negative_dimensions_are_invalid() {
        for (params, name) in [
            (TrapezohedronParams::new(5, -0.5, 0.5, 0.3), "ring_radius"),
            (TrapezohedronParams::new(5, 0.5, -0.5, 0.3), "apex_height"),
            (TrapezohedronParams::new(5, 0.5, 0.5, -0.3), "apex_extension"),
        ] {
            let err = MakeTrapezohedron::new(params).execute().unwrap_err();
            assert!(
                matches!(err, GeometryError::InvalidParameter { parameter, .. } if parameter == name)
            );
        }
    }

    #[test]
    fn zero_ring_radius_is_degenerate() {
        let err = MakeTrapezohedron::new(TrapezohedronParams::new(5, 0.0, 0.5, 0.3))
            .execute()
            .unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateGeometry(_)));
    }

    #[test]
    fn flat_parameters_enclose_nothing() {
        let err = MakeTrapezohedron::new(TrapezohedronParams::new(5, 0.5, 0.0, 0.0))
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::DegenerateGeometry(Defect::ZeroVolume { .. })
        ));
    }

    #[test]
    fn builds_are_deterministic() {
        assert_eq!(d10(), d10());
    }
}
