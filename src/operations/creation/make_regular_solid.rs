use std::fmt;

use tracing::{debug, instrument};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};
use crate::mesh::{orient_outward, Face, Mesh, ValidationParams};

use super::{check_non_negative, platonic};

/// The five convex regular polyhedra, identified by face count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlatonicSolid {
    Tetrahedron,
    Cube,
    Octahedron,
    Dodecahedron,
    Icosahedron,
}

impl PlatonicSolid {
    pub const ALL: [Self; 5] = [
        Self::Tetrahedron,
        Self::Cube,
        Self::Octahedron,
        Self::Dodecahedron,
        Self::Icosahedron,
    ];

    /// Looks up the solid with the given number of faces.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedSolid`] unless `face_count` is
    /// one of 4, 6, 8, 12 or 20.
    pub fn from_face_count(face_count: usize) -> Result<Self> {
        match face_count {
            4 => Ok(Self::Tetrahedron),
            6 => Ok(Self::Cube),
            8 => Ok(Self::Octahedron),
            12 => Ok(Self::Dodecahedron),
            20 => Ok(Self::Icosahedron),
            _ => Err(GeometryError::UnsupportedSolid { face_count }),
        }
    }

    /// Textbook `(vertices, edges, faces)`.
    #[must_use]
    pub fn counts(self) -> (usize, usize, usize) {
        match self {
            Self::Tetrahedron => (4, 6, 4),
            Self::Cube => (8, 12, 6),
            Self::Octahedron => (6, 12, 8),
            Self::Dodecahedron => (20, 30, 12),
            Self::Icosahedron => (12, 30, 20),
        }
    }

    #[must_use]
    pub fn face_count(self) -> usize {
        self.counts().2
    }

    fn template(self) -> (Vec<Point3>, Vec<Face>) {
        match self {
            Self::Tetrahedron => platonic::tetrahedron(),
            Self::Cube => platonic::cube(),
            Self::Octahedron => platonic::octahedron(),
            Self::Dodecahedron => platonic::dodecahedron(),
            Self::Icosahedron => platonic::icosahedron(),
        }
    }
}

impl fmt::Display for PlatonicSolid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tetrahedron => "tetrahedron",
            Self::Cube => "cube",
            Self::Octahedron => "octahedron",
            Self::Dodecahedron => "dodecahedron",
            Self::Icosahedron => "icosahedron",
        };
        f.write_str(name)
    }
}

/// Builds a Platonic solid centred on the origin with a given circumradius.
pub struct MakeRegularSolid {
    face_count: usize,
    circumradius: f64,
    validation: ValidationParams,
}

impl MakeRegularSolid {
    /// Creates a new `MakeRegularSolid` operation.
    #[must_use]
    pub fn new(face_count: usize, circumradius: f64) -> Self {
        Self {
            face_count,
            circumradius,
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
    /// Returns [`GeometryError::UnsupportedSolid`] for a face count outside
    /// {4, 6, 8, 12, 20}, [`GeometryError::InvalidParameter`] for a negative
    /// or non-finite circumradius, and [`GeometryError::DegenerateGeometry`]
    /// if the scaled solid collapses (zero radius).
    #[instrument(skip(self), fields(face_count = self.face_count, circumradius = self.circumradius))]
    pub fn execute(&self) -> Result<Mesh> {
        let solid = PlatonicSolid::from_face_count(self.face_count)?;
        check_non_negative("circumradius", self.circumradius)?;

        let (vertices, faces) = solid.template();
        let template_radius = vertices
            .iter()
            .map(|p| p.coords.norm())
            .fold(0.0, f64::max);
        let factor = if template_radius < TOLERANCE {
            0.0
        } else {
            self.circumradius / template_radius
        };

        let mesh = Mesh::new(vertices, faces).scaled(factor);
        let mesh = orient_outward(mesh, self.validation)?;
        super::check_counts(&mesh, solid.counts())?;

        debug!(
            %solid,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "built regular solid"
        );
        Ok(mesh)
    }
}
