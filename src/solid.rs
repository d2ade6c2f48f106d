//! The single entry point that turns a solid description into a mesh.

use std::fmt;

use tracing::instrument;

use crate::error::Result;
use crate::mesh::{Mesh, Validate, ValidationParams};
use crate::operations::creation::{
    MakeRegularSolid, MakeTrapezohedron, PlatonicSolid, TrapezohedronParams,
};

/// Construction path a descriptor takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolidFamily {
    /// Fixed combinatorial template scaled to a circumradius.
    Regular,
    /// Two offset rings closed by a pair of apices.
    Trapezohedron,
}

impl fmt::Display for SolidFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => f.write_str("regular"),
            Self::Trapezohedron => f.write_str("trapezohedron"),
        }
    }
}

/// Input parameters of a solid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolidDescriptor {
    /// A Platonic solid selected by face count.
    Regular { face_count: usize, circumradius: f64 },
    /// An `n`-gonal trapezohedron.
    Trapezohedron(TrapezohedronParams),
}

impl SolidDescriptor {
    #[must_use]
    pub fn family(&self) -> SolidFamily {
        match self {
            Self::Regular { .. } => SolidFamily::Regular,
            Self::Trapezohedron(_) => SolidFamily::Trapezohedron,
        }
    }

    /// Number of faces the built mesh will have.
    #[must_use]
    pub fn face_count(&self) -> usize {
        match self {
            Self::Regular { face_count, .. } => *face_count,
            Self::Trapezohedron(params) => params.counts().2,
        }
    }

    /// Expected `(vertices, edges, faces)` of the built mesh.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeometryError::UnsupportedSolid`] for a regular
    /// descriptor whose face count names no Platonic solid.
    pub fn expected_counts(&self) -> Result<(usize, usize, usize)> {
        match self {
            Self::Regular { face_count, .. } => {
                Ok(PlatonicSolid::from_face_count(*face_count)?.counts())
            }
            Self::Trapezohedron(params) => Ok(params.counts()),
        }
    }
}

/// Builds closed, outward-wound meshes from [`SolidDescriptor`]s.
///
/// Holds no state besides its validation tolerances; every call returns an
/// independent mesh owned by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidBuilder {
    validation: ValidationParams,
}

impl SolidBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tolerances every built mesh is checked against.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationParams) -> Self {
        self.validation = validation;
        self
    }

    /// Builds the solid a descriptor names.
    ///
    /// # Errors
    ///
    /// Propagates the error of the construction path, see
    /// [`Self::build_regular_solid`] and [`Self::build_trapezohedron`].
    #[instrument(skip(self), fields(family = %descriptor.family()))]
    pub fn build(&self, descriptor: &SolidDescriptor) -> Result<Mesh> {
        match *descriptor {
            SolidDescriptor::Regular {
                face_count,
                circumradius,
            } => self.build_regular_solid(face_count, circumradius),
            SolidDescriptor::Trapezohedron(params) => self.build_trapezohedron(params),
        }
    }

    /// Builds a Platonic solid with the given circumradius.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeometryError::UnsupportedSolid`] unless `face_count`
    /// is 4, 6, 8, 12 or 20, [`crate::GeometryError::InvalidParameter`] for a
    /// negative or non-finite radius and
    /// [`crate::GeometryError::DegenerateGeometry`] for a zero radius.
    pub fn build_regular_solid(&self, face_count: usize, circumradius: f64) -> Result<Mesh> {
        MakeRegularSolid::new(face_count, circumradius)
            .with_validation(self.validation)
            .execute()
    }

    /// Builds a kite-faced trapezohedron. `lobe_count = 5` is the d10.
    ///
    /// The apices sit at `±(apex_height + apex_extension)`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeometryError::InvalidParameter`] for fewer than 3
    /// lobes or a negative dimension and
    /// [`crate::GeometryError::DegenerateGeometry`] if the parameters cannot
    /// enclose a volume.
    pub fn build_pentagonal_trapezohedron(
        &self,
        lobe_count: usize,
        ring_radius: f64,
        apex_height: f64,
        apex_extension: f64,
    ) -> Result<Mesh> {
        self.build_trapezohedron(TrapezohedronParams::new(
            lobe_count,
            ring_radius,
            apex_height,
            apex_extension,
        ))
    }

    /// Builds a trapezohedron with full control over its face layout.
    ///
    /// # Errors
    ///
    /// See [`Self::build_pentagonal_trapezohedron`].
    pub fn build_trapezohedron(&self, params: TrapezohedronParams) -> Result<Mesh> {
        MakeTrapezohedron::new(params)
            .with_validation(self.validation)
            .execute()
    }

    /// Checks a mesh against the closure, winding and non-degeneracy
    /// invariants using this builder's tolerances.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeometryError::DegenerateGeometry`] naming the first
    /// violated invariant.
    pub fn validate(&self, mesh: &Mesh) -> Result<()> {
        Validate::new(self.validation).execute(mesh)
    }
}
