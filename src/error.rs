use thiserror::Error;

/// Top-level error type for solid construction and mesh validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("unsupported solid: no regular solid has {face_count} faces")]
    UnsupportedSolid { face_count: usize },

    #[error("invalid parameter {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[from] Defect),
}

impl GeometryError {
    /// Returns `true` if reversing every face would repair the mesh.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DegenerateGeometry(defect) if defect.is_recoverable())
    }
}

/// A concrete violation of a mesh invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Defect {
    #[error("mesh has no vertices or no faces")]
    Empty,

    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteVertex { vertex: usize },

    #[error("face {face} has {count} vertices, at least 3 are required")]
    TooFewVertices { face: usize, count: usize },

    #[error("face {face} references vertex {index}, mesh has {vertex_count}")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("face {face} visits vertex {vertex} more than once")]
    RepeatedVertex { face: usize, vertex: usize },

    #[error("face {face} has a zero-length edge {from} -> {to}")]
    ZeroLengthEdge { face: usize, from: usize, to: usize },

    #[error("face {face} has collinear neighbours around vertex {vertex}")]
    CollinearCorner { face: usize, vertex: usize },

    #[error("face {face} has zero area")]
    ZeroAreaFace { face: usize },

    #[error("edge {a}-{b} borders only one face")]
    OpenEdge { a: usize, b: usize },

    #[error("edge {a}-{b} borders {count} faces")]
    NonManifoldEdge { a: usize, b: usize, count: usize },

    #[error("edge {a}-{b} is traversed in the same direction by both faces")]
    InconsistentWinding { a: usize, b: usize },

    #[error("vertex {vertex} is not used by any face")]
    UnreferencedVertex { vertex: usize },

    #[error("Euler characteristic is {actual}, a closed solid has 2")]
    EulerCharacteristic { actual: i64 },

    #[error("expected {expected} {entity}, found {actual}")]
    CountMismatch {
        entity: &'static str,
        expected: usize,
        actual: usize,
    },

    /// `volume` is relative to the cube of the bounding-box diagonal.
    #[error("enclosed volume is zero (relative volume {volume})")]
    ZeroVolume { volume: f64 },

    /// `volume` is relative to the cube of the bounding-box diagonal.
    #[error("enclosed volume is negative (relative volume {volume}), faces wind inward")]
    InvertedWinding { volume: f64 },
}

impl Defect {
    /// Returns `true` for defects that a global winding reversal repairs.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvertedWinding { .. })
    }
}

/// Convenience type alias for results using [`GeometryError`].
pub type Result<T> = std::result::Result<T, GeometryError>;
