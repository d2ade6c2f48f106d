//! Hand-off to a rendering or export collaborator.
//!
//! The crate produces pure geometry. Whatever finishes a die (bevelling,
//! materials, numbering, writing images) sits behind [`RenderTarget`] and
//! receives each mesh by value.

use std::convert::Infallible;

use crate::error::{GeometryError, Result};
use crate::mesh::Mesh;
use crate::tessellation::{TessellateMesh, TriangleMesh};

/// A collaborator that takes ownership of a finished mesh.
pub trait RenderTarget {
    /// What the collaborator makes of a mesh.
    type Renderable;
    /// Failure raised by the collaborator.
    type Error;

    /// Accepts a mesh and returns the collaborator's object for it.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error if it cannot take the mesh.
    fn accept(&mut self, mesh: Mesh) -> std::result::Result<Self::Renderable, Self::Error>;
}

/// Flat vertex and face buffers, the neutral exchange format.
///
/// Positions are `[x, y, z]` triples in vertex index order; each face is a
/// list of at least three indices wound counter-clockwise from outside.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshBuffers {
    pub positions: Vec<[f64; 3]>,
    pub faces: Vec<Vec<usize>>,
}

impl From<Mesh> for MeshBuffers {
    fn from(mesh: Mesh) -> Self {
        let (vertices, faces) = mesh.into_parts();
        Self {
            positions: vertices.iter().map(|p| [p.x, p.y, p.z]).collect(),
            faces,
        }
    }
}

/// Target that exports meshes as [`MeshBuffers`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferExport;

impl RenderTarget for BufferExport {
    type Renderable = MeshBuffers;
    type Error = Infallible;

    fn accept(&mut self, mesh: Mesh) -> std::result::Result<MeshBuffers, Infallible> {
        Ok(mesh.into())
    }
}

/// Target that flat-shades meshes into triangles for a GPU-style consumer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangleExport;

impl RenderTarget for TriangleExport {
    type Renderable = TriangleMesh;
    type Error = GeometryError;

    fn accept(&mut self, mesh: Mesh) -> Result<TriangleMesh> {
        TessellateMesh::new(&mesh).execute()
    }
}
