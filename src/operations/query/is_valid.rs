use crate::mesh::{Mesh, Validate, ValidationParams};

/// Checks whether a mesh is a closed, outward-wound, non-degenerate solid.
pub struct IsValid<'a> {
    mesh: &'a Mesh,
    params: ValidationParams,
}

impl<'a> IsValid<'a> {
    /// Creates a new `IsValid` query with default tolerances.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self {
            mesh,
            params: ValidationParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: ValidationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the validation, returning `true` if the mesh is valid.
    #[must_use]
    pub fn execute(&self) -> bool {
        Validate::new(self.params).execute(self.mesh).is_ok()
    }
}
