//! The dice catalogue: which solid each die is, how big it is drawn, how it
//! rests, and which value is printed on each face.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::mesh::Mesh;
use crate::operations::creation::TrapezohedronParams;
use crate::operations::transform::Rotate;
use crate::solid::{SolidBuilder, SolidDescriptor};

/// Circumradius of a die drawn at display scale 1.
pub const BASE_SIZE: f64 = 1.05;

const D10_RING_RADIUS: f64 = 0.5;
const D10_RING_OFFSET: f64 = 0.075;

/// A standard gaming die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DieKind {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    /// Percentile die: a d10 printed in tens.
    D100,
}

impl DieKind {
    pub const ALL: [Self; 7] = [
        Self::D4,
        Self::D6,
        Self::D8,
        Self::D10,
        Self::D12,
        Self::D20,
        Self::D100,
    ];

    /// Number of faces.
    #[must_use]
    pub fn sides(self) -> usize {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 | Self::D100 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
        }
    }

    /// Size relative to [`BASE_SIZE`] so that a set of dice reads evenly.
    #[must_use]
    pub fn display_scale(self) -> f64 {
        match self {
            Self::D4 | Self::D8 | Self::D20 => 0.8,
            Self::D6 | Self::D10 | Self::D100 => 1.0,
            Self::D12 => 0.7,
        }
    }

    /// Solid description at display size.
    ///
    /// The d10 family has its own dimensions: a ring radius of 0.5 with
    /// planar kites, which puts the apices about 0.71 from the centre.
    #[must_use]
    pub fn descriptor(self) -> SolidDescriptor {
        let scale = self.display_scale();
        match self {
            Self::D10 | Self::D100 => {
                SolidDescriptor::Trapezohedron(TrapezohedronParams::with_planar_kites(
                    5,
                    D10_RING_RADIUS * scale,
                    D10_RING_OFFSET * scale,
                ))
            }
            _ => SolidDescriptor::Regular {
                face_count: self.sides(),
                circumradius: BASE_SIZE * scale,
            },
        }
    }

    /// Resting pose as XYZ Euler angles in radians.
    #[must_use]
    pub fn rotation(self) -> (f64, f64, f64) {
        match self {
            Self::D4 => (90f64.to_radians(), 0.0, 0.0),
            Self::D12 => (0.0, 0.0, 60f64.to_radians()),
            Self::D20 => (0.0, 32f64.to_radians(), 20f64.to_radians()),
            Self::D6 | Self::D8 | Self::D10 | Self::D100 => (0.0, 0.0, 0.0),
        }
    }

    /// Value printed on the face with the given index, or `None` past the last face.
    ///
    /// Faces read `1..=n`, except the d10 (`0..=9`) and the d100 (`0, 10, .., 90`).
    #[must_use]
    pub fn face_value(self, face: usize) -> Option<u32> {
        if face >= self.sides() {
            return None;
        }
        let face = u32::try_from(face).ok()?;
        Some(match self {
            Self::D10 => face,
            Self::D100 => face * 10,
            _ => face + 1,
        })
    }

    /// Printed text of a face. The d100 pads to two digits (`"00"`, `"10"`, ..).
    #[must_use]
    pub fn face_label(self, face: usize) -> Option<String> {
        let value = self.face_value(face)?;
        Some(match self {
            Self::D100 => format!("{value:02}"),
            _ => value.to_string(),
        })
    }

    /// Builds the die at display size in its resting pose.
    ///
    /// # Errors
    ///
    /// Only fails if a catalogue entry no longer forms a valid solid.
    #[instrument]
    pub fn mesh(self) -> Result<Mesh> {
        let mesh = SolidBuilder::new().build(&self.descriptor())?;
        let (roll, pitch, yaw) = self.rotation();
        let mesh = Rotate::from_euler_angles(roll, pitch, yaw).execute(&mesh)?;
        debug!(die = %self, faces = mesh.face_count(), "built die");
        Ok(mesh)
    }
}

impl fmt::Display for DieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", if *self == Self::D100 { 100 } else { self.sides() })
    }
}

/// Error returned when parsing an unknown die name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown die {0:?}, expected one of d4, d6, d8, d10, d12, d20, d100")]
pub struct ParseDieError(String);

impl FromStr for DieKind {
    type Err = ParseDieError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|die| die.to_string() == name)
            .ok_or_else(|| ParseDieError(s.to_string()))
    }
}
