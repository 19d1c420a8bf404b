//! Coordinate frame decoding
//!
//! A `CFrame` is stored as 12 scalar child elements: the translation `X`, `Y`, `Z`, followed by
//! the 3x3 rotation matrix entries `R00` through `R22`, where `Rij` is the entry in row `i` and
//! column `j`:
//! ```xml
//! <CoordinateFrame name="CFrame">
//!     <X>0</X> <Y>10</Y> <Z>0</Z>
//!     <R00>1</R00> <R01>0</R01> <R02>0</R02>
//!     <R10>0</R10> <R11>1</R11> <R12>0</R12>
//!     <R20>0</R20> <R21>0</R21> <R22>1</R22>
//! </CoordinateFrame>
//! ```
//!
//! When assembling the matrix, every row-major field is placed in the column named by its second
//! digit, so column 0 is `(R00, R10, R20)`. Getting this backwards mirrors every rotation.

use crate::{document::XmlElement, property::read_float_text};
use glam::{Affine3A, Mat3, Quat, Vec3};
use thiserror::Error;

/// Child element names, in storage order.
pub const CFRAME_FIELDS: [&str; 12] = [
    "X", "Y", "Z", "R00", "R01", "R02", "R10", "R11", "R12", "R20", "R21", "R22",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CFrameError {
    #[error("missing `{0}` field")]
    MissingField(&'static str),
    #[error("field `{field}` isn't a number: `{value}`")]
    InvalidField { field: &'static str, value: String },
}

/// A decoded coordinate frame: a position and a rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CFrame {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CFrame {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Reads a frame out of a `CFrame` property element. Every one of the 12 fields has to be
    /// present and numeric, there are no per-field defaults.
    pub fn read(element: &XmlElement) -> Result<Self, CFrameError> {
        let mut fields = [0.0; 12];
        for (value, field) in fields.iter_mut().zip(CFRAME_FIELDS) {
            let text = element
                .child(field)
                .ok_or(CFrameError::MissingField(field))?
                .text();
            *value = read_float_text(text).map_err(|_| CFrameError::InvalidField {
                field,
                value: text.trim().to_string(),
            })?;
        }
        Ok(Self::from_fields(fields))
    }

    /// Builds a frame from fields in storage order (see [`CFRAME_FIELDS`]).
    pub fn from_fields(fields: [f32; 12]) -> Self {
        let [x, y, z, r00, r01, r02, r10, r11, r12, r20, r21, r22] = fields;
        Self::from_components(Vec3::new(x, y, z), [r00, r01, r02, r10, r11, r12, r20, r21, r22])
    }

    /// Builds a frame from a translation and a row-major rotation matrix.
    ///
    /// The matrix is trusted to be orthonormal. It isn't re-orthonormalized, only the resulting
    /// quaternion is normalized, and flipped so that its `w` is never negative.
    pub fn from_components(translation: Vec3, rows: [f32; 9]) -> Self {
        let [r00, r01, r02, r10, r11, r12, r20, r21, r22] = rows;
        let matrix = Mat3::from_cols(
            Vec3::new(r00, r10, r20),
            Vec3::new(r01, r11, r21),
            Vec3::new(r02, r12, r22),
        );

        // q and -q are the same rotation, keep w non-negative so equal frames compare equal
        let rotation = Quat::from_mat3(&matrix).normalize();
        let rotation = if rotation.w < 0.0 { -rotation } else { rotation };

        Self {
            position: translation,
            rotation,
        }
    }

    #[inline]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.position)
    }
}

/// Decodes a `CFrame` property element into a position and a rotation.
#[inline]
pub fn decode(element: &XmlElement) -> Result<(Vec3, Quat), CFrameError> {
    CFrame::read(element).map(|frame| (frame.position, frame.rotation))
}
