/// Error types for stack layout and scene assembly
use thiserror::Error;

/// A stack or scene description that cannot be laid out.
///
/// Layout fails fast: the first offending value is reported and no partial
/// result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidSpec {
    #[error("invalid stack spec: the layer list is empty")]
    Empty,

    #[error("invalid stack spec: layer {index} has thickness {thickness}, expected a finite positive value")]
    Thickness { index: usize, thickness: f32 },

    #[error("invalid stack spec: the stack overflows at layer {index}, its top face is not representable")]
    Overflow { index: usize },

    #[error("invalid stack spec: start offset {0} is not finite")]
    StartOffset(f32),

    #[error("invalid stack spec: {name} is {value}, expected a finite positive value")]
    Dimension { name: &'static str, value: f32 },

    #[error("invalid stack spec: {name} is {value}, expected a finite value")]
    NonFinite { name: &'static str, value: f32 },

    #[error("invalid stack spec: field of view is {0} degrees, expected a value between 0 and 180")]
    FieldOfView(f32),

    #[error("invalid stack spec: pipes need at least 3 segments, got {0}")]
    Segments(u32),
}

impl InvalidSpec {
    /// Index of the offending layer, if the failure is tied to one.
    pub fn layer_index(&self) -> Option<usize> {
        match self {
            Self::Thickness { index, .. } | Self::Overflow { index } => Some(*index),
            _ => None,
        }
    }
}

/// Check that `value` is finite and strictly positive.
pub(crate) fn positive(name: &'static str, value: f32) -> Result<f32, InvalidSpec> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidSpec::Dimension { name, value })
    }
}

/// Check that every component of `values` is finite.
pub(crate) fn finite(name: &'static str, values: &[f32]) -> Result<(), InvalidSpec> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(InvalidSpec::NonFinite { name, value }),
        None => Ok(()),
    }
}
