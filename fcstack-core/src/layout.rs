/// Contiguous layer stacking along the vertical axis
///
/// Layers are laid out bottom-up from a start offset. Each layer touches
/// its neighbours: no gaps and no overlaps.
use log::debug;
use serde::Deserialize;

use crate::color::Rgb;
use crate::error::InvalidSpec;

/// One slab of the stack as supplied by the caller.
///
/// `tag` and `color` are carried through untouched; only `thickness`
/// affects placement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerSpec {
    pub tag: String,
    pub thickness: f32,
    pub color: Rgb,
}

impl LayerSpec {
    pub fn new(tag: impl Into<String>, thickness: f32, color: Rgb) -> Self {
        Self {
            tag: tag.into(),
            thickness,
            color,
        }
    }
}

/// Resolved position of a layer along the stacking axis
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPlacement {
    pub tag: String,
    pub color: Rgb,
    pub center: f32,
    pub thickness: f32,
}

impl LayerPlacement {
    pub fn bottom(&self) -> f32 {
        self.center - self.thickness / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center + self.thickness / 2.0
    }
}

/// Output of [`build_stack`]: one placement per input layer, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct StackResult {
    placements: Vec<LayerPlacement>,
    start_offset: f32,
    total_extent: f32,
}

impl StackResult {
    pub fn placements(&self) -> &[LayerPlacement] {
        &self.placements
    }

    /// Sum of all layer thicknesses.
    pub fn total_extent(&self) -> f32 {
        self.total_extent
    }

    pub fn start_offset(&self) -> f32 {
        self.start_offset
    }

    /// Coordinate of the top face of the last layer.
    pub fn top(&self) -> f32 {
        self.start_offset + self.total_extent
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Stack `layers` contiguously, starting with the bottom face of the first
/// layer at `start_offset`.
///
/// A running cursor advances by half a thickness to reach each centre and
/// by another half to reach the next layer's bottom face.
///
/// # Errors
///
/// Returns [`InvalidSpec`] if `layers` is empty, if `start_offset` is not
/// finite, for the first layer whose thickness is zero, negative or not
/// finite, or for the first layer whose top face is no longer representable.
pub fn build_stack(layers: &[LayerSpec], start_offset: f32) -> Result<StackResult, InvalidSpec> {
    if layers.is_empty() {
        return Err(InvalidSpec::Empty);
    }
    if !start_offset.is_finite() {
        return Err(InvalidSpec::StartOffset(start_offset));
    }
    if let Some((index, layer)) = layers
        .iter()
        .enumerate()
        .find(|(_, layer)| !(layer.thickness.is_finite() && layer.thickness > 0.0))
    {
        return Err(InvalidSpec::Thickness {
            index,
            thickness: layer.thickness,
        });
    }

    let mut cursor = start_offset;
    let mut placements = Vec::with_capacity(layers.len());
    for (index, layer) in layers.iter().enumerate() {
        cursor += layer.thickness / 2.0;
        let center = cursor;
        cursor += layer.thickness / 2.0;
        if !cursor.is_finite() || !(cursor - start_offset).is_finite() {
            return Err(InvalidSpec::Overflow { index });
        }
        placements.push(LayerPlacement {
            tag: layer.tag.clone(),
            color: layer.color,
            center,
            thickness: layer.thickness,
        });
    }

    let total_extent = cursor - start_offset;
    debug!(layers = placements.len(), start_offset = start_offset, total_extent = total_extent; "Stack layout built");

    Ok(StackResult {
        placements,
        start_offset,
        total_extent,
    })
}
