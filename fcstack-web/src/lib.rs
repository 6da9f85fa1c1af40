/// FCStack Web - layout bindings for browser scene graphs
///
/// Exposes the stack layout to JavaScript so a WebGL scene library can
/// place one box per layer and size the connector pipes from
/// `total_extent`.
use fcstack_core::{build_stack, preset, LayerSpec, Rgb, StackResult};
use wasm_bindgen::prelude::*;

/// A laid-out stack, flattened into parallel arrays for JavaScript
#[wasm_bindgen]
pub struct WebStack {
    layout: StackResult,
}

#[wasm_bindgen]
impl WebStack {
    /// Lay out layers given as parallel arrays, bottom layer first
    #[wasm_bindgen(constructor)]
    pub fn new(
        tags: Vec<String>,
        thicknesses: Vec<f32>,
        colors: Vec<u32>,
        start_offset: f32,
    ) -> Result<WebStack, JsValue> {
        let layers = layers_from_parts(tags, thicknesses, colors).map_err(|e| JsValue::from_str(&e))?;
        Self::layout(&layers, start_offset).map_err(|e| JsValue::from_str(&e))
    }

    /// The default single-cell fuel-cell stack
    pub fn fuel_cell(start_offset: f32) -> Result<WebStack, JsValue> {
        Self::layout(&preset::fuel_cell_stack(), start_offset).map_err(|e| JsValue::from_str(&e))
    }

    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn tags(&self) -> Vec<String> {
        self.layout.placements().iter().map(|p| p.tag.clone()).collect()
    }

    pub fn centers(&self) -> Vec<f32> {
        self.layout.placements().iter().map(|p| p.center).collect()
    }

    pub fn thicknesses(&self) -> Vec<f32> {
        self.layout.placements().iter().map(|p| p.thickness).collect()
    }

    pub fn colors(&self) -> Vec<u32> {
        self.layout.placements().iter().map(|p| p.color.hex()).collect()
    }

    pub fn total_extent(&self) -> f32 {
        self.layout.total_extent()
    }

    pub fn start_offset(&self) -> f32 {
        self.layout.start_offset()
    }
}

impl WebStack {
    fn layout(layers: &[LayerSpec], start_offset: f32) -> Result<WebStack, String> {
        build_stack(layers, start_offset)
            .map(|layout| WebStack { layout })
            .map_err(|e| e.to_string())
    }
}

fn layers_from_parts(
    tags: Vec<String>,
    thicknesses: Vec<f32>,
    colors: Vec<u32>,
) -> Result<Vec<LayerSpec>, String> {
    if tags.len() != thicknesses.len() || tags.len() != colors.len() {
        return Err(format!(
            "layer arrays differ in length: {} tags, {} thicknesses, {} colors",
            tags.len(),
            thicknesses.len(),
            colors.len()
        ));
    }
    Ok(tags
        .into_iter()
        .zip(thicknesses)
        .zip(colors)
        .map(|((tag, thickness), color)| LayerSpec::new(tag, thickness, Rgb::new(color)))
        .collect())
}
