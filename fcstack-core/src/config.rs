/// Scene configuration types.
///
/// Every type derives [`serde::Deserialize`] with defaults matching the
/// single-cell fuel-cell mock-up, so an empty document yields the default
/// scene.
///
/// - [`SceneConfig`] - top-level: layers, start offset, background.
/// - [`Footprint`] - width and depth shared by all layer boxes.
/// - [`PipeConfig`] - connector pipes spanning the stack.
/// - [`LightingConfig`] - ambient and directional light intensities.
/// - [`CameraConfig`] - initial eye, orbit target and control settings.
use serde::Deserialize;

use crate::color::Rgb;
use crate::layout::LayerSpec;
use crate::preset;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Bottom face of the first layer along the stacking axis
    pub start_offset: f32,
    pub background: Rgb,
    pub layers: Vec<LayerSpec>,
    pub footprint: Footprint,
    pub pipes: PipeConfig,
    pub lighting: LightingConfig,
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            start_offset: 0.0,
            background: Rgb::new(0x0e0e0e),
            layers: preset::fuel_cell_stack(),
            footprint: Footprint::default(),
            pipes: PipeConfig::default(),
            lighting: LightingConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Footprint {
    pub width: f32,
    pub depth: f32,
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            width: 3.0,
            depth: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipeConfig {
    pub radius: f32,
    pub segments: u32,
    pub color: Rgb,
    /// `(x, z)` of each pipe axis in the footprint plane
    pub positions: Vec<[f32; 2]>,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            radius: 0.15,
            segments: 16,
            color: Rgb::new(0xdddd00),
            positions: vec![[1.2, 1.2], [-1.2, -1.2]],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightingConfig {
    pub ambient: f32,
    pub directional: f32,
    /// Position of the directional light; it shines toward the origin
    pub direction: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: 0.6,
            directional: 1.2,
            direction: [5.0, 10.0, 5.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_degrees: f32,
    pub damping: f32,
    /// Yaw applied every frame (radians) while the view is not being dragged
    pub auto_rotate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [3.0, 3.0, 8.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
            damping: 0.1,
            auto_rotate: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config: SceneConfig = toml::from_str("").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.layers.len(), 11);
    }

    #[test]
    fn test_custom_layers_and_hex_colors() {
        let config: SceneConfig = toml::from_str(
            r#"
            start_offset = 2.0
            background = 0x000000

            [[layers]]
            tag = "Frame / End Plate"
            thickness = 0.25
            color = 0x606060

            [[layers]]
            tag = "Gasket"
            thickness = 0.08
            color = 0x00ffff

            [pipes]
            positions = [[0.0, 0.0]]
            "#,
        )
        .unwrap();

        assert_eq!(config.start_offset, 2.0);
        assert_eq!(config.layers.len(), 2);
        assert_eq!(config.layers[1].color, Rgb::new(0x00ffff));
        assert_eq!(config.pipes.positions, vec![[0.0, 0.0]]);
        assert_eq!(config.pipes.segments, 16);
        assert_eq!(config.footprint, Footprint::default());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(toml::from_str::<SceneConfig>("colour = 1").is_err());
        assert!(toml::from_str::<SceneConfig>("[[layers]]\ntag = \"x\"\nthickness = 1.0\ncolor = 0\nmaterial = 2").is_err());
    }
}
