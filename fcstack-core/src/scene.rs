/// Scene assembly: turns a stack layout into positioned, coloured meshes
use log::{debug, info};
use nalgebra::{Matrix4, Point3, Vector3};

use crate::color::Rgb;
use crate::config::{CameraConfig, LightingConfig, SceneConfig};
use crate::error::{finite, positive, InvalidSpec};
use crate::geometry::Mesh;
use crate::layout::{build_stack, StackResult};
use crate::transform::Transform;

/// What a scene object stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Layer at this index in the stack
    Layer(usize),
    Pipe,
}

/// A mesh placed in the world
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub mesh: Mesh,
    pub color: Rgb,
    pub model: Matrix4<f32>,
}

/// Light setup used for flat shading
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub ambient: f32,
    pub directional: f32,
    /// Unit vector pointing from the surface toward the light
    pub direction: Vector3<f32>,
}

impl Lighting {
    fn from_config(config: &LightingConfig) -> Self {
        let direction = Vector3::from(config.direction);
        let direction = direction
            .try_normalize(1e-6)
            .unwrap_or_else(Vector3::y);
        Self {
            ambient: config.ambient.max(0.0),
            directional: config.directional.max(0.0),
            direction,
        }
    }

    /// Relative brightness of a surface with unit normal `normal`, in `[0, 1]`
    pub fn intensity(&self, normal: &Vector3<f32>) -> f32 {
        let total = self.ambient + self.directional;
        if total <= 0.0 {
            return 0.0;
        }
        let lambert = normal.dot(&self.direction).max(0.0);
        ((self.ambient + self.directional * lambert) / total).clamp(0.0, 1.0)
    }
}

/// The immutable world handed to a renderer: built once, drawn every frame.
#[derive(Debug, Clone)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub layout: StackResult,
    pub background: Rgb,
    pub lighting: Lighting,
    pub camera: CameraConfig,
}

impl Scene {
    /// Lay out the configured layers and build one box per layer plus the
    /// connector pipes spanning the whole stack.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSpec`] for an invalid layer list, non-positive
    /// footprint or pipe dimensions, or non-finite pipe, light or camera
    /// coordinates. Nothing is built in that case.
    pub fn build(config: &SceneConfig) -> Result<Self, InvalidSpec> {
        let width = positive("footprint width", config.footprint.width)?;
        let depth = positive("footprint depth", config.footprint.depth)?;
        let radius = positive("pipe radius", config.pipes.radius)?;
        if config.pipes.segments < 3 {
            return Err(InvalidSpec::Segments(config.pipes.segments));
        }
        for position in &config.pipes.positions {
            finite("pipe position", position)?;
        }
        validate_lighting(&config.lighting)?;
        validate_camera(&config.camera)?;

        let layout = build_stack(&config.layers, config.start_offset)?;

        let mut objects = Vec::with_capacity(layout.len() + config.pipes.positions.len());
        for (index, placement) in layout.placements().iter().enumerate() {
            objects.push(SceneObject {
                name: placement.tag.clone(),
                kind: ObjectKind::Layer(index),
                mesh: Mesh::cuboid(width, placement.thickness, depth),
                color: placement.color,
                model: Transform::lift(placement.center),
            });
        }

        // Pipes run from the bottom face of the first layer to the top face of the last
        let pipe_center = layout.start_offset() + layout.total_extent() / 2.0;
        for [x, z] in &config.pipes.positions {
            objects.push(SceneObject {
                name: "Connector Pipe".to_string(),
                kind: ObjectKind::Pipe,
                mesh: Mesh::cylinder(radius, layout.total_extent(), config.pipes.segments),
                color: config.pipes.color,
                model: Transform::translation_matrix(*x, pipe_center, *z),
            });
        }

        info!(
            layers = layout.len(),
            pipes = config.pipes.positions.len(),
            total_extent = layout.total_extent();
            "Scene built"
        );

        Ok(Self {
            objects,
            layout,
            background: config.background,
            lighting: Lighting::from_config(&config.lighting),
            camera: config.camera.clone(),
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.triangles.len()).sum()
    }

    /// World-space bounding box of every object
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut corners = self.objects.iter().filter_map(|object| {
            let (min, max) = object.mesh.bounds()?;
            Some((
                object.model.transform_point(&min),
                object.model.transform_point(&max),
            ))
        });
        let first = corners.next()?;
        let bounds = corners.fold(first, |(lo, hi), (min, max)| (lo.inf(&min), hi.sup(&max)));
        debug!(min:? = bounds.0, max:? = bounds.1; "Scene bounds");
        Some(bounds)
    }
}

fn validate_lighting(lighting: &LightingConfig) -> Result<(), InvalidSpec> {
    finite("ambient light", &[lighting.ambient])?;
    finite("directional light", &[lighting.directional])?;
    finite("light direction", &lighting.direction)
}

fn validate_camera(camera: &CameraConfig) -> Result<(), InvalidSpec> {
    finite("camera position", &camera.position)?;
    finite("camera target", &camera.target)?;
    finite("camera damping", &[camera.damping])?;
    finite("camera auto-rotate", &[camera.auto_rotate])?;
    if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
        return Err(InvalidSpec::FieldOfView(camera.fov_degrees));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayerSpec;
    use float_cmp::approx_eq;

    fn close(a: f32, b: f32) -> bool {
        approx_eq!(f32, a, b, epsilon = 1e-4)
    }

    #[test]
    fn test_default_scene_matches_single_cell() {
        let scene = Scene::build(&SceneConfig::default()).unwrap();
        assert_eq!(scene.objects.len(), 13);
        assert_eq!(scene.objects[0].kind, ObjectKind::Layer(0));
        assert_eq!(scene.objects[0].name, "Frame / End Plate");
        assert_eq!(scene.objects[11].kind, ObjectKind::Pipe);
        assert_eq!(scene.triangle_count(), 11 * 12 + 2 * 64);
    }

    #[test]
    fn test_layers_are_lifted_to_their_centers() {
        let scene = Scene::build(&SceneConfig::default()).unwrap();
        for (object, placement) in scene.objects.iter().zip(scene.layout.placements()) {
            let origin = object.model.transform_point(&Point3::origin());
            assert!(close(origin.y, placement.center));
            assert_eq!(object.color, placement.color);
        }
    }

    #[test]
    fn test_pipes_span_the_stack() {
        let config = SceneConfig {
            start_offset: 2.0,
            ..SceneConfig::default()
        };
        let scene = Scene::build(&config).unwrap();
        let pipe = scene
            .objects
            .iter()
            .find(|o| o.kind == ObjectKind::Pipe)
            .unwrap();
        let (min, max) = pipe.mesh.bounds().unwrap();
        let bottom = pipe.model.transform_point(&min);
        let top = pipe.model.transform_point(&max);
        assert!(close(bottom.y, 2.0));
        assert!(close(top.y, scene.layout.top()));
        assert!(close(bottom.x, 1.2 - 0.15));
    }

    #[test]
    fn test_bounds_cover_footprint_and_height() {
        let scene = Scene::build(&SceneConfig::default()).unwrap();
        let (min, max) = scene.bounds().unwrap();
        assert!(close(min.x, -1.5) && close(max.x, 1.5));
        assert!(close(min.y, 0.0) && close(max.y, 1.58));
    }

    #[test]
    fn test_invalid_layer_builds_nothing() {
        let mut config = SceneConfig::default();
        config.layers[4] = LayerSpec::new("Gas Diffusion Layer", -0.1, Rgb::new(0x4444ff));
        let err = Scene::build(&config).unwrap_err();
        assert_eq!(err.layer_index(), Some(4));
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut config = SceneConfig::default();
        config.footprint.width = 0.0;
        assert!(matches!(
            Scene::build(&config),
            Err(InvalidSpec::Dimension { name: "footprint width", .. })
        ));

        let mut config = SceneConfig::default();
        config.pipes.segments = 2;
        assert_eq!(Scene::build(&config).unwrap_err(), InvalidSpec::Segments(2));
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let mut config = SceneConfig::default();
        config.pipes.positions.push([f32::NAN, 0.0]);
        assert!(matches!(
            Scene::build(&config),
            Err(InvalidSpec::NonFinite { name: "pipe position", .. })
        ));

        let mut config = SceneConfig::default();
        config.camera.position[1] = f32::INFINITY;
        assert_eq!(
            Scene::build(&config).unwrap_err(),
            InvalidSpec::NonFinite {
                name: "camera position",
                value: f32::INFINITY
            }
        );

        let mut config = SceneConfig::default();
        config.camera.target[2] = f32::NEG_INFINITY;
        assert!(matches!(
            Scene::build(&config),
            Err(InvalidSpec::NonFinite { name: "camera target", .. })
        ));

        let mut config = SceneConfig::default();
        config.lighting.direction = [f32::NAN; 3];
        assert!(matches!(
            Scene::build(&config),
            Err(InvalidSpec::NonFinite { name: "light direction", .. })
        ));
    }

    #[test]
    fn test_field_of_view_range() {
        for fov in [0.0, 180.0, f32::NAN, f32::INFINITY] {
            let mut config = SceneConfig::default();
            config.camera.fov_degrees = fov;
            assert!(matches!(
                Scene::build(&config),
                Err(InvalidSpec::FieldOfView(_))
            ));
        }
    }

    #[test]
    fn test_non_finite_toml_literals_are_rejected() {
        let config: SceneConfig = toml::from_str("[camera]\nfov_degrees = nan").unwrap();
        assert!(Scene::build(&config).is_err());
        let config: SceneConfig = toml::from_str("[pipes]\npositions = [[inf, 0.0]]").unwrap();
        assert!(Scene::build(&config).is_err());
    }

    #[test]
    fn test_no_pipes() {
        let mut config = SceneConfig::default();
        config.pipes.positions.clear();
        let scene = Scene::build(&config).unwrap();
        assert!(scene.objects.iter().all(|o| o.kind != ObjectKind::Pipe));
    }

    #[test]
    fn test_lighting_intensity_range() {
        let lighting = Lighting::from_config(&LightingConfig::default());
        let lit = lighting.intensity(&lighting.direction);
        let dark = lighting.intensity(&-lighting.direction);
        assert!(close(lit, 1.0));
        assert!(close(dark, 0.6 / 1.8));
    }
}
