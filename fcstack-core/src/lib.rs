/// FCStack Core Library - Fuel-cell stack layout and scene geometry
///
/// This library provides the stateless core: contiguous layer stacking,
/// the fuel-cell component presets, mesh primitives, camera/orbit math and
/// assembly of the renderable scene.

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod orbit;
pub mod preset;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use color::Rgb;
pub use config::SceneConfig;
pub use error::InvalidSpec;
pub use geometry::{Mesh, Triangle, Vertex};
pub use layout::{build_stack, LayerPlacement, LayerSpec, StackResult};
pub use orbit::OrbitControls;
pub use projection::{Camera, ProjectionMode};
pub use scene::{Lighting, ObjectKind, Scene, SceneObject};
pub use transform::Transform;
