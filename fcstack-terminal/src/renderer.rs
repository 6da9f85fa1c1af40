/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use fcstack_core::{Camera, Lighting, Rgb, Scene, SceneObject, Transform, Triangle};
use nalgebra::{Matrix4, Point3};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// One character cell of the frame
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Option<(u8, u8, u8)>,
}

const EMPTY: Cell = Cell {
    character: ' ',
    color: None,
};

/// ASCII renderer that converts scene meshes to coloured terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![EMPTY; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocate the frame for a new terminal size
    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(EMPTY);
    }

    /// Character at `(x, y)`, blank outside the frame
    pub fn char_at(&self, x: usize, y: usize) -> char {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x].character
        } else {
            ' '
        }
    }

    /// Number of cells covered by geometry
    pub fn coverage(&self) -> usize {
        self.cells.iter().filter(|c| c.color.is_some()).count()
    }

    pub fn render_scene(&mut self, scene: &Scene, camera: &Camera) {
        let view_projection = camera.projection_matrix() * camera.view_matrix();
        for object in &scene.objects {
            self.render_object(object, &view_projection, camera, &scene.lighting);
        }
    }

    fn render_object(
        &mut self,
        object: &SceneObject,
        view_projection: &Matrix4<f32>,
        camera: &Camera,
        lighting: &Lighting,
    ) {
        let mvp = Transform::mvp_matrix(&object.model, &Matrix4::identity(), view_projection);
        for triangle in &object.mesh.triangles {
            self.render_triangle(triangle, object, &mvp, camera, lighting);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        object: &SceneObject,
        mvp: &Matrix4<f32>,
        camera: &Camera,
        lighting: &Lighting,
    ) {
        // Model matrices only translate, so face normals carry over to world space
        let normal = object.model.transform_vector(&triangle.calculate_normal());
        let centroid = triangle
            .vertices
            .iter()
            .fold(Point3::origin(), |acc, v| acc + v.position.coords / 3.0);
        let centroid = object.model.transform_point(&centroid);
        if normal.dot(&(camera.position - centroid)) <= 0.0 {
            return; // Back face
        }

        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_with(mvp, &vertex.position, self.width as u32, self.height as u32) {
                Some(coords) => *slot = coords,
                None => return, // Triangle is clipped
            }
        }

        let brightness = lighting.intensity(&normal);

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        let cell = Cell {
            character: LUMINOSITY_RAMP[char_index],
            color: Some(object.color.shade(0.35 + 0.65 * brightness)),
        };

        self.rasterize_triangle(&screen_coords, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.cells[idx] = cell;
                        }
                    }
                }
            }
        }
    }

    /// Write the frame row by row on top of a `background` fill
    pub fn draw<W: Write>(&self, writer: &mut W, background: Rgb) -> std::io::Result<()> {
        let (r, g, b) = background.shade(1.0);
        writer.queue(SetBackgroundColor(Color::Rgb { r, g, b }))?;

        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if let Some(color) = cell.color {
                    if current != Some(color) {
                        let (r, g, b) = color;
                        writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                        current = Some(color);
                    }
                }
                writer.queue(Print(cell.character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
