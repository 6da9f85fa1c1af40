/// Geometry primitives for the stack mock-up
use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    fn at(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Add a planar quad `a b c d` (counter-clockwise seen from outside)
    fn add_quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3]) {
        let n = Vector3::from(normal);
        let [a, b, c, d] = corners.map(|p| Vertex::at(Point3::from(p), n));
        self.add_triangle(Triangle::new(a, b, c));
        self.add_triangle(Triangle::new(a, c, d));
    }

    /// Axis-aligned box centred on the origin
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
        let mut mesh = Self::with_capacity(12);

        // Front / back
        mesh.add_quad([[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]], [0.0, 0.0, 1.0]);
        mesh.add_quad([[-x, -y, -z], [-x, y, -z], [x, y, -z], [x, -y, -z]], [0.0, 0.0, -1.0]);
        // Top / bottom
        mesh.add_quad([[-x, y, -z], [-x, y, z], [x, y, z], [x, y, -z]], [0.0, 1.0, 0.0]);
        mesh.add_quad([[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]], [0.0, -1.0, 0.0]);
        // Right / left
        mesh.add_quad([[x, -y, -z], [x, y, -z], [x, y, z], [x, -y, z]], [1.0, 0.0, 0.0]);
        mesh.add_quad([[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]], [-1.0, 0.0, 0.0]);

        mesh
    }

    /// Create a simple cube mesh for testing
    pub fn cube(size: f32) -> Self {
        Self::cuboid(size, size, size)
    }

    /// Closed cylinder along the Y axis, centred on the origin.
    ///
    /// Side faces carry smooth radial normals; caps are flat.
    pub fn cylinder(radius: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let half = height / 2.0;
        let mut mesh = Self::with_capacity(4 * segments as usize);

        let up = Vector3::y();
        let down = -Vector3::y();
        let top_center = Vertex::at(Point3::new(0.0, half, 0.0), up);
        let bottom_center = Vertex::at(Point3::new(0.0, -half, 0.0), down);

        for i in 0..segments {
            let a0 = std::f32::consts::TAU * i as f32 / segments as f32;
            let a1 = std::f32::consts::TAU * (i + 1) as f32 / segments as f32;
            let (s0, c0) = a0.sin_cos();
            let (s1, c1) = a1.sin_cos();
            let n0 = Vector3::new(c0, 0.0, s0);
            let n1 = Vector3::new(c1, 0.0, s1);

            let b0 = Point3::new(radius * c0, -half, radius * s0);
            let b1 = Point3::new(radius * c1, -half, radius * s1);
            let t0 = Point3::new(radius * c0, half, radius * s0);
            let t1 = Point3::new(radius * c1, half, radius * s1);

            // Side
            mesh.add_triangle(Triangle::new(
                Vertex::at(b0, n0),
                Vertex::at(t0, n0),
                Vertex::at(t1, n1),
            ));
            mesh.add_triangle(Triangle::new(
                Vertex::at(b0, n0),
                Vertex::at(t1, n1),
                Vertex::at(b1, n1),
            ));

            // Caps
            mesh.add_triangle(Triangle::new(top_center, Vertex::at(t1, up), Vertex::at(t0, up)));
            mesh.add_triangle(Triangle::new(
                bottom_center,
                Vertex::at(b0, down),
                Vertex::at(b1, down),
            ));
        }

        mesh
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut points = self
            .triangles
            .iter()
            .flat_map(|t| t.vertices.iter().map(|v| v.position));
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| {
            (min.inf(&p), max.sup(&p))
        }))
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward(mesh: &Mesh) {
        for triangle in &mesh.triangles {
            let face = triangle.calculate_normal();
            let centroid = triangle
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.position.coords)
                / 3.0;
            assert!(face.dot(&centroid) > 0.0, "inward face at {centroid:?}");
        }
    }

    #[test]
    fn test_cuboid_bounds() {
        let mesh = Mesh::cuboid(3.0, 0.25, 2.0);
        assert_eq!(mesh.triangles.len(), 12);
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Point3::new(-1.5, -0.125, -1.0));
        assert_eq!(max, Point3::new(1.5, 0.125, 1.0));
    }

    #[test]
    fn test_cuboid_faces_point_outward() {
        assert_outward(&Mesh::cuboid(3.0, 0.1, 3.0));
        assert_outward(&Mesh::cube(2.0));
    }

    #[test]
    fn test_cylinder_shape() {
        let mesh = Mesh::cylinder(0.15, 1.58, 16);
        assert_eq!(mesh.triangles.len(), 64);
        let (min, max) = mesh.bounds().unwrap();
        assert!((min.y + 0.79).abs() < 1e-6);
        assert!((max.y - 0.79).abs() < 1e-6);
        assert!((max.x - 0.15).abs() < 1e-6);
        assert_outward(&mesh);
    }

    #[test]
    fn test_cylinder_clamps_segments() {
        assert_eq!(Mesh::cylinder(1.0, 1.0, 1).triangles.len(), 12);
    }

    #[test]
    fn test_empty_bounds() {
        assert!(Mesh::new().bounds().is_none());
    }
}
