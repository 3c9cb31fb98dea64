/// Geometry primitives for triangle-list rendering
use nalgebra::{Point3, Vector3, Vector4};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
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

    /// A vertex on the unit sphere; its normal is its own direction.
    pub fn on_unit_sphere(direction: Vector3<f32>) -> Self {
        Self {
            position: Point3::from(direction),
            normal: direction,
        }
    }

    /// A vertex in the z = 0 plane facing the viewer
    pub fn flat(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0, 0.0, 0.0, 1.0)
    }

    /// Position in homogeneous coordinates (w = 1)
    pub fn homogeneous(&self) -> Vector4<f32> {
        self.position.to_homogeneous()
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices.
    ///
    /// Counter-clockwise winding faces the viewer. Degenerate triangles
    /// yield the zero vector.
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1
            .cross(&edge2)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Same corners with every normal replaced by the face normal
    pub fn with_face_normal(mut self) -> Self {
        let normal = self.calculate_normal();
        for vertex in &mut self.vertices {
            vertex.normal = normal;
        }
        self
    }
}

/// An ordered triangle list; insertion order is drawing order.
#[derive(Debug, Clone, PartialEq)]
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

    /// Append every triangle of `other`, returning the number of vertices appended
    pub fn append(&mut self, other: Mesh) -> usize {
        let appended = other.vertex_count();
        self.triangles.extend(other.triangles);
        appended
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }

    /// Flatten positions to `[x, y, z, 1, ...]` for a vertex buffer
    pub fn position_buffer(&self) -> Vec<f32> {
        let mut buffer = Vec::with_capacity(self.vertex_count() * 4);
        for vertex in self.vertices() {
            buffer.extend_from_slice(vertex.homogeneous().as_slice());
        }
        buffer
    }

    /// Axis-aligned cube with corners at `±half`, 36 vertices.
    ///
    /// Each face is a quad split into (a, b, c) and (a, c, d), wound
    /// counter-clockwise when seen from outside.
    pub fn cube(half: f32) -> Self {
        let corners = [
            Point3::new(-half, -half, half),
            Point3::new(-half, half, half),
            Point3::new(half, half, half),
            Point3::new(half, -half, half),
            Point3::new(-half, -half, -half),
            Point3::new(-half, half, -half),
            Point3::new(half, half, -half),
            Point3::new(half, -half, -half),
        ];
        let faces: [[usize; 4]; 6] = [
            [1, 0, 3, 2], // front
            [2, 3, 7, 6], // right
            [3, 0, 4, 7], // bottom
            [6, 5, 1, 2], // top
            [4, 5, 6, 7], // back
            [5, 4, 0, 1], // left
        ];

        let mut mesh = Self::with_capacity(12);
        for [a, b, c, d] in faces {
            let corner = |i: usize| Vertex {
                position: corners[i],
                normal: Vector3::zeros(),
            };
            mesh.add_triangle(Triangle::new(corner(a), corner(b), corner(c)).with_face_normal());
            mesh.add_triangle(Triangle::new(corner(a), corner(c), corner(d)).with_face_normal());
        }
        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_vertex_count() {
        let cube = Mesh::cube(1.0);
        assert_eq!(cube.vertex_count(), 36);
        assert_eq!(cube.position_buffer().len(), 36 * 4);
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let cube = Mesh::cube(1.0);
        for triangle in &cube.triangles {
            let centroid = triangle
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.position.coords)
                / 3.0;
            assert!(triangle.calculate_normal().dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_homogeneous_w_is_one() {
        let v = Vertex::new(0.5, -0.25, 2.0, 0.0, 0.0, 1.0);
        let h = v.homogeneous();
        assert_eq!(h.w, 1.0);
        assert_eq!(h.x, 0.5);
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let t = Triangle::new(Vertex::flat(0.0, 0.0), Vertex::flat(1.0, 0.0), Vertex::flat(2.0, 0.0));
        assert_eq!(t.calculate_normal(), Vector3::zeros());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut mesh = Mesh::new();
        let first = Triangle::new(Vertex::flat(0.0, 0.0), Vertex::flat(1.0, 0.0), Vertex::flat(0.0, 1.0));
        mesh.add_triangle(first.clone());
        let appended = mesh.append(Mesh::cube(0.5));
        assert_eq!(appended, 36);
        assert_eq!(mesh.vertex_count(), 39);
        assert_eq!(mesh.triangles[0], first);
    }
}
