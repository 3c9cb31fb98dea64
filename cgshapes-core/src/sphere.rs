//! Sphere approximation by recursive subdivision of an octahedron.
//!
//! Vertex counts per depth:
//!
//! | depth | vertices | edges around the equator |
//! |-------|----------|--------------------------|
//! | 0     | 24       | 4                        |
//! | 1     | 96       | 8                        |
//! | 2     | 384      | 16                       |
//! | 3     | 1536     | 32                       |
//! | 4     | 6144     | 64                       |
//!
//! With smooth shading depth 4 is enough for most purposes.

use nalgebra::Vector3;

use crate::geometry::{Mesh, Triangle, Vertex};

/// Highest depth accepted from interactive controls (1.5M vertices).
pub const MAX_SPHERE_DEPTH: u32 = 8;

/// Octahedron corners: top, front, right, back, left, bottom.
pub const OCTAHEDRON_VERTICES: [[f32; 3]; 6] = [
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
];

/// Octahedron faces, counter-clockwise seen from outside.
pub const OCTAHEDRON_FACES: [[usize; 3]; 8] = [
    [0, 1, 2], // upper right front
    [0, 2, 3], // upper right rear
    [0, 3, 4], // upper left rear
    [0, 4, 1], // upper left front
    [5, 2, 1], // lower right front
    [5, 3, 2], // lower right rear
    [5, 4, 3], // lower left rear
    [5, 1, 4], // lower left front
];

/// Number of vertices `build_sphere(depth)` produces: `24 * 4^depth`.
///
/// Saturates at `usize::MAX` for depths no mesh could hold.
pub const fn sphere_vertex_count(depth: u32) -> usize {
    triangle_vertex_count(depth).saturating_mul(OCTAHEDRON_FACES.len())
}

/// Number of vertices `subdivide` appends for one seed triangle: `3 * 4^depth`.
///
/// Saturates at `usize::MAX` for depths no mesh could hold.
pub const fn triangle_vertex_count(depth: u32) -> usize {
    4usize.saturating_pow(depth).saturating_mul(3)
}

/// Point on the unit sphere in the direction of `v`.
///
/// Midpoints of unit vectors are shorter than one, so every midpoint goes
/// through here before it becomes a vertex.
pub fn unit(v: Vector3<f32>) -> Vector3<f32> {
    v.normalize()
}

/// Recursively split the triangle (a, b, c) into `4^depth` triangles whose
/// corners lie on the unit sphere, appending them to `mesh`.
///
/// `a`, `b` and `c` must be unit vectors and not collinear. Returns the number
/// of vertices appended, always `3 * 4^depth`.
pub fn subdivide(
    a: Vector3<f32>,
    b: Vector3<f32>,
    c: Vector3<f32>,
    depth: u32,
    mesh: &mut Mesh,
) -> usize {
    if depth == 0 {
        mesh.add_triangle(Triangle::new(
            Vertex::on_unit_sphere(a),
            Vertex::on_unit_sphere(b),
            Vertex::on_unit_sphere(c),
        ));
        return 3;
    }

    let v1 = unit(a + b);
    let v2 = unit(a + c);
    let v3 = unit(b + c);

    subdivide(a, v1, v2, depth - 1, mesh);
    subdivide(c, v2, v3, depth - 1, mesh);
    subdivide(b, v3, v1, depth - 1, mesh);
    4 * subdivide(v1, v3, v2, depth - 1, mesh)
}

/// Append a subdivided octahedron of unit radius to `mesh`.
///
/// Returns the number of vertices appended, `24 * 4^depth`.
pub fn append_sphere(mesh: &mut Mesh, depth: u32) -> usize {
    let corners = OCTAHEDRON_VERTICES.map(Vector3::from);
    if depth <= MAX_SPHERE_DEPTH {
        mesh.triangles.reserve(sphere_vertex_count(depth) / 3);
    }

    let mut per_face = 0;
    for [a, b, c] in OCTAHEDRON_FACES {
        per_face = subdivide(corners[a], corners[b], corners[c], depth, mesh);
    }

    let total = OCTAHEDRON_FACES.len() * per_face;
    log::debug!("built sphere at depth {depth}: {total} vertices");
    total
}

/// Build a unit sphere approximation; depth 0 is the bare octahedron.
pub fn build_sphere(depth: u32) -> (Mesh, usize) {
    let mut mesh = Mesh::new();
    let count = append_sphere(&mut mesh, depth);
    (mesh, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_counts() {
        for depth in 0..=4 {
            let (mesh, count) = build_sphere(depth);
            assert_eq!(count, 8 * 3 * 4usize.pow(depth));
            assert_eq!(mesh.vertex_count(), count);
            assert_eq!(sphere_vertex_count(depth), count);
        }
    }

    #[test]
    fn test_known_sizes() {
        assert_eq!(build_sphere(0).1, 24);
        assert_eq!(build_sphere(1).1, 96);
        assert_eq!(sphere_vertex_count(3), 1536);
    }

    #[test]
    fn test_counts_saturate_for_huge_depths() {
        assert_eq!(triangle_vertex_count(31), 3 * 4usize.pow(31));
        assert_eq!(triangle_vertex_count(32), usize::MAX);
        assert_eq!(sphere_vertex_count(40), usize::MAX);
        assert_eq!(sphere_vertex_count(u32::MAX), usize::MAX);
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        for depth in 0..=4 {
            let (mesh, _) = build_sphere(depth);
            for vertex in mesh.vertices() {
                assert!((vertex.position.coords.norm() - 1.0).abs() < 1e-6);
                assert_eq!(vertex.homogeneous().w, 1.0);
            }
        }
    }

    #[test]
    fn test_depth_zero_matches_face_table() {
        let (mesh, _) = build_sphere(0);
        assert_eq!(mesh.triangles.len(), 8);
        for (triangle, face) in mesh.triangles.iter().zip(OCTAHEDRON_FACES) {
            for (vertex, index) in triangle.vertices.iter().zip(face) {
                assert_eq!(vertex.position.coords, Vector3::from(OCTAHEDRON_VERTICES[index]));
            }
        }
    }

    #[test]
    fn test_faces_point_outward() {
        let (mesh, _) = build_sphere(2);
        for triangle in &mesh.triangles {
            let centroid = triangle
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.position.coords);
            assert!(triangle.calculate_normal().dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_subdivide_is_deterministic() {
        let a = Vector3::new(0.0, 1.0, 0.0);
        let b = Vector3::new(0.0, 0.0, 1.0);
        let c = Vector3::new(1.0, 0.0, 0.0);

        let mut first = Mesh::new();
        let mut second = Mesh::new();
        assert_eq!(subdivide(a, b, c, 3, &mut first), triangle_vertex_count(3));
        assert_eq!(subdivide(a, b, c, 3, &mut second), triangle_vertex_count(3));
        assert_eq!(first, second);
    }

    #[test]
    fn test_subdivide_depth_one_order() {
        let a = Vector3::new(0.0, 1.0, 0.0);
        let b = Vector3::new(0.0, 0.0, 1.0);
        let c = Vector3::new(1.0, 0.0, 0.0);
        let mut mesh = Mesh::new();
        subdivide(a, b, c, 1, &mut mesh);

        let v1 = unit(a + b);
        let v2 = unit(a + c);
        let v3 = unit(b + c);
        let expected = [[a, v1, v2], [c, v2, v3], [b, v3, v1], [v1, v3, v2]];
        for (triangle, corners) in mesh.triangles.iter().zip(expected) {
            for (vertex, corner) in triangle.vertices.iter().zip(corners) {
                assert_eq!(vertex.position.coords, corner);
            }
        }
    }

    #[test]
    fn test_append_sphere_after_existing_geometry() {
        let mut mesh = Mesh::cube(1.0);
        let appended = append_sphere(&mut mesh, 1);
        assert_eq!(appended, 96);
        assert_eq!(mesh.vertex_count(), 36 + 96);
    }
}
