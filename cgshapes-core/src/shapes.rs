//! Parametric shapes built from regular polygons and latitude/longitude grids.
//!
//! Every generator returns a fresh `Mesh` wound counter-clockwise when seen
//! from outside, with flat normals unless noted.

use std::f32::consts::{PI, TAU};

use nalgebra::Point3;

use crate::error::GeometryError;
use crate::geometry::{Mesh, Triangle, Vertex};

fn point(p: Point3<f32>) -> Vertex {
    Vertex {
        position: p,
        normal: nalgebra::Vector3::zeros(),
    }
}

fn flat_triangle(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Triangle {
    Triangle::new(point(a), point(b), point(c)).with_face_normal()
}

/// Corners of a unit-radius regular k-gon in the plane `y = height`.
fn ring(k: u32, height: f32) -> Vec<Point3<f32>> {
    let theta = TAU / k as f32;
    (0..k)
        .map(|i| {
            let angle = i as f32 * theta;
            Point3::new(angle.cos(), height, angle.sin())
        })
        .collect()
}

fn check_sides(shape: &'static str, sides: u32) -> Result<(), GeometryError> {
    if sides < 3 {
        return Err(GeometryError::TooFewSides { shape, sides });
    }
    Ok(())
}

/// Pyramid with a unit-radius k-gon base in the xz-plane and apex at (0, 1, 0).
///
/// Produces `6k` vertices: one base triangle and one side triangle per edge.
pub fn pyramid(sides: u32) -> Result<Mesh, GeometryError> {
    check_sides("pyramid", sides)?;
    let apex = Point3::new(0.0, 1.0, 0.0);
    let center = Point3::origin();
    Ok(cone_pair(sides, center, apex))
}

/// Two pyramids sharing a k-gon base, apexes at (0, ±1, 0). `6k` vertices.
pub fn double_pyramid(sides: u32) -> Result<Mesh, GeometryError> {
    check_sides("double pyramid", sides)?;
    let top = Point3::new(0.0, 1.0, 0.0);
    let bottom = Point3::new(0.0, -1.0, 0.0);
    Ok(cone_pair(sides, bottom, top))
}

fn cone_pair(sides: u32, lower: Point3<f32>, upper: Point3<f32>) -> Mesh {
    let base = ring(sides, 0.0);
    let mut mesh = Mesh::with_capacity(2 * sides as usize);
    for i in 0..base.len() {
        let here = base[i];
        let next = base[(i + 1) % base.len()];
        mesh.add_triangle(flat_triangle(lower, here, next));
        mesh.add_triangle(flat_triangle(upper, next, here));
    }
    log::debug!("built cone pair with {sides} sides");
    mesh
}

/// Unit sphere divided into latitude bands and longitude slices.
///
/// Produces `6 * long_divs * (lat_divs - 1)` vertices. Normals are the
/// vertex directions, as for the subdivided sphere.
pub fn globe(long_divs: u32, lat_divs: u32) -> Result<Mesh, GeometryError> {
    if long_divs < 3 || lat_divs < 2 {
        return Err(GeometryError::GlobeDivisions { long_divs, lat_divs });
    }

    let long_step = TAU / long_divs as f32;
    let lat_step = PI / lat_divs as f32;
    let columns = long_divs as usize;

    // Row 0 is the north pole repeated, row `lat_divs` the south pole.
    let grid: Vec<Vec<Vertex>> = (0..=lat_divs)
        .map(|row| {
            let (lat_sin, lat_cos) = (row as f32 * lat_step).sin_cos();
            (0..long_divs)
                .map(|i| {
                    let direction = if row == 0 {
                        nalgebra::Vector3::y()
                    } else if row == lat_divs {
                        -nalgebra::Vector3::y()
                    } else {
                        let (long_sin, long_cos) = (i as f32 * long_step).sin_cos();
                        nalgebra::Vector3::new(lat_sin * long_cos, lat_cos, lat_sin * long_sin)
                    };
                    Vertex::on_unit_sphere(direction)
                })
                .collect()
        })
        .collect();

    let mut mesh = Mesh::with_capacity(2 * columns * (lat_divs as usize - 1));
    for row in 1..lat_divs as usize {
        for i in 0..columns {
            let j = (i + 1) % columns;
            mesh.add_triangle(Triangle::new(grid[row][i], grid[row - 1][i], grid[row][j]));
            mesh.add_triangle(Triangle::new(grid[row][i], grid[row][j], grid[row + 1][j]));
        }
    }
    Ok(mesh)
}
