//! An ovoid globe spinning on its long axis while it circles an oblique
//! axis, above four pyramids, seen through its own perspective viewer.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use nalgebra::{Matrix4, Point3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::{Color, ColorRange};
use crate::geometry::Mesh;
use crate::projection::{Camera, ProjectionMode};
use crate::scene::{DrawCall, Scene};
use crate::shapes::{globe, pyramid};
use crate::transform::{wrap_angle, Transform};

pub const LONG_DIVS: u32 = 36;
pub const LAT_DIVS: u32 = 18;
const PYRAMID_SIDES: u32 = 4;

/// Spin about the globe's own axis, radians per second
const SPIN_RATE: f32 = TAU / 3.0;
/// Revolution about the oblique axis, radians per second
const REVOLVE_RATE: f32 = TAU / 9.0;

pub const MIN_VIEWER_DISTANCE: f32 = 2.0;
pub const MAX_VIEWER_DISTANCE: f32 = 10.0;
const VIEWER_STEP: f32 = 0.25;
const START_VIEWER_DISTANCE: f32 = 4.0;

/// Pyramid positions in the floor plane and their turn about y
const PYRAMIDS: [(f32, f32, f32); 4] = [
    (0.7, 0.7, FRAC_PI_4),
    (0.7, -0.7, 3.0 * FRAC_PI_4),
    (-0.7, 0.7, 5.0 * FRAC_PI_4),
    (-0.7, -0.7, 7.0 * FRAC_PI_4),
];
const FLOOR_Y: f32 = -0.8;

pub struct MovingGlobeScene {
    mesh: Mesh,
    colors: Vec<Color>,
    globe_count: usize,
    pyramid_count: usize,
    spin: f32,
    revolve: f32,
    viewer_distance: f32,
    paused: bool,
}

impl MovingGlobeScene {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        // Both generators accept these fixed divisions
        let mut mesh = globe(LONG_DIVS, LAT_DIVS).unwrap_or_default();
        let globe_count = mesh.vertex_count();
        let base = pyramid(PYRAMID_SIDES).unwrap_or_default();
        let pyramid_count = base.vertex_count();
        mesh.triangles.extend(base.triangles);

        let mut colors = ColorRange::ANY.sample_globe(&mut rng, LONG_DIVS, LAT_DIVS);
        colors.extend(ColorRange::ANY.sample_vertices(&mut rng, pyramid_count));

        log::info!(
            "moving globe mesh: {} globe + {} pyramid vertices",
            globe_count,
            pyramid_count
        );
        Self {
            mesh,
            colors,
            globe_count,
            pyramid_count,
            spin: 0.0,
            revolve: 0.0,
            viewer_distance: START_VIEWER_DISTANCE,
            paused: false,
        }
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn revolve(&self) -> f32 {
        self.revolve
    }

    pub fn viewer_distance(&self) -> f32 {
        self.viewer_distance
    }

    /// Eye on +z looking at the origin through a ±0.1 frustum at 0.4
    pub fn camera(&self) -> Camera {
        let mut camera = Camera::new(1, 1).with_mode(ProjectionMode::Perspective);
        camera.position = Point3::new(0.0, 0.0, self.viewer_distance);
        camera.half_extent = 0.1;
        camera.near = 0.4;
        camera.far = 20.0;
        camera
    }

    /// Unit sphere stretched along x into an egg, pushed off the origin,
    /// spun about x and swung around z, then tilted toward the viewer.
    fn globe_model(&self) -> Matrix4<f32> {
        Transform::rotation_y(-FRAC_PI_4)
            * Transform::rotation_z(self.revolve)
            * Transform::rotation_x(self.spin)
            * Transform::translation_matrix(0.5, 0.0, 0.0)
            * Transform::scale_matrix(0.4, 0.2, 0.2)
            * Transform::rotation_z(FRAC_PI_2)
    }
}

impl Scene for MovingGlobeScene {
    fn name(&self) -> &'static str {
        "moving-globe"
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    fn vertex_colors(&self) -> &[Color] {
        &self.colors
    }

    fn clear_color(&self) -> Color {
        Color::LIGHT_YELLOW
    }

    fn includes_projection(&self) -> bool {
        true
    }

    fn update(&mut self, dt: f32) {
        if !self.paused && dt.is_finite() && dt > 0.0 {
            self.spin = wrap_angle(self.spin + SPIN_RATE * dt);
            self.revolve = wrap_angle(self.revolve + REVOLVE_RATE * dt);
        }
    }

    fn draw_calls(&self) -> Vec<DrawCall> {
        let view_projection = self.camera().view_projection();
        let mut calls = vec![DrawCall::new(0, self.globe_count)
            .with_transform(view_projection * self.globe_model())];
        calls.extend(PYRAMIDS.iter().map(|&(x, z, turn)| {
            let model = Transform::translation_matrix(x, FLOOR_Y, z)
                * Transform::scale_matrix(0.4, 0.5, 0.4)
                * Transform::rotation_y(turn);
            DrawCall::new(self.globe_count, self.pyramid_count)
                .with_transform(view_projection * model)
        }));
        calls
    }

    /// Moves the viewer; the mesh never changes
    fn adjust(&mut self, delta: i32) -> bool {
        self.viewer_distance = (self.viewer_distance - delta as f32 * VIEWER_STEP)
            .clamp(MIN_VIEWER_DISTANCE, MAX_VIEWER_DISTANCE);
        false
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}
