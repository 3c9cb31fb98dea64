/// Camera, projection and viewport utilities
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    /// Model coordinates are already clip coordinates; view and projection are identity.
    ClipSpace,
    Perspective,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Half-extent of the frustum's near plane (before aspect correction)
    pub half_extent: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 4.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            half_extent: 1.0,
            aspect: width.max(1) as f32 / height.max(1) as f32,
            near: 2.9,
            far: 5.0,
            mode: ProjectionMode::ClipSpace,
        }
    }

    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::ClipSpace => Matrix4::identity(),
            ProjectionMode::Perspective => {
                Matrix4::look_at_rh(&self.position, &self.target, &self.up)
            }
        }
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::ClipSpace => Matrix4::identity(),
            ProjectionMode::Perspective => {
                // Frustum with a ±half_extent near plane, widened by the aspect ratio
                let fovy = 2.0 * (self.half_extent / self.near).atan();
                Matrix4::new_perspective(self.aspect, fovy, self.near, self.far)
            }
        }
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a 3D point to 2D screen space
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.view_projection() * model_matrix;
        Viewport::new(width, height).project(&mvp, point)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Pixel rectangle the clip volume maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Transform `point` by `mvp` and map it to screen pixels with depth.
    ///
    /// Returns `None` for points behind the eye or outside the clip volume.
    pub fn project(&self, mvp: &Matrix4<f32>, point: &Point3<f32>) -> Option<(f32, f32, f32)> {
        let clip = mvp * point.to_homogeneous();

        // Prevent division by near-zero w
        if clip.w <= 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;

        // Clip test
        if ndc.iter().any(|c| !(-1.0..=1.0).contains(c)) {
            return None;
        }

        let screen = self.to_screen(Point2::new(ndc.x, ndc.y));
        Some((screen.x, screen.y, ndc.z))
    }

    /// Normalized device coordinates to pixels (y down)
    pub fn to_screen(&self, ndc: Point2<f32>) -> Point2<f32> {
        Point2::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
        )
    }

    /// Pixels (y down) to normalized device coordinates
    pub fn to_ndc(&self, x: f32, y: f32) -> Point2<f32> {
        let width = self.width.max(1) as f32;
        let height = self.height.max(1) as f32;
        Point2::new(2.0 * x / width - 1.0, 1.0 - 2.0 * y / height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::ClipSpace);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_clip_space_is_identity() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.view_projection(), Matrix4::identity());
    }

    #[test]
    fn test_perspective_keeps_origin_centered() {
        let camera = Camera::new(100, 100).with_mode(ProjectionMode::Perspective);
        let projected = camera.project_to_screen(&Point3::origin(), &Matrix4::identity(), 100, 100);
        let (x, y, depth) = projected.unwrap();
        assert!((x - 50.0).abs() < 1e-3);
        assert!((y - 50.0).abs() < 1e-3);
        assert!((-1.0..=1.0).contains(&depth));
    }

    #[test]
    fn test_perspective_clips_far_points() {
        let camera = Camera::new(100, 100).with_mode(ProjectionMode::Perspective);
        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera.project_to_screen(&behind, &Matrix4::identity(), 100, 100).is_none());
    }

    #[test]
    fn test_screen_ndc_round_trip() {
        let viewport = Viewport::new(200, 100);
        let ndc = viewport.to_ndc(150.0, 25.0);
        assert!((ndc.x - 0.5).abs() < 1e-6);
        assert!((ndc.y - 0.5).abs() < 1e-6);
        let back = viewport.to_screen(ndc);
        assert!((back.x - 150.0).abs() < 1e-4);
        assert!((back.y - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_clip_space_projection_corners() {
        let viewport = Viewport::new(80, 40);
        let (x, y, _) = viewport
            .project(&Matrix4::identity(), &Point3::new(-1.0, 1.0, 0.0))
            .unwrap();
        assert_eq!((x, y), (0.0, 0.0));
        assert!(viewport
            .project(&Matrix4::identity(), &Point3::new(1.5, 0.0, 0.0))
            .is_none());
    }
}
