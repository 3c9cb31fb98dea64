/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;
use cgshapes_core::{Color, DrawCall, Scene, Viewport};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// A projected vertex: screen x, screen y, ndc depth
type ScreenPoint = (f32, f32, f32);

/// ASCII renderer that converts scene draw calls to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
    background: Color,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::BLACK; size],
            background: Color::BLACK,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self, background: Color) {
        self.background = background;
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(background);
    }

    /// Character and colour at a cell
    pub fn cell(&self, x: usize, y: usize) -> Option<(char, Color)> {
        (x < self.width && y < self.height).then(|| {
            let idx = y * self.width + x;
            (self.char_buffer[idx], self.color_buffer[idx])
        })
    }

    /// Draw every call of `scene`, each through `view * call.model_view`
    pub fn render_scene(&mut self, scene: &dyn Scene, view: &Matrix4<f32>) {
        let depth_test = scene.depth_test();
        let triangles = &scene.mesh().triangles;
        let colors = scene.vertex_colors();

        for call in scene.draw_calls() {
            let model_view = view * call.model_view;
            for index in call.triangles() {
                let Some(triangle) = triangles.get(index) else {
                    log::warn!("draw call {}..{} exceeds mesh", call.first, call.first + call.count);
                    break;
                };
                let color = triangle_color(&call, colors, index);
                let positions = triangle.vertices.map(|v| v.position);
                self.render_triangle(&positions, &model_view, color, depth_test);
            }
        }
    }

    fn render_triangle(
        &mut self,
        positions: &[Point3<f32>; 3],
        model_view: &Matrix4<f32>,
        color: Color,
        depth_test: bool,
    ) {
        let viewport = Viewport::new(self.width as u32, self.height as u32);
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, position) in screen_coords.iter_mut().zip(positions) {
            match viewport.project(model_view, position) {
                Some(point) => *slot = point,
                None => return, // Triangle is clipped
            }
        }

        let world = positions.map(|p| model_view.transform_point(&p));
        let normal = (world[1] - world[0]).cross(&(world[2] - world[0]));
        let brightness = shade(&normal);
        let character = ramp_char(brightness);
        let shaded = blend(color, self.background);

        self.rasterize_triangle(&screen_coords, character, shaded, depth_test);
    }

    fn rasterize_triangle(
        &mut self,
        coords: &[ScreenPoint; 3],
        character: char,
        color: Color,
        depth_test: bool,
    ) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box clipped to screen bounds
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if !depth_test || depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                    self.color_buffer[idx] = color;
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let background = to_term_color(self.background);
        writer.queue(SetBackgroundColor(background))?;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(to_term_color(self.color_buffer[idx])))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Per-call flat colour, else the first vertex colour of the triangle
fn triangle_color(call: &DrawCall, colors: &[Color], triangle: usize) -> Color {
    call.color
        .or_else(|| colors.get(triangle * 3).copied())
        .unwrap_or(Color::WHITE)
}

/// Two-sided lighting from a light on the +z axis; flat 2D shapes face it fully
fn shade(normal: &Vector3<f32>) -> f32 {
    normal
        .try_normalize(1e-12)
        .map(|n| n.z.abs())
        .unwrap_or(0.0)
}

fn ramp_char(brightness: f32) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (brightness.clamp(0.0, 1.0) * last as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(last)]
}

/// Composite a translucent colour over the background
fn blend(color: Color, background: Color) -> Color {
    let a = color.a.clamp(0.0, 1.0);
    Color::rgb(
        color.r * a + background.r * (1.0 - a),
        color.g * a + background.g * (1.0 - a),
        color.b * a + background.b * (1.0 - a),
    )
}

fn to_term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb8();
    TermColor::Rgb { r, g, b }
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

#[cfg(test)]
mod tests {
    use super::*;
    use cgshapes_core::scenes::{ShapeSetScene, SuitsScene};
    use cgshapes_core::config::ShapeSetConfig;
    use nalgebra::Point2;

    fn cell_at(renderer: &AsciiRenderer, ndc: Point2<f32>) -> (char, Color) {
        let viewport = Viewport::new(renderer.width() as u32, renderer.height() as u32);
        let p = viewport.to_screen(ndc);
        renderer.cell(p.x as usize, p.y as usize).unwrap()
    }

    #[test]
    fn test_barycentric_inside_and_degenerate() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_blend_half_alpha() {
        let mixed = blend(Color::RED.with_alpha(0.5), Color::WHITE);
        assert!((mixed.r - 1.0).abs() < 1e-6);
        assert!((mixed.g - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_shade_is_two_sided() {
        assert_eq!(shade(&Vector3::new(0.0, 0.0, -2.0)), 1.0);
        assert_eq!(ramp_char(1.0), '@');
        assert_eq!(ramp_char(0.0), '.');
        assert_eq!(shade(&Vector3::zeros()), 0.0);
    }

    #[test]
    fn test_suits_render_in_place() {
        let scene = SuitsScene::new();
        let mut renderer = AsciiRenderer::new(80, 40);
        renderer.clear(scene.clear_color());
        renderer.render_scene(&scene, &Matrix4::identity());

        let (c, color) = cell_at(&renderer, Point2::new(-0.5, 0.5));
        assert_eq!(c, '@');
        assert_eq!(color, blend(Color::RED.with_alpha(0.5), Color::LIGHT_GREY));

        let (c, color) = cell_at(&renderer, Point2::new(0.0, 0.0));
        assert_eq!(c, ' ');
        assert_eq!(color, Color::LIGHT_GREY);
    }

    #[test]
    fn test_shape_set_uses_vertex_colors() {
        let scene = ShapeSetScene::new(&ShapeSetConfig { count: 1 });
        let mut renderer = AsciiRenderer::new(40, 40);
        renderer.clear(scene.clear_color());
        renderer.render_scene(&scene, &Matrix4::identity());
        let (c, color) = cell_at(&renderer, Point2::new(0.15, -0.1));
        assert_ne!(c, ' ');
        assert_eq!(color, Color::WHITE);
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let mut renderer = AsciiRenderer::new(3, 2);
        renderer.clear(Color::BLACK);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), 1);
    }
}
