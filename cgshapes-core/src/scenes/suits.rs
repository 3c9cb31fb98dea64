//! The four card suits as a clickable 2D scene.

use nalgebra::Point2;

use crate::color::Color;
use crate::geometry::Mesh;
use crate::scene::{DrawCall, Scene};
use crate::suits::SuitBoard;

/// The suit board with alpha blending and no depth test
pub struct SuitsScene {
    board: SuitBoard,
    colors: Vec<Color>,
}

impl SuitsScene {
    pub fn new() -> Self {
        let board = SuitBoard::new();
        let mut colors = Vec::with_capacity(board.mesh().vertex_count());
        for shape in board.shapes() {
            colors.extend(std::iter::repeat(shape.color).take(shape.count));
        }
        Self { board, colors }
    }

    pub fn board(&self) -> &SuitBoard {
        &self.board
    }
}

impl Default for SuitsScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for SuitsScene {
    fn name(&self) -> &'static str {
        "suits"
    }

    fn mesh(&self) -> &Mesh {
        self.board.mesh()
    }

    fn vertex_colors(&self) -> &[Color] {
        &self.colors
    }

    fn clear_color(&self) -> Color {
        Color::LIGHT_GREY
    }

    fn depth_test(&self) -> bool {
        false
    }

    fn draw_calls(&self) -> Vec<DrawCall> {
        self.board.draw_calls()
    }

    fn click(&mut self, ndc: Point2<f32>) -> bool {
        let before = self.board.highlighted();
        self.board.click(ndc) != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suits::Suit;

    #[test]
    fn test_click_reports_redraw_only_on_change() {
        let mut scene = SuitsScene::new();
        assert!(!scene.click(Point2::new(0.0, 0.0)));
        assert!(scene.click(Point2::new(-0.5, 0.5)));
        assert!(!scene.click(Point2::new(-0.5, 0.5)));
        assert_eq!(scene.board().highlighted(), Some(Suit::Diamond));
        assert!(scene.click(Point2::new(0.0, 0.0)));
    }

    #[test]
    fn test_flat_2d_scene() {
        let scene = SuitsScene::new();
        assert!(!scene.depth_test());
        assert_eq!(scene.vertex_colors().len(), 39);
        assert!(scene.draw_calls().iter().all(|call| call.color.is_some()));
    }
}
