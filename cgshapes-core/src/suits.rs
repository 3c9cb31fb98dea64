//! The four card suits as clickable flat shapes.
//!
//! Each suit is a run of triangles in one shared mesh together with the
//! box used for hit-testing and the colours it is drawn with.

use nalgebra::Point2;

use crate::color::Color;
use crate::geometry::{Mesh, Triangle, Vertex};
use crate::scene::DrawCall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Diamond,
    Spade,
    Heart,
    Club,
}

impl Suit {
    pub fn name(self) -> &'static str {
        match self {
            Suit::Diamond => "diamond",
            Suit::Spade => "spade",
            Suit::Heart => "heart",
            Suit::Club => "club",
        }
    }

    /// Triangles in clip coordinates, three corners each
    fn outline(self) -> &'static [[[f32; 2]; 3]] {
        match self {
            Suit::Diamond => &[
                [[-0.5, 0.9], [-0.8, 0.5], [-0.5, 0.1]],
                [[-0.5, 0.9], [-0.5, 0.1], [-0.2, 0.5]],
            ],
            Suit::Spade => &[
                [[0.4, 0.1], [0.6, 0.1], [0.5, 0.2]],
                [[0.2, 0.2], [0.8, 0.2], [0.5, 0.8]],
            ],
            Suit::Heart => &[
                [[0.5, -0.9], [0.2, -0.5], [0.8, -0.5]],
                [[0.2, -0.5], [0.5, -0.5], [0.35, -0.2]],
                [[0.5, -0.5], [0.65, -0.2], [0.8, -0.5]],
            ],
            Suit::Club => &[
                [[-0.4, -0.9], [-0.6, -0.9], [-0.5, -0.8]],
                [[-0.4, -0.8], [-0.4, -0.6], [-0.6, -0.8]],
                [[-0.6, -0.6], [-0.4, -0.6], [-0.6, -0.8]],
                [[-0.6, -0.6], [-0.8, -0.7], [-0.6, -0.8]],
                [[-0.4, -0.8], [-0.4, -0.6], [-0.2, -0.7]],
                [[-0.4, -0.6], [-0.6, -0.6], [-0.5, -0.4]],
            ],
        }
    }

    fn base_color(self) -> Color {
        match self {
            Suit::Diamond | Suit::Heart => Color::RED,
            Suit::Spade | Suit::Club => Color::BLACK,
        }
    }
}

/// Axis-aligned rectangle in normalized device coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min: Point2<f32>,
    pub max: Point2<f32>,
}

impl Bounds2 {
    /// Smallest rectangle containing every point; `None` when empty
    pub fn enclosing<I: IntoIterator<Item = Point2<f32>>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self { min: first, max: first }, |b, p| Self {
            min: Point2::new(b.min.x.min(p.x), b.min.y.min(p.y)),
            max: Point2::new(b.max.x.max(p.x), b.max.y.max(p.y)),
        }))
    }

    pub fn contains(&self, p: Point2<f32>) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }
}

/// One interactive shape: where it lives in the mesh, where it can be clicked, how it is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct SuitShape {
    pub suit: Suit,
    pub first: usize,
    pub count: usize,
    pub bounds: Bounds2,
    pub color: Color,
    pub highlight: Color,
}

#[derive(Debug, Clone)]
pub struct SuitBoard {
    shapes: Vec<SuitShape>,
    mesh: Mesh,
    highlighted: Option<Suit>,
}

impl SuitBoard {
    pub const ORDER: [Suit; 4] = [Suit::Diamond, Suit::Spade, Suit::Heart, Suit::Club];

    pub fn new() -> Self {
        let mut mesh = Mesh::new();
        let mut shapes = Vec::with_capacity(Self::ORDER.len());

        for suit in Self::ORDER {
            let first = mesh.vertex_count();
            for [a, b, c] in suit.outline() {
                mesh.add_triangle(Triangle::new(
                    Vertex::flat(a[0], a[1]),
                    Vertex::flat(b[0], b[1]),
                    Vertex::flat(c[0], c[1]),
                ));
            }
            let count = mesh.vertex_count() - first;
            let bounds = Bounds2::enclosing(
                suit.outline()
                    .iter()
                    .flatten()
                    .map(|corner| Point2::new(corner[0], corner[1])),
            )
            .unwrap_or(Bounds2 {
                min: Point2::origin(),
                max: Point2::origin(),
            });

            let base = suit.base_color();
            shapes.push(SuitShape {
                suit,
                first,
                count,
                bounds,
                color: base.with_alpha(0.5),
                highlight: base,
            });
        }

        Self {
            shapes,
            mesh,
            highlighted: None,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn shapes(&self) -> &[SuitShape] {
        &self.shapes
    }

    pub fn shape(&self, suit: Suit) -> Option<&SuitShape> {
        self.shapes.iter().find(|shape| shape.suit == suit)
    }

    pub fn highlighted(&self) -> Option<Suit> {
        self.highlighted
    }

    /// First suit whose bounds contain `point`
    pub fn hit_test(&self, point: Point2<f32>) -> Option<Suit> {
        self.shapes
            .iter()
            .find(|shape| shape.bounds.contains(point))
            .map(|shape| shape.suit)
    }

    /// Highlight the clicked suit, or clear the highlight on empty canvas
    pub fn click(&mut self, point: Point2<f32>) -> Option<Suit> {
        self.highlighted = self.hit_test(point);
        match self.highlighted {
            Some(suit) => log::info!("{} clicked", suit.name()),
            None => log::info!("canvas clicked"),
        }
        self.highlighted
    }

    pub fn draw_calls(&self) -> Vec<DrawCall> {
        self.shapes
            .iter()
            .map(|shape| {
                let color = if self.highlighted == Some(shape.suit) {
                    shape.highlight
                } else {
                    shape.color
                };
                DrawCall::new(shape.first, shape.count).with_color(color)
            })
            .collect()
    }
}

impl Default for SuitBoard {
    fn default() -> Self {
        Self::new()
    }
}
