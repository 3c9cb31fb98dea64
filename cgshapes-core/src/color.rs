/// RGBA colours and random colour generation
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ColorError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const LIGHT_YELLOW: Color = Color::rgb(1.0, 0.9, 0.75);
    pub const LIGHT_GREY: Color = Color::rgb(0.95, 0.95, 0.95);
    pub const MEDIUM_GREY: Color = Color::rgb(0.4, 0.4, 0.4);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Channels scaled to 0..=255, alpha dropped
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Inclusive per-channel bounds for random colours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    pub min: Color,
    pub max: Color,
}

impl ColorRange {
    /// Any opaque colour
    pub const ANY: ColorRange = ColorRange::new(Color::BLACK, Color::WHITE);

    pub const fn new(min: Color, max: Color) -> Self {
        Self { min, max }
    }

    /// Check `0 <= min <= max <= 1` on every channel
    pub fn validate(&self) -> Result<(), ColorError> {
        let min = self.min.to_array();
        let max = self.max.to_array();
        for channel in 0..4 {
            let (lo, hi) = (min[channel], max[channel]);
            if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
                return Err(ColorError::InvalidRange {
                    channel,
                    min: lo,
                    max: hi,
                });
            }
        }
        Ok(())
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Color {
        fn pick<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
            if lo < hi {
                rng.gen_range(lo..=hi)
            } else {
                lo
            }
        }
        Color::new(
            pick(rng, self.min.r, self.max.r),
            pick(rng, self.min.g, self.max.g),
            pick(rng, self.min.b, self.max.b),
            pick(rng, self.min.a, self.max.a),
        )
    }

    /// `count` colours, one per vertex; the range must already be valid
    pub(crate) fn sample_vertices<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<Color> {
        (0..count).map(|_| self.sample(rng)).collect()
    }

    /// One colour per triangle, repeated for its three vertices
    pub(crate) fn sample_triangles<R: Rng>(&self, rng: &mut R, triangles: usize) -> Vec<Color> {
        let mut colors = Vec::with_capacity(triangles * 3);
        for _ in 0..triangles {
            let color = self.sample(rng);
            colors.extend_from_slice(&[color; 3]);
        }
        colors
    }

    /// Colours for `shapes::globe(long_divs, lat_divs)` in its vertex order.
    ///
    /// Each grid point gets one colour shared by every triangle touching it;
    /// each pole shares a single colour. Grids `globe` rejects give no colours.
    pub(crate) fn sample_globe<R: Rng>(&self, rng: &mut R, long_divs: u32, lat_divs: u32) -> Vec<Color> {
        if long_divs < 3 || lat_divs < 2 {
            return Vec::new();
        }
        let columns = long_divs as usize;
        let rows = lat_divs as usize;
        let north = self.sample(rng);
        let south = self.sample(rng);
        let mut grid = Vec::with_capacity(rows + 1);
        grid.push(vec![north; columns]);
        for _ in 1..rows {
            grid.push(self.sample_vertices(rng, columns));
        }
        grid.push(vec![south; columns]);

        let mut colors = Vec::with_capacity(6 * columns * (rows - 1));
        for row in 1..rows {
            for i in 0..columns {
                let j = (i + 1) % columns;
                colors.extend_from_slice(&[
                    grid[row][i],
                    grid[row - 1][i],
                    grid[row][j],
                    grid[row][i],
                    grid[row][j],
                    grid[row + 1][j],
                ]);
            }
        }
        colors
    }
}

/// One random colour inside `range`
pub fn random_color<R: Rng>(rng: &mut R, range: &ColorRange) -> Result<Color, ColorError> {
    range.validate()?;
    Ok(range.sample(rng))
}

/// One random colour per vertex
pub fn random_colors<R: Rng>(
    rng: &mut R,
    count: usize,
    range: &ColorRange,
) -> Result<Vec<Color>, ColorError> {
    range.validate()?;
    Ok(range.sample_vertices(rng, count))
}

/// One random colour per triangle, repeated for its three vertices
pub fn random_triangle_colors<R: Rng>(
    rng: &mut R,
    triangles: usize,
    range: &ColorRange,
) -> Result<Vec<Color>, ColorError> {
    range.validate()?;
    Ok(range.sample_triangles(rng, triangles))
}

/// Smoothly varying colours for a globe mesh, one random colour per grid point
pub fn globe_colors<R: Rng>(
    rng: &mut R,
    long_divs: u32,
    lat_divs: u32,
    range: &ColorRange,
) -> Result<Vec<Color>, ColorError> {
    range.validate()?;
    Ok(range.sample_globe(rng, long_divs, lat_divs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::globe;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BRIGHT_RED: ColorRange = ColorRange::new(Color::rgb(0.8, 0.0, 0.0), Color::rgb(1.0, 0.2, 0.1));

    #[test]
    fn test_colors_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = random_colors(&mut rng, 200, &BRIGHT_RED).unwrap();
        assert_eq!(colors.len(), 200);
        for c in colors {
            assert!((0.8..=1.0).contains(&c.r));
            assert!((0.0..=0.2).contains(&c.g));
            assert!((0.0..=0.1).contains(&c.b));
            assert_eq!(c.a, 1.0);
        }
    }

    #[test]
    fn test_triangle_colors_repeat() {
        let mut rng = StdRng::seed_from_u64(1);
        let colors = random_triangle_colors(&mut rng, 4, &ColorRange::ANY).unwrap();
        assert_eq!(colors.len(), 12);
        for chunk in colors.chunks(3) {
            assert_eq!(chunk[0], chunk[1]);
            assert_eq!(chunk[1], chunk[2]);
        }
    }

    #[test]
    fn test_invalid_range_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let inverted = ColorRange::new(Color::WHITE, Color::BLACK);
        assert!(matches!(
            random_colors(&mut rng, 3, &inverted),
            Err(ColorError::InvalidRange { channel: 0, .. })
        ));
        let too_bright = ColorRange::new(Color::BLACK, Color::rgb(1.5, 0.0, 0.0));
        assert!(random_color(&mut rng, &too_bright).is_err());
    }

    #[test]
    fn test_seeded_generation_is_repeatable() {
        let a = random_colors(&mut StdRng::seed_from_u64(42), 10, &ColorRange::ANY).unwrap();
        let b = random_colors(&mut StdRng::seed_from_u64(42), 10, &ColorRange::ANY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_globe_colors_follow_grid_points() {
        let mesh = globe(6, 4).unwrap();
        let colors = globe_colors(&mut StdRng::seed_from_u64(3), 6, 4, &ColorRange::ANY).unwrap();
        assert_eq!(colors.len(), mesh.vertex_count());

        let vertices: Vec<_> = mesh.triangles.iter().flat_map(|t| t.vertices).collect();
        for (a, color_a) in vertices.iter().zip(&colors) {
            for (b, color_b) in vertices.iter().zip(&colors) {
                if (a.position - b.position).norm() < 1e-6 {
                    assert_eq!(color_a, color_b);
                }
            }
        }
        // Second vertex of the first triangle is on the north pole
        assert!(colors.iter().filter(|c| **c == colors[1]).count() >= 6);
    }

    #[test]
    fn test_globe_colors_reject_bad_grid() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(globe_colors(&mut rng, 2, 4, &ColorRange::ANY).unwrap().is_empty());
        let inverted = ColorRange::new(Color::WHITE, Color::BLACK);
        assert!(globe_colors(&mut rng, 6, 4, &inverted).is_err());
    }

    #[test]
    fn test_rgb8_conversion() {
        assert_eq!(Color::RED.to_rgb8(), (255, 0, 0));
        assert_eq!(Color::rgb(0.5, 2.0, -1.0).to_rgb8(), (128, 255, 0));
    }
}
