//! Bouncing-ball animation: spin, wall-to-wall travel and squash on impact.
//!
//! The ball moves along x between two walls whose inner faces sit at
//! `±wall_offset`. Its centre never passes `wall_offset - radius`; on
//! reaching that bound the velocity flips. Within `contact_zone` of the bound
//! the ball squashes along x, reaching `compress_limit` at the bound itself.

use std::f32::consts::FRAC_PI_2;

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::transform::{wrap_angle, Transform};

/// Duration of one nominal frame, in seconds.
pub const NOMINAL_FRAME: f32 = 1.0 / 60.0;

/// Tunable parameters for [`BounceState`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    /// Ball radius (uniform base scale of the unit sphere).
    pub radius: f32,
    /// Distance from the origin to the inner face of each wall.
    pub wall_offset: f32,
    /// Travel speed in units per second.
    pub speed: f32,
    /// Spin about y in radians per second; negative spins clockwise.
    pub angular_velocity: f32,
    /// Smallest x scale the ball reaches when squashed, in (0, 1].
    pub compress_limit: f32,
    /// Distance from the bound over which the squash builds up.
    pub contact_zone: f32,
}

impl BounceConfig {
    /// Inner wall face actually used: `|wall_offset|`, kept inside clip space.
    pub fn wall_face(&self) -> f32 {
        self.wall_offset.abs().min(1.0)
    }
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            radius: 0.25,
            wall_offset: 0.875,
            speed: 60.0 / 128.0,
            angular_velocity: -FRAC_PI_2,
            compress_limit: 0.875,
            contact_zone: 0.0625,
        }
    }
}

/// Where the ball is in its squash-and-stretch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionPhase {
    /// Between the walls, round.
    Free,
    /// Closing on a wall, flattening.
    Compressing,
    /// Leaving a wall, recovering its shape.
    Rebounding,
}

/// Per-frame animation state of the bouncing ball.
#[derive(Debug, Clone, PartialEq)]
pub struct BounceState {
    pub angle: f32,
    pub angular_velocity: f32,
    pub offset: f32,
    pub velocity: f32,
    pub compress_factor: f32,
    pub phase: CompressionPhase,
    radius: f32,
    bound: f32,
    compress_limit: f32,
    contact_zone: f32,
}

impl BounceState {
    pub fn new(config: &BounceConfig) -> Self {
        let radius = config.radius.abs();
        let bound = (config.wall_face() - radius).max(0.0);
        Self {
            angle: 0.0,
            angular_velocity: config.angular_velocity,
            offset: 0.0,
            velocity: config.speed.abs(),
            compress_factor: 1.0,
            phase: CompressionPhase::Free,
            radius,
            bound,
            compress_limit: if config.compress_limit > 0.0 {
                config.compress_limit.min(1.0)
            } else {
                1.0
            },
            // The outer half of the travel, at most, squashes; the centre stays round
            contact_zone: config.contact_zone.abs().min(bound * 0.5),
        }
    }

    /// Largest distance of the ball's centre from the origin.
    pub fn bound(&self) -> f32 {
        self.bound
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn compress_limit(&self) -> f32 {
        self.compress_limit
    }

    /// Advance one nominal frame.
    pub fn step(&mut self) {
        self.advance(NOMINAL_FRAME);
    }

    /// Advance the animation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }

        self.angle = wrap_angle(self.angle + self.angular_velocity * dt);

        self.offset += self.velocity * dt;
        let reflected = self.offset.abs() >= self.bound;
        if reflected {
            self.offset = self.bound.copysign(self.offset);
            self.velocity = -self.velocity;
        }

        let gap = self.bound - self.offset.abs();
        let in_zone = gap < self.contact_zone;
        let approaching = self.velocity * self.offset > 0.0;

        self.phase = match self.phase {
            _ if !in_zone => CompressionPhase::Free,
            _ if reflected => CompressionPhase::Rebounding,
            CompressionPhase::Free if approaching => CompressionPhase::Compressing,
            CompressionPhase::Free => CompressionPhase::Free,
            phase => phase,
        };

        self.compress_factor = match self.phase {
            CompressionPhase::Free => 1.0,
            CompressionPhase::Compressing | CompressionPhase::Rebounding => self.squash_at(gap),
        };
    }

    fn squash_at(&self, gap: f32) -> f32 {
        let t = if self.contact_zone > 0.0 {
            gap / self.contact_zone
        } else {
            1.0
        };
        (self.compress_limit + (1.0 - self.compress_limit) * t).clamp(self.compress_limit, 1.0)
    }

    /// Model transform: translate, spin, squash, then scale the unit sphere.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(self.offset, 0.0, 0.0)
            * Transform::rotation_y(self.angle)
            * Transform::squash_matrix(self.compress_factor)
            * Transform::scale_matrix(self.radius, self.radius, self.radius)
    }
}

impl Default for BounceState {
    fn default() -> Self {
        Self::new(&BounceConfig::default())
    }
}
