use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
}

/// Produces clamped frame deltas and a once-per-second FPS estimate.
///
/// The clamps keep the bouncing ball from tunnelling through a wall after
/// the terminal was suspended or resized.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    dt_min: Duration,
    dt_max: Duration,
    window_start: Instant,
    window_frames: u32,
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            last: now,
            dt_min,
            dt_max,
            window_start: now,
            window_frames: 0,
            fps: 0.0,
        }
    }

    /// Restart timing, e.g. after resuming from pause.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        self.window_frames += 1;
        let window = now.saturating_duration_since(self.window_start);
        if window >= Duration::from_secs(1) {
            self.fps = self.window_frames as f32 / window.as_secs_f32();
            self.window_frames = 0;
            self.window_start = now;
        }

        FrameTime {
            dt: dt.as_secs_f32(),
        }
    }

    /// Frames per second over the last full second
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
