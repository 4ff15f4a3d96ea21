//! Frame pacing
//!
//! Optional frame-rate cap for the main loop (0 = uncapped)

use std::time::{Duration, Instant};

/// Caps how often the main loop is allowed to produce a frame.
pub struct FrameLimiter {
    max_fps: u32,
    last_frame: Instant,
}

impl FrameLimiter {
    pub fn new() -> Self {
        Self {
            max_fps: 0,
            last_frame: Instant::now(),
        }
    }

    pub fn max_fps(&self) -> u32 {
        self.max_fps
    }

    pub fn set_max_fps(&mut self, max_fps: u32) {
        if self.max_fps != max_fps {
            tracing::debug!(max_fps, "frame limiter updated");
        }
        self.max_fps = max_fps;
    }

    /// Minimum time between frames, `None` when uncapped.
    pub fn frame_budget(&self) -> Option<Duration> {
        match self.max_fps {
            0 => None,
            fps => Some(Duration::from_nanos(1_000_000_000 / u64::from(fps))),
        }
    }

    /// Time still to wait before the next frame may start.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.frame_budget() {
            Some(budget) => budget.saturating_sub(now.saturating_duration_since(self.last_frame)),
            None => Duration::ZERO,
        }
    }

    /// Sleep out the rest of the current frame budget and start the next frame.
    pub fn pace(&mut self) {
        let wait = self.remaining(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.last_frame = Instant::now();
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new()
    }
}
