//! Loop state owned by whoever drives the simulation
//!
//! The world holds entities and counters; the caller holds this context and
//! hands it to every `SimWorld::tick`. Stopping the context is how the loop
//! is cancelled: a tick on a stopped context does nothing.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LoopContext {
    running: bool,
    /// Ticks processed since `window_start`
    frames_in_window: u32,
    window_start: Instant,
    fps_window: Duration,
    /// Ticks processed since the last reset
    total_ticks: u64,
}

impl LoopContext {
    pub fn new(fps_window: Duration, now: Instant) -> Self {
        Self {
            running: false,
            frames_in_window: 0,
            window_start: now,
            fps_window,
            total_ticks: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start (or resume) the loop; the FPS window restarts at `now`
    pub fn start(&mut self, now: Instant) {
        if !self.running {
            self.running = true;
            self.frames_in_window = 0;
            self.window_start = now;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Flip between running and paused, returning the new state
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start(now);
        }
        self.running
    }

    /// Stop the loop and forget all frame accounting
    pub fn reset(&mut self) {
        self.running = false;
        self.frames_in_window = 0;
        self.total_ticks = 0;
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Count one tick. Returns the frame count of the window when a full
    /// window has elapsed, after which counting restarts at `now`.
    pub fn count_frame(&mut self, now: Instant) -> Option<u32> {
        self.frames_in_window += 1;
        self.total_ticks += 1;

        if now.saturating_duration_since(self.window_start) >= self.fps_window {
            let fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.window_start = now;
            Some(fps)
        } else {
            None
        }
    }
}
