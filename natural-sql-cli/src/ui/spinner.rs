//! Animated spinner shown next to the loading message

use std::time::{Duration, Instant};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille spinner advancing at most once per `speed`
pub struct Spinner {
    frame_index: usize,
    last_update: Instant,
    speed: Duration,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            frame_index: 0,
            last_update: Instant::now(),
            speed: Duration::from_millis(80),
        }
    }

    /// Advance if enough time has passed and return the current frame
    pub fn tick(&mut self) -> &'static str {
        let now = Instant::now();
        if now.duration_since(self.last_update) >= self.speed {
            self.frame_index = (self.frame_index + 1) % FRAMES.len();
            self.last_update = now;
        }
        FRAMES[self.frame_index]
    }

    /// Restart from the first frame
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.last_update = Instant::now();
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}
