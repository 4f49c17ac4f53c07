//! Session clock and frame pacing

use std::thread;
use std::time::{Duration, Instant};

/// Milliseconds since the program started; read once per frame
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    start: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Blocks at the end of each frame until the next frame boundary
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    frame: Duration,
    deadline: Instant,
}

impl FrameLimiter {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            deadline: Instant::now() + frame,
        }
    }

    /// Sleep out the rest of the frame. A late frame does not cause a burst of
    /// short frames afterwards.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if let Some(remaining) = self.deadline.checked_duration_since(now) {
            thread::sleep(remaining);
        }
        self.deadline = self.deadline.max(now) + self.frame;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_paces_frames() {
        let frame = Duration::from_millis(5);
        let mut limiter = FrameLimiter::new(frame);
        let start = Instant::now();
        for _ in 0..4 {
            limiter.wait();
        }
        assert!(start.elapsed() >= frame * 3);
    }

    #[test]
    fn test_late_frame_resets_deadline() {
        let frame = Duration::from_millis(2);
        let start = Instant::now();
        let mut limiter = FrameLimiter::new(frame);
        thread::sleep(Duration::from_millis(20));
        limiter.wait();
        // Rebased on the late frame, not the stale deadline
        assert!(limiter.deadline >= start + Duration::from_millis(22));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = SessionClock::start();
        let a = clock.now_ms();
        thread::sleep(Duration::from_millis(2));
        assert!(clock.now_ms() >= a + 1);
    }
}
