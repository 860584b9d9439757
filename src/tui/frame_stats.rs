use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of frames averaged by the performance overlay
pub const WINDOW: usize = 60;

/// Rolling frame timing for the performance overlay.
///
/// Records the interval between frame starts (for FPS) and the time spent
/// building and drawing each frame (for frame time).
#[derive(Debug, Clone)]
pub struct FrameStats {
    intervals: VecDeque<Duration>,
    frame_times: VecDeque<Duration>,
    last_start: Option<Instant>,
}

impl Default for FrameStats {
    fn default() -> Self {
        FrameStats {
            intervals: VecDeque::with_capacity(WINDOW),
            frame_times: VecDeque::with_capacity(WINDOW),
            last_start: None,
        }
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a frame
    pub fn begin_frame(&mut self, now: Instant) {
        if let Some(prev) = self.last_start {
            push_bounded(&mut self.intervals, now.saturating_duration_since(prev));
        }
        self.last_start = Some(now);
    }

    /// Record how long the frame's build + draw took
    pub fn end_frame(&mut self, frame_time: Duration) {
        push_bounded(&mut self.frame_times, frame_time);
    }

    /// Frames per second over the window, or None before two frames
    pub fn fps(&self) -> Option<f64> {
        let total: Duration = self.intervals.iter().sum();
        if self.intervals.is_empty() || total.is_zero() {
            return None;
        }
        Some(self.intervals.len() as f64 / total.as_secs_f64())
    }

    /// Mean frame time in milliseconds
    pub fn mean_frame_ms(&self) -> Option<f64> {
        if self.frame_times.is_empty() {
            return None;
        }
        let total: Duration = self.frame_times.iter().sum();
        Some(total.as_secs_f64() * 1000.0 / self.frame_times.len() as f64)
    }

    /// Overlay text, e.g. `20.0 fps  1.25 ms`
    pub fn summary(&self) -> String {
        let fps = self
            .fps()
            .map_or_else(|| "-- fps".to_string(), |f| format!("{:.1} fps", f));
        let ms = self
            .mean_frame_ms()
            .map_or_else(|| "-- ms".to_string(), |m| format!("{:.2} ms", m));
        format!("{}  {}", fps, ms)
    }
}

fn push_bounded(buf: &mut VecDeque<Duration>, value: Duration) {
    if buf.len() == WINDOW {
        buf.pop_front();
    }
    buf.push_back(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_have_no_numbers() {
        let stats = FrameStats::new();
        assert!(stats.fps().is_none());
        assert!(stats.mean_frame_ms().is_none());
        assert_eq!(stats.summary(), "-- fps  -- ms");
    }

    #[test]
    fn fps_from_frame_intervals() {
        let mut stats = FrameStats::new();
        let start = Instant::now();
        for i in 0..5 {
            stats.begin_frame(start + Duration::from_millis(50 * i));
        }
        let fps = stats.fps().unwrap();
        assert!((fps - 20.0).abs() < 1e-9);
    }

    #[test]
    fn mean_frame_time() {
        let mut stats = FrameStats::new();
        stats.end_frame(Duration::from_millis(1));
        stats.end_frame(Duration::from_millis(3));
        assert!((stats.mean_frame_ms().unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(stats.summary(), "-- fps  2.00 ms");
    }

    #[test]
    fn window_is_bounded() {
        let mut stats = FrameStats::new();
        for _ in 0..WINDOW {
            stats.end_frame(Duration::from_millis(10));
        }
        for _ in 0..WINDOW {
            stats.end_frame(Duration::from_millis(2));
        }
        assert!((stats.mean_frame_ms().unwrap() - 2.0).abs() < 1e-9);
    }
}
