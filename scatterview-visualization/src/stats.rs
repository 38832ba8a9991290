//! Frame counting and FPS measurement

use instant::Instant;
use std::time::Duration;

const MEASURE_WINDOW: Duration = Duration::from_secs(1);

/// Counts drawn frames and measures frames per second over one-second windows
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frames: u64,
    window_start: Option<Instant>,
    window_frames: u32,
    fps: Option<f32>,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame drawn now
    pub fn record_frame(&mut self) {
        self.record_frame_at(Instant::now());
    }

    /// Record a frame drawn at `now`
    pub fn record_frame_at(&mut self, now: Instant) {
        self.frames += 1;
        let start = match self.window_start {
            Some(start) => start,
            None => {
                self.window_start = Some(now);
                return;
            }
        };

        self.window_frames += 1;
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= MEASURE_WINDOW {
            let fps = self.window_frames as f32 / elapsed.as_secs_f32();
            log::debug!("{:.1} fps", fps);
            self.fps = Some(fps);
            self.window_start = Some(now);
            self.window_frames = 0;
        }
    }

    /// Total frames drawn
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames per second over the last completed window
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }
}
