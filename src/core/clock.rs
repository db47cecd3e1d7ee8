use std::time::Instant;

/// Interval between FPS reports, in seconds
pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame clock - tracks delta time and a rolling frames-per-second figure
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
    frame_count: u32,
    fps_timer: f32,
    fps: f32,
    total_frames: u64,
}

impl FrameClock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            frame_count: 0,
            fps_timer: 0.0,
            fps: 0.0,
            total_frames: 0,
        }
    }

    /// Advance the clock by one frame and return the delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.record(delta);
        delta
    }

    /// Account one frame that took `delta` seconds.
    /// Returns the new FPS figure when a reporting interval elapsed.
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.total_frames += 1;
        self.frame_count += 1;
        self.fps_timer += delta;

        if self.fps_timer < FPS_UPDATE_INTERVAL {
            return None;
        }

        self.fps = self.frame_count as f32 / self.fps_timer;
        log::debug!("FPS: {:.1}", self.fps);
        self.frame_count = 0;
        self.fps_timer = 0.0;
        Some(self.fps)
    }

    /// Most recently reported FPS (0 until the first interval elapses)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
