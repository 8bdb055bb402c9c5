/// Scaled simulation clock.
/// Turns raw frame deltas into the `(delta, elapsed)` pair the simulation
/// consumes, both multiplied by the animation-speed factor.
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Scaled delta of the most recent advance.
    delta: f32,
    /// Cumulative scaled time.
    elapsed: f32,
    /// Upper bound on a single raw frame delta (tab switches, debugger pauses).
    max_frame_dt: f32,
}

impl SimClock {
    pub const DEFAULT_MAX_FRAME_DT: f32 = 0.25;

    pub fn new() -> Self {
        Self {
            delta: 0.0,
            elapsed: 0.0,
            max_frame_dt: Self::DEFAULT_MAX_FRAME_DT,
        }
    }

    pub fn with_max_frame_dt(mut self, max_frame_dt: f32) -> Self {
        self.max_frame_dt = max_frame_dt.max(0.0);
        self
    }

    /// Advance by one raw frame. Returns the scaled delta.
    pub fn advance(&mut self, raw_dt: f32, speed: f32) -> f32 {
        let raw = if raw_dt.is_finite() {
            raw_dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        };
        let speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
        self.delta = raw * speed;
        self.elapsed += self.delta;
        self.delta
    }

    /// Scaled delta of the most recent frame.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Cumulative scaled time.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}
