//! Host-side simulation clock.

/// Simulation clock with a speed multiplier and an optional locked frame rate.
///
/// Hosts use it as the time source behind [`SimulationHost`](crate::SimulationHost):
/// the scheduler freezes it with a time-scale of `0` while a frame is captured.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    time_scale: f32,
    fixed_step: Option<f32>,
    elapsed: f64,
    frame_count: u64,
}

impl SimulationClock {
    /// Create a running clock at normal speed, following real time.
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            fixed_step: None,
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the speed multiplier. Negative values clamp to `0.0`.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Advance by exactly `1 / fps` per frame, ignoring real time.
    pub fn lock_frame_rate(&mut self, fps: u32) {
        self.fixed_step = (fps > 0).then(|| 1.0 / fps as f32);
    }

    /// Return to following real time.
    pub fn unlock_frame_rate(&mut self) {
        self.fixed_step = None;
    }

    /// Advance one frame. Returns the scaled simulated delta in seconds.
    pub fn advance(&mut self, real_delta: f32) -> f32 {
        let step = self.fixed_step.unwrap_or(real_delta);
        let delta = step * self.time_scale;
        self.elapsed += delta as f64;
        self.frame_count += 1;
        delta
    }

    /// Total simulated seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Frames advanced so far, frozen or not.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_follows_real_delta() {
        let mut clock = SimulationClock::new();
        assert_eq!(clock.advance(0.5), 0.5);
        assert_eq!(clock.elapsed(), 0.5);
    }

    #[test]
    fn locked_rate_ignores_real_delta() {
        let mut clock = SimulationClock::new();
        clock.lock_frame_rate(25);

        let delta = clock.advance(3.0);
        assert!((delta - 0.04).abs() < 1e-6);
    }

    #[test]
    fn frozen_clock_counts_frames_but_not_time() {
        let mut clock = SimulationClock::new();
        clock.set_time_scale(0.0);

        assert_eq!(clock.advance(0.1), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn negative_scale_clamps_to_zero() {
        let mut clock = SimulationClock::new();
        clock.set_time_scale(-2.0);
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn unlock_restores_real_time() {
        let mut clock = SimulationClock::new();
        clock.lock_frame_rate(10);
        clock.unlock_frame_rate();
        assert_eq!(clock.advance(0.25), 0.25);
    }
}
