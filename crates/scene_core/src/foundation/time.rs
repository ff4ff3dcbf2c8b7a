//! Frame clock
//!
//! The scene is driven by explicit `advance` calls, one per frame, so frame
//! gating (update intervals) stays deterministic regardless of wall time.

/// Frame counter and accumulated simulation time
#[derive(Debug, Clone, Default)]
pub struct Timer {
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Timer {
    /// Create a new timer at frame zero
    pub const fn new() -> Self {
        Self {
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by one frame that lasted `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) {
        self.delta_time = delta_time.max(0.0);
        self.total_time += self.delta_time;
        self.frame_count += 1;
    }

    /// Get the duration of the last frame in seconds
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total simulated time
    pub const fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check whether something running every `interval` frames is due this frame
    pub const fn is_due(&self, interval: u32) -> bool {
        interval <= 1 || self.frame_count % interval as u64 == 0
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_accumulates() {
        let mut timer = Timer::new();
        timer.advance(0.5);
        timer.advance(0.25);

        assert_eq!(timer.frame_count(), 2);
        assert_relative_eq!(timer.delta_time(), 0.25);
        assert_relative_eq!(timer.total_time(), 0.75);
        assert_relative_eq!(timer.average_fps(), 2.0 / 0.75);
    }

    #[test]
    fn test_is_due_gates_on_interval() {
        let mut timer = Timer::new();
        timer.advance(0.016);
        assert!(timer.is_due(1));
        assert!(!timer.is_due(2));

        timer.advance(0.016);
        assert!(timer.is_due(2));
        assert!(!timer.is_due(3));
    }
}
