//! Frame clock for the Forgeworld combat loop
//!
//! The host drives the simulation with a per-display-frame callback that
//! carries a monotonically increasing millisecond timestamp. The clock turns
//! those raw timestamps into clamped, scalable deltas and a simulation
//! timeline that the combat core compares animation durations against.

use serde::{Deserialize, Serialize};

/// Configuration for the frame clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// How many simulation milliseconds pass per real millisecond
    pub time_scale: f64,
    /// Maximum delta per frame, to prevent huge catch-up jumps after the
    /// host was suspended (backgrounded tab, debugger pause)
    pub max_delta_ms: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_ms: 250.0,
        }
    }
}

/// Turns host timestamps into simulation time
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Configuration
    pub config: ClockConfig,
    /// Timestamp of the previous tick, if any
    last_timestamp_ms: Option<f64>,
    /// Scaled delta for the current frame
    delta_ms: f64,
    /// Unscaled, clamped delta for the current frame
    unscaled_delta_ms: f64,
    /// Simulation time since the clock started, in milliseconds
    total_ms: f64,
    /// Frame counter
    frame_count: u64,
    /// Whether the clock is paused
    paused: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

impl FrameClock {
    /// Create a new clock with the given config
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            last_timestamp_ms: None,
            delta_ms: 0.0,
            unscaled_delta_ms: 0.0,
            total_ms: 0.0,
            frame_count: 0,
            paused: false,
        }
    }

    /// Advance the clock with the host timestamp for this frame.
    ///
    /// Returns the scaled delta. The first tick establishes a baseline and
    /// yields a zero delta; a timestamp that goes backwards is treated the
    /// same way rather than producing a negative delta.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        self.frame_count += 1;

        let raw = match self.last_timestamp_ms {
            Some(last) if timestamp_ms >= last => timestamp_ms - last,
            _ => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        self.unscaled_delta_ms = raw.min(self.config.max_delta_ms);

        if self.paused {
            self.delta_ms = 0.0;
            return 0.0;
        }

        self.delta_ms = self.unscaled_delta_ms * self.config.time_scale;
        self.total_ms += self.delta_ms;
        self.delta_ms
    }

    /// Scaled delta of the current frame in milliseconds
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Scaled delta of the current frame in seconds
    pub fn delta_secs(&self) -> f32 {
        (self.delta_ms / 1000.0) as f32
    }

    /// Simulation time since the clock started, in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.total_ms
    }

    /// Number of ticks processed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Pause the clock (deltas become zero, total time stops advancing)
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the clock
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f64) {
        self.config.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero_delta() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(1000.0), 0.0);
        assert_eq!(clock.tick(1016.0), 16.0);
        assert_eq!(clock.now_ms(), 16.0);
    }

    #[test]
    fn test_delta_clamping() {
        let mut clock = FrameClock::default();
        clock.tick(0.0);
        // Host was suspended for 10 seconds; clamp to max_delta_ms
        assert_eq!(clock.tick(10_000.0), 250.0);
    }

    #[test]
    fn test_backwards_timestamp() {
        let mut clock = FrameClock::default();
        clock.tick(1000.0);
        assert_eq!(clock.tick(500.0), 0.0);
        // Recovers on the next monotonic tick
        assert_eq!(clock.tick(516.0), 16.0);
    }

    #[test]
    fn test_pause_and_time_scale() {
        let mut clock = FrameClock::default();
        clock.tick(0.0);
        clock.pause();
        assert_eq!(clock.tick(16.0), 0.0);
        assert_eq!(clock.now_ms(), 0.0);

        clock.resume();
        clock.set_time_scale(2.0);
        assert_eq!(clock.tick(32.0), 32.0); // 16 raw * 2.0
    }
}
