//! Frame clock that feeds the simulation.
//!
//! The rope only needs a `dt` per step. [`Clock`] turns frame timing into
//! that `dt`, with pause, slow motion, fixed timesteps, and a clamp that keeps
//! a stalled frame (window drag, breakpoint) from injecting one huge step.
//!
//! # Example
//!
//! ```
//! use ropesim::time::Clock;
//!
//! let mut clock = Clock::new();
//! clock.set_time_scale(0.5);
//!
//! let dt = clock.advance(0.02);
//! assert!((dt - 0.01).abs() < 1e-6);
//! assert_eq!(clock.frame(), 1);
//! ```

use std::time::Instant;

/// Largest `dt` handed out by default, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 1.0 / 20.0;

/// Produces simulation time steps from frame timing.
#[derive(Debug)]
pub struct Clock {
    /// When the last tick occurred.
    last_tick: Instant,
    /// Simulated seconds handed out so far.
    elapsed_secs: f32,
    /// The most recent step.
    delta_secs: f32,
    /// Ticks since creation or reset.
    frame_count: u64,
    paused: bool,
    /// Replaces the measured delta when set.
    fixed_delta: Option<f32>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
    max_delta: f32,
}

impl Clock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }

    /// Measure the wall time since the previous tick and turn it into a step.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.advance(raw)
    }

    /// Turn a raw frame duration into a step and record it.
    ///
    /// Returns 0 while paused. Otherwise the fixed delta if set, or `raw`
    /// clamped to the maximum delta, times the time scale. The clamp only
    /// applies to measured time; a fixed delta is used as given.
    pub fn advance(&mut self, raw: f32) -> f32 {
        self.frame_count += 1;

        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        let base = match self.fixed_delta {
            Some(fixed) => fixed.max(0.0),
            None => raw.clamp(0.0, self.max_delta),
        };
        self.delta_secs = base * self.time_scale;
        self.elapsed_secs += self.delta_secs;
        self.delta_secs
    }

    /// Simulated seconds handed out so far.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// The most recent step.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Ticks since creation or reset, paused ones included.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    #[inline]
    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if !self.paused {
            // Don't hand the paused interval to the next tick.
            self.last_tick = Instant::now();
        }
    }

    /// Use a fixed step instead of measured frame time. `None` restores
    /// measured timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed (slow motion)
    /// - `2.0` = double speed
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Set the largest step handed out before scaling.
    pub fn set_max_delta(&mut self, max: f32) {
        self.max_delta = max.max(0.0);
    }

    /// Clear counters and restart timing from now. Settings are kept.
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_clock_new() {
        let clock = Clock::new();
        assert_eq!(clock.frame(), 0);
        assert!(!clock.is_paused());
        assert_eq!(clock.time_scale(), 1.0);
        assert_eq!(clock.max_delta(), DEFAULT_MAX_DELTA);
    }

    #[test]
    fn test_tick_measures_time() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(10));
        let dt = clock.tick();

        assert!(dt > 0.0);
        assert!(dt <= DEFAULT_MAX_DELTA);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_advance_accumulates() {
        let mut clock = Clock::new();
        clock.advance(0.01);
        clock.advance(0.02);

        assert!((clock.elapsed() - 0.03).abs() < 1e-6);
        assert!((clock.delta() - 0.02).abs() < 1e-6);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_pause() {
        let mut clock = Clock::new();
        clock.advance(0.01);

        clock.toggle_pause();
        assert!(clock.is_paused());

        let elapsed_before = clock.elapsed();
        assert_eq!(clock.advance(0.01), 0.0);
        assert_eq!(clock.elapsed(), elapsed_before);
        assert_eq!(clock.delta(), 0.0);

        clock.toggle_pause();
        assert!(clock.advance(0.01) > 0.0);
    }

    #[test]
    fn test_large_frames_are_clamped() {
        let mut clock = Clock::new();
        assert_eq!(clock.advance(2.0), DEFAULT_MAX_DELTA);

        clock.set_max_delta(0.5);
        assert_eq!(clock.advance(2.0), 0.5);
    }

    #[test]
    fn test_fixed_delta_ignores_max_delta() {
        let mut clock = Clock::new();
        clock.set_fixed_delta(Some(0.1));

        assert_eq!(clock.advance(0.016), 0.1);
        assert_eq!(clock.advance(5.0), 0.1);

        // Measured time is still clamped once the fixed step is removed.
        clock.set_fixed_delta(None);
        assert_eq!(clock.advance(5.0), DEFAULT_MAX_DELTA);
    }

    #[test]
    fn test_negative_raw_delta_is_zero() {
        let mut clock = Clock::new();
        assert_eq!(clock.advance(-1.0), 0.0);
    }

    #[test]
    fn test_time_scale() {
        let mut clock = Clock::new();
        clock.set_time_scale(2.0);
        assert_eq!(clock.time_scale(), 2.0);
        assert!((clock.advance(0.01) - 0.02).abs() < 1e-6);

        // Negative scale should clamp to 0
        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
        assert_eq!(clock.advance(0.01), 0.0);
    }

    #[test]
    fn test_fixed_delta() {
        let mut clock = Clock::new();
        clock.set_fixed_delta(Some(1.0 / 60.0));

        thread::sleep(Duration::from_millis(30));
        let dt = clock.tick();

        // Should use fixed delta regardless of actual time
        assert!((dt - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_reset_keeps_settings() {
        let mut clock = Clock::new();
        clock.set_time_scale(0.5);
        clock.advance(0.02);
        clock.reset();

        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.time_scale(), 0.5);
    }
}
