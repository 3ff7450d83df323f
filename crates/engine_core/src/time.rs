//! Frame timing for the simulation loop.
//!
//! The core never reads a wall clock: the display/render layer hands in the
//! elapsed time since the previous frame and the cumulative clock, and this
//! type only sanitizes and records them.

/// Sanitize a caller-supplied duration: negative or non-finite values become zero.
#[inline]
pub fn sanitize_seconds(seconds: f32) -> f32 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Externally driven frame clock.
#[derive(Debug, Clone)]
pub struct Time {
    /// Duration of the current frame in seconds.
    delta: f32,
    /// Cumulative clock in seconds.
    elapsed: f32,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed timestep used by headless drivers (default 60 Hz).
    fixed_timestep: f32,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new frame clock at t = 0.
    pub fn new() -> Self {
        Self {
            delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            fixed_timestep: 1.0 / 60.0,
        }
    }

    /// Record a frame whose delta and cumulative clock come from the display layer.
    pub fn begin_frame(&mut self, delta: f32, elapsed: f32) {
        let delta = sanitize_seconds(delta);
        let elapsed = sanitize_seconds(elapsed);
        if delta == 0.0 {
            log::trace!("frame {} has zero or invalid delta", self.frame_count);
        }
        self.delta = delta;
        // The clock never runs backwards, even if the caller's does.
        self.elapsed = elapsed.max(self.elapsed);
        self.frame_count += 1;
    }

    /// Advance by `delta` seconds, accumulating the clock locally.
    pub fn step(&mut self, delta: f32) {
        let delta = sanitize_seconds(delta);
        self.begin_frame(delta, self.elapsed + delta);
    }

    /// Advance by one fixed timestep.
    pub fn step_fixed(&mut self) {
        self.step(self.fixed_timestep);
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep
    }

    /// Get the current FPS (from the last frame).
    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 {
            1.0 / self.delta
        } else {
            0.0
        }
    }

    /// Set the fixed timestep rate in Hz.
    pub fn set_fixed_rate(&mut self, hz: f32) {
        if hz > 0.0 && hz.is_finite() {
            self.fixed_timestep = 1.0 / hz;
        }
    }
}
