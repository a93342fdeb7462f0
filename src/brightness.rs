//! Backlight planning
//!
//! Maps the smoothed light level onto the usable brightness range and
//! decides when the change is worth an animation.

pub const MIN_BRIGHTNESS: u8 = 20;
pub const MAX_BRIGHTNESS: u8 = 255;

/// Smallest target change that starts a new animation
pub const BRIGHTNESS_JITTER_THRESHOLD: f32 = 5.0;

/// Allowed global brightness range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessRange {
    min: u8,
    max: u8,
}

impl BrightnessRange {
    /// Create a range
    ///
    /// Panics if `min > max`.
    pub const fn new(min: u8, max: u8) -> Self {
        assert!(min <= max, "brightness range is inverted");
        Self { min, max }
    }

    pub const fn min(self) -> u8 {
        self.min
    }

    pub const fn max(self) -> u8 {
        self.max
    }

    /// Middle of the range, rounded down
    pub const fn half(self) -> u8 {
        (self.max - self.min) / 2 + self.min
    }

    /// Brightness for a light level in 0.0-1.0
    pub fn scale(self, level: f32) -> f32 {
        let min = f32::from(self.min);
        let range = f32::from(self.max) - min;
        range * level.clamp(0.0, 1.0) + min
    }
}

impl Default for BrightnessRange {
    fn default() -> Self {
        Self::new(MIN_BRIGHTNESS, MAX_BRIGHTNESS)
    }
}

/// Decides new backlight targets
#[derive(Debug, Clone)]
pub struct BrightnessPlanner {
    range: BrightnessRange,
    jitter_threshold: f32,
}

impl BrightnessPlanner {
    /// Create a planner.
    ///
    /// # Arguments
    /// * `range` - Backlight reached at reading 0.0 and 1.0
    /// * `jitter_threshold` - Smallest target change worth animating
    pub const fn new(range: BrightnessRange, jitter_threshold: f32) -> Self {
        Self {
            range,
            jitter_threshold,
        }
    }

    pub const fn range(&self) -> BrightnessRange {
        self.range
    }

    /// Target the planner starts from before any light was measured
    pub fn initial_target(&self) -> f32 {
        f32::from(self.range.half())
    }

    /// New target for a light level, or `None` if it is too close to the
    /// current one
    pub fn plan(&self, reading: f32, current_target: f32) -> Option<f32> {
        let computed = self.range.scale(reading);
        if libm::fabsf(computed - current_target) < self.jitter_threshold {
            return None;
        }
        Some(computed)
    }
}

impl Default for BrightnessPlanner {
    fn default() -> Self {
        Self::new(BrightnessRange::default(), BRIGHTNESS_JITTER_THRESHOLD)
    }
}
