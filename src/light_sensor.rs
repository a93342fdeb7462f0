//! Ambient light smoothing
//!
//! Raw photoresistor readings are noisy; an exponential moving average turns
//! them into a stable 0.0-1.0 signal.

/// Largest raw value produced by the 12-bit ADC
pub const LIGHT_FULL_SCALE: u16 = 4095;

/// Default weight of a new sample in the moving average
pub const DEFAULT_REACTION_SPEED: f32 = 0.1;

/// Exponential moving average over raw light samples
#[derive(Debug, Clone)]
pub struct LightSensorFilter {
    reaction_speed: f32,
    average: Option<f32>,
}

impl LightSensorFilter {
    /// Create a new filter
    ///
    /// The higher `reaction_speed`, the less smooth the signal. Panics unless
    /// `0.0 < reaction_speed <= 1.0`.
    pub fn new(reaction_speed: f32) -> Self {
        assert!(reaction_speed <= 1.0, "reaction speed {reaction_speed} too high");
        assert!(reaction_speed > 0.0, "reaction speed {reaction_speed} too low");
        Self {
            reaction_speed,
            average: None,
        }
    }

    pub const fn reaction_speed(&self) -> f32 {
        self.reaction_speed
    }

    /// Feed one raw sample
    ///
    /// The first sample seeds the average as is.
    pub fn update(&mut self, sample: u16) {
        let sample = f32::from(sample.min(LIGHT_FULL_SCALE));
        self.average = Some(match self.average {
            Some(average) => sample * self.reaction_speed + average * (1.0 - self.reaction_speed),
            None => sample,
        });
    }

    /// Smoothed raw value, if any sample was seen
    pub const fn average(&self) -> Option<f32> {
        self.average
    }

    /// Smoothed light level, 0.0 (dark) to 1.0 (bright)
    pub fn reading(&self) -> f32 {
        self.average.unwrap_or(0.0) / f32::from(LIGHT_FULL_SCALE)
    }
}

impl Default for LightSensorFilter {
    fn default() -> Self {
        Self::new(DEFAULT_REACTION_SPEED)
    }
}
