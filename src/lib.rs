#![no_std]

pub mod brightness;
pub mod bus;
pub mod color;
pub mod display;
pub mod face;
pub mod frame_scheduler;
pub mod intent;
pub mod light_sensor;
pub mod topology;
pub mod transition;

pub use brightness::{BrightnessPlanner, BrightnessRange, MAX_BRIGHTNESS, MIN_BRIGHTNESS};
pub use bus::SmartLedsBus;
pub use display::{ClockConfig, DisplayOrchestrator, TransitionTimings};
pub use face::{DisplayState, FaceDiagnostic, Word, WordClockCompiler, WordSegment};
pub use frame_scheduler::FrameScheduler;
pub use intent::{ClockIntent, IntentChannel, IntentReceiver, IntentSender};
pub use light_sensor::LightSensorFilter;
pub use topology::{Corner, PIXEL_COUNT, SensorPosition, TopologyMapper};
pub use transition::{Transition, TransitionEngine, TransitionError, ease_in_quad};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Wall-clock time as read from the real-time clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallTime {
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
}

impl WallTime {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

/// Abstract LED bus.
///
/// Implement this trait to support different hardware platforms.
/// Writes are assumed to succeed; the display never retries.
pub trait PixelBus {
    /// Set the color of one LED in the pending frame.
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Set the global brightness applied on the next flush.
    fn set_brightness(&mut self, brightness: u8);

    /// Send the pending frame to the strip.
    fn flush(&mut self);
}

/// Ambient light sensor returning raw 12-bit ADC values (0-4095).
pub trait LightSensor {
    fn sample(&mut self) -> u16;
}

/// Source of wall-clock time, usually a battery-backed RTC.
pub trait ClockSource {
    fn now(&mut self) -> WallTime;
}

/// Install the `esp-println` logger as the `log` backend.
#[cfg(feature = "esp32-log")]
pub fn init_logger(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}
