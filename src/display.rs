use embassy_time::{Duration, Instant};
use log::{debug, info, warn};

use crate::brightness::{BRIGHTNESS_JITTER_THRESHOLD, BrightnessPlanner, BrightnessRange};
use crate::color::{BLACK, Rgb, lit_color};
use crate::face::WordClockCompiler;
use crate::intent::{ClockIntent, IntentReceiver};
use crate::light_sensor::{DEFAULT_REACTION_SPEED, LightSensorFilter};
use crate::topology::{PIXEL_COUNT, SensorPosition};
use crate::transition::{TransitionEngine, ease_in_quad};
use crate::{LightSensor, PixelBus, WallTime};

/// Default duration of the fade between two times.
pub const DEFAULT_PIXEL_ANIMATION: Duration = Duration::from_millis(400);

/// Duration of a backlight change.
pub const BRIGHTNESS_ANIMATION: Duration = Duration::from_millis(1000);

/// Single slot used by the backlight transition.
const BRIGHTNESS_SLOT: usize = 0;

/// Durations of the display animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    /// Fade of every pixel when the time changes.
    pub pixel: Duration,
    /// Backlight change after the ambient light moved.
    pub brightness: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            pixel: DEFAULT_PIXEL_ANIMATION,
            brightness: BRIGHTNESS_ANIMATION,
        }
    }
}

/// Configuration for the display.
#[derive(Debug, Clone, Copy)]
pub struct ClockConfig {
    pub sensor_position: SensorPosition,
    pub timings: TransitionTimings,
    /// Weight of a new light sample, in (0.0, 1.0].
    pub reaction_speed: f32,
    pub brightness: BrightnessRange,
    pub jitter_threshold: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            sensor_position: SensorPosition::default(),
            timings: TransitionTimings::default(),
            reaction_speed: DEFAULT_REACTION_SPEED,
            brightness: BrightnessRange::default(),
            jitter_threshold: BRIGHTNESS_JITTER_THRESHOLD,
        }
    }
}

/// Display orchestrator.
///
/// Owns the rendered frame, every running transition and the collaborators
/// it drives. Call [`update_for_time`](Self::update_for_time) whenever a new
/// time is known and [`tick`](Self::tick) as often as possible.
pub struct DisplayOrchestrator<'a, B: PixelBus, S: LightSensor> {
    // External dependencies and configuration
    bus: B,
    sensor: S,
    intents: Option<IntentReceiver<'a>>,
    timings: TransitionTimings,

    // Internal state
    frame: [Rgb; PIXEL_COUNT],
    brightness: f32,
    brightness_target: f32,
    last_time: Option<WallTime>,

    // Internal dependencies
    compiler: WordClockCompiler,
    light: LightSensorFilter,
    planner: BrightnessPlanner,
    pixels: TransitionEngine<Rgb, PIXEL_COUNT>,
    backlight: TransitionEngine<f32, 1>,
}

impl<'a, B: PixelBus, S: LightSensor> DisplayOrchestrator<'a, B, S> {
    /// Create a display without a settings channel.
    ///
    /// # Arguments
    /// * `bus` - LED strip the frame is written to
    /// * `sensor` - Ambient light sensor sampled every tick
    /// * `config` - Orientation, animation timings and brightness settings
    pub fn new(bus: B, sensor: S, config: &ClockConfig) -> Self {
        let planner = BrightnessPlanner::new(config.brightness, config.jitter_threshold);
        let initial = planner.initial_target();
        Self {
            bus,
            sensor,
            intents: None,
            timings: config.timings,
            frame: [BLACK; PIXEL_COUNT],
            brightness: initial,
            brightness_target: initial,
            last_time: None,
            compiler: WordClockCompiler::new(config.sensor_position),
            light: LightSensorFilter::new(config.reaction_speed),
            planner,
            pixels: TransitionEngine::new_rgb(),
            backlight: TransitionEngine::new_scalar(),
        }
    }

    /// Create a display that applies settings posted on `intents`.
    pub fn with_intents(
        bus: B,
        sensor: S,
        intents: IntentReceiver<'a>,
        config: &ClockConfig,
    ) -> Self {
        let mut display = Self::new(bus, sensor, config);
        display.intents = Some(intents);
        display
    }

    /// Seed the light filter and apply the initial brightness.
    pub fn begin(&mut self) {
        self.light.update(self.sensor.sample());
        self.bus.set_brightness(to_u8(self.brightness));
        info!(
            "[DisplayOrchestrator.begin] initial brightness {}",
            self.brightness
        );
    }

    /// Start fading to a new time if the face changes.
    ///
    /// Returns `true` when an animation was started.
    pub fn update_for_time(&mut self, time: WallTime, now: Instant) -> bool {
        self.update_for_time_with(time, now, self.timings.pixel)
    }

    /// Same as [`update_for_time`](Self::update_for_time) with an explicit fade duration.
    ///
    /// # Arguments
    /// * `time` - Wall-clock time to show
    /// * `now` - Start of the fade
    /// * `duration` - Fade duration for this change only
    ///
    /// # Returns
    /// `true` when the face changed and pixel transitions were started.
    pub fn update_for_time_with(&mut self, time: WallTime, now: Instant, duration: Duration) -> bool {
        self.last_time = Some(time);
        let (changed, _) = self.compiler.compile(time.hour, time.minute, time.second);
        if !changed {
            return false;
        }
        debug!(
            "[DisplayOrchestrator.update_for_time] time {}:{}",
            time.hour, time.minute
        );
        self.start_pixel_transitions(duration, now);
        true
    }

    /// Advance the display by one frame.
    ///
    /// Light is sampled and the backlight planned first, then every
    /// transition is advanced, then the bus is flushed once.
    pub fn tick(&mut self, now: Instant) {
        self.process_intents(now);

        self.light.update(self.sensor.sample());
        self.plan_brightness(now);

        let bus = &mut self.bus;
        let brightness = &mut self.brightness;
        self.backlight.tick(now, |_, value| {
            *brightness = value;
            bus.set_brightness(to_u8(value));
        });

        let frame = &mut self.frame;
        self.pixels.tick(now, |index, color| {
            frame[index] = color;
            bus.set_pixel(index, color);
        });

        self.bus.flush();
    }

    /// Check if any pixel or backlight animation is running.
    pub fn is_animating(&self) -> bool {
        !self.pixels.is_idle() || !self.backlight.is_idle()
    }

    /// Rendered color of every pixel.
    pub const fn frame(&self) -> &[Rgb; PIXEL_COUNT] {
        &self.frame
    }

    /// Rendered backlight.
    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Backlight the display is heading to.
    pub const fn brightness_target(&self) -> f32 {
        self.brightness_target
    }

    pub const fn compiler(&self) -> &WordClockCompiler {
        &self.compiler
    }

    pub const fn light(&self) -> &LightSensorFilter {
        &self.light
    }

    pub const fn timings(&self) -> TransitionTimings {
        self.timings
    }

    pub const fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Change the sensor position and redraw the current time.
    pub fn set_sensor_position(&mut self, position: SensorPosition, now: Instant) {
        if self.compiler.sensor_position() == position {
            return;
        }
        info!("[DisplayOrchestrator] sensor position {:?}", position);
        self.compiler.set_sensor_position(position);
        if let Some(time) = self.last_time {
            self.update_for_time(time, now);
        }
    }

    /// Apply pending settings from the channel (non-blocking).
    fn process_intents(&mut self, now: Instant) {
        let Some(intents) = self.intents else {
            return;
        };
        while let Some(intent) = intents.try_receive() {
            match intent {
                ClockIntent::SetSensorPosition(position) => {
                    self.set_sensor_position(position, now);
                }
                ClockIntent::SetPixelAnimation(duration) => {
                    self.timings.pixel = duration;
                }
            }
        }
    }

    fn plan_brightness(&mut self, now: Instant) {
        let Some(target) = self.planner.plan(self.light.reading(), self.brightness_target) else {
            return;
        };
        debug!(
            "[DisplayOrchestrator] brightness animating from {} to {}",
            self.brightness, target
        );
        self.brightness_target = target;
        if let Err(err) = self.backlight.start(
            BRIGHTNESS_SLOT,
            self.brightness,
            target,
            self.timings.brightness,
            ease_in_quad,
            now,
        ) {
            warn!("[DisplayOrchestrator] backlight transition not started: {err}");
        }
    }

    /// Fade every pixel from its rendered color to its new target.
    fn start_pixel_transitions(&mut self, duration: Duration, now: Instant) {
        let state = self.compiler.state();
        for (index, lit) in state.iter().enumerate() {
            if let Err(err) = self.pixels.start(
                index,
                self.frame[index],
                lit_color(lit),
                duration,
                ease_in_quad,
                now,
            ) {
                warn!("[DisplayOrchestrator] pixel transition not started: {err}");
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(value: f32) -> u8 {
    libm::roundf(value).clamp(0.0, 255.0) as u8
}
