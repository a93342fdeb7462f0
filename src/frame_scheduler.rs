//! Fixed-rate clock loop.
//!
//! Reads the wall clock, feeds the display and tells the caller how long to
//! sleep. No timer or executor is assumed.

use embassy_time::{Duration, Instant};

use crate::display::DisplayOrchestrator;
use crate::{ClockSource, LightSensor, PixelBus};

/// Refresh rate of the face.
pub const DEFAULT_FPS: u32 = 50;

/// Time between two frames at [`DEFAULT_FPS`].
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Outcome of [`FrameScheduler::tick`].
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// When the next frame is due.
    pub next_deadline: Instant,
    /// Zero when the loop runs late.
    pub sleep_duration: Duration,
}

/// Polls a [`ClockSource`] and ticks a [`DisplayOrchestrator`] every frame.
///
/// # Example
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(rtc, display);
/// scheduler.display_mut().begin();
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, C: ClockSource, B: PixelBus, S: LightSensor> {
    clock: C,
    display: DisplayOrchestrator<'a, B, S>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, C: ClockSource, B: PixelBus, S: LightSensor> FrameScheduler<'a, C, B, S> {
    /// Scheduler running at [`DEFAULT_FPS`].
    pub fn new(clock: C, display: DisplayOrchestrator<'a, B, S>) -> Self {
        Self::with_frame_duration(clock, display, DEFAULT_FRAME_DURATION)
    }

    /// Scheduler running at a custom rate.
    ///
    /// # Arguments
    /// * `clock` - Wall-clock source read once per frame
    /// * `display` - Display ticked once per frame
    /// * `frame_duration` - Time between two frames
    pub fn with_frame_duration(
        clock: C,
        display: DisplayOrchestrator<'a, B, S>,
        frame_duration: Duration,
    ) -> Self {
        Self {
            clock,
            display,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Run one frame.
    ///
    /// Reads the clock, starts fades if the face changed, advances every
    /// running animation and flushes the bus. A loop more than two frames
    /// late restarts its schedule from `now`.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration.as_ticks() * 2;
        if now.as_ticks() > self.next_frame.as_ticks() + max_drift {
            self.next_frame = now;
        }

        let time = self.clock.now();
        self.display.update_for_time(time, now);
        self.display.tick(now);

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame > now {
            self.next_frame.saturating_duration_since(now)
        } else {
            Duration::from_ticks(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    pub fn display(&self) -> &DisplayOrchestrator<'a, B, S> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayOrchestrator<'a, B, S> {
        &mut self.display
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
