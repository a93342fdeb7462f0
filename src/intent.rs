//! Settings changes coming from outside the render loop
//!
//! The configuration portal persists the sensor position and can change it
//! while the clock runs. Changes are posted to an [`IntentChannel`] and
//! applied at the start of the next tick.
//!
//! Only the latest value of each setting is kept: remounting the sensor
//! twice before a tick redraws the face once, for the last position.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Duration;

use crate::topology::SensorPosition;

/// Intent to change a display setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockIntent {
    /// The light sensor was remounted; redraw the face for the new orientation.
    SetSensorPosition(SensorPosition),
    /// Duration of the pixel fade for subsequent time changes.
    SetPixelAnimation(Duration),
}

#[derive(Debug)]
struct PendingIntents {
    sensor_position: Option<SensorPosition>,
    pixel_animation: Option<Duration>,
}

impl PendingIntents {
    const fn new() -> Self {
        Self {
            sensor_position: None,
            pixel_animation: None,
        }
    }

    fn post(&mut self, intent: ClockIntent) -> Option<ClockIntent> {
        match intent {
            ClockIntent::SetSensorPosition(position) => self
                .sensor_position
                .replace(position)
                .map(ClockIntent::SetSensorPosition),
            ClockIntent::SetPixelAnimation(duration) => self
                .pixel_animation
                .replace(duration)
                .map(ClockIntent::SetPixelAnimation),
        }
    }

    /// The fade duration goes first so that a redraw caused by a new sensor
    /// position already uses it.
    fn take(&mut self) -> Option<ClockIntent> {
        if let Some(duration) = self.pixel_animation.take() {
            return Some(ClockIntent::SetPixelAnimation(duration));
        }
        self.sensor_position
            .take()
            .map(ClockIntent::SetSensorPosition)
    }

    fn len(&self) -> usize {
        usize::from(self.sensor_position.is_some()) + usize::from(self.pixel_animation.is_some())
    }
}

/// Latest-wins settings mailbox usable from a `static`.
///
/// Holds at most one pending intent per setting; posting never fails.
pub struct IntentChannel {
    pending: Mutex<RefCell<PendingIntents>>,
}

impl IntentChannel {
    /// Create an empty channel.
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(RefCell::new(PendingIntents::new())),
        }
    }

    pub const fn sender(&self) -> IntentSender<'_> {
        IntentSender { channel: self }
    }

    pub const fn receiver(&self) -> IntentReceiver<'_> {
        IntentReceiver { channel: self }
    }

    /// Post an intent.
    ///
    /// # Returns
    ///
    /// The pending intent of the same kind it superseded, if any.
    pub fn send(&self, intent: ClockIntent) -> Option<ClockIntent> {
        critical_section::with(|cs| self.pending.borrow(cs).borrow_mut().post(intent))
    }

    /// Take the next pending intent.
    pub fn try_receive(&self) -> Option<ClockIntent> {
        critical_section::with(|cs| self.pending.borrow(cs).borrow_mut().take())
    }

    /// Number of settings waiting to be applied.
    pub fn pending(&self) -> usize {
        critical_section::with(|cs| self.pending.borrow(cs).borrow().len())
    }
}

impl Default for IntentChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting end of an [`IntentChannel`], handed to the configuration task.
#[derive(Clone, Copy)]
pub struct IntentSender<'a> {
    channel: &'a IntentChannel,
}

impl IntentSender<'_> {
    pub fn send(&self, intent: ClockIntent) -> Option<ClockIntent> {
        self.channel.send(intent)
    }
}

/// Draining end of an [`IntentChannel`], owned by the display.
#[derive(Clone, Copy)]
pub struct IntentReceiver<'a> {
    channel: &'a IntentChannel,
}

impl IntentReceiver<'_> {
    pub fn try_receive(&self) -> Option<ClockIntent> {
        self.channel.try_receive()
    }
}
