//! [`PixelBus`] over any `smart-leds` writer.
//!
//! Keeps the frame and the global brightness in memory and pushes both to
//! the strip on flush, the way a brightness-aware NeoPixel bus does.

use log::warn;
use smart_leds::{SmartLedsWrite, brightness};

use crate::PixelBus;
use crate::color::{BLACK, Rgb};
use crate::topology::PIXEL_COUNT;

/// Buffered pixel bus for a `SmartLedsWrite` driver.
pub struct SmartLedsBus<W> {
    writer: W,
    frame: [Rgb; PIXEL_COUNT],
    brightness: u8,
}

impl<W> SmartLedsBus<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            frame: [BLACK; PIXEL_COUNT],
            brightness: u8::MAX,
        }
    }

    /// Buffered color of a pixel.
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.frame.get(index).copied()
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> PixelBus for SmartLedsBus<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.frame.get_mut(index) {
            *pixel = color;
        }
    }

    fn set_brightness(&mut self, value: u8) {
        self.brightness = value;
    }

    fn flush(&mut self) {
        let colors = brightness(self.frame.iter().copied(), self.brightness);
        if self.writer.write(colors).is_err() {
            warn!("[SmartLedsBus.flush] strip write failed");
        }
    }
}
