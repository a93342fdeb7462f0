//! French clock face
//!
//! Turns a wall-clock time into the set of lit LEDs. The face reads:
//!
//! ```text
//! ILbESTjDEUX
//! QUATRETROIS
//! NEUFUNESEPT
//! HUITSIXCINQ
//! MIDIXMINUIT
//! ONZEwHEURES
//! MOINSyLEDIX
//! ETTROISDEMI
//! VINGT-CINQk
//! QUARTSPILE!
//! ```
//!
//! Minutes are shown rounded down to five; the remaining 0-4 minutes are
//! shown on the corner indicators.

use heapless::Vec;
use log::{debug, warn};

use crate::topology::{Corner, PIXEL_COUNT, PixelIndex, SensorPosition, TopologyMapper};

/// Horizontal run of letters on a single line of the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSegment {
    pub x: u16,
    pub y: u16,
    pub length: u16,
}

impl WordSegment {
    pub const fn new(x: u16, y: u16, length: u16) -> Self {
        Self { x, y, length }
    }

    /// Strip indices covered by the segment
    pub fn pixels(
        self,
        mapper: &TopologyMapper,
        position: SensorPosition,
    ) -> impl Iterator<Item = PixelIndex> + '_ {
        (self.x..self.x + self.length).map(move |x| mapper.map(x, self.y, position))
    }
}

/// Every word the clock lights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    Il,
    Est,
    Une,
    Deux,
    Trois,
    Quatre,
    Cinq,
    Six,
    Sept,
    Huit,
    Neuf,
    Dix,
    Onze,
    Heure,
    Heures,
    Midi,
    Minuit,
    Moins,
    Le,
    Et,
    MinuteDix,
    Quart,
    Vingt,
    VingtCinq,
    MinuteCinq,
    Demi,
}

impl Word {
    pub const fn segment(self) -> WordSegment {
        let (x, y, length) = match self {
            Self::Il => (0, 0, 2),
            Self::Est => (3, 0, 3),
            Self::Une => (4, 2, 3),
            Self::Deux => (7, 0, 4),
            Self::Trois => (6, 1, 5),
            Self::Quatre => (0, 1, 6),
            Self::Cinq => (7, 3, 4),
            Self::Six => (4, 3, 3),
            Self::Sept => (7, 2, 4),
            Self::Huit => (0, 3, 4),
            Self::Neuf => (0, 2, 4),
            Self::Dix => (2, 4, 3),
            Self::Onze => (0, 5, 4),
            Self::Heure => (5, 5, 5),
            Self::Heures => (5, 5, 6),
            Self::Midi => (0, 4, 4),
            Self::Minuit => (5, 4, 6),
            Self::Moins => (0, 6, 5),
            Self::Le => (6, 6, 2),
            Self::Et => (0, 7, 2),
            Self::MinuteDix => (8, 6, 3),
            Self::Quart => (0, 9, 5),
            Self::Vingt => (0, 8, 5),
            Self::VingtCinq => (0, 8, 10),
            Self::MinuteCinq => (6, 8, 4),
            Self::Demi => (7, 7, 4),
        };
        WordSegment::new(x, y, length)
    }
}

const PREFIX: [Word; 2] = [Word::Il, Word::Est];

/// Order in which leftover minutes light the corners
const CORNER_PRECEDENCE: [Corner; 4] = [
    Corner::TopRight,
    Corner::BottomRight,
    Corner::BottomLeft,
    Corner::TopLeft,
];

/// Words naming an hour of the day, suffix included
///
/// Returns `None` for anything outside `0..=23`.
pub const fn hour_phrase(hour: u8) -> Option<&'static [Word]> {
    if hour > 23 {
        return None;
    }
    let words: &'static [Word] = match hour {
        0 => &[Word::Minuit],
        12 => &[Word::Midi],
        1 | 13 => &[Word::Une, Word::Heure],
        _ => match hour % 12 {
            2 => &[Word::Deux, Word::Heures],
            3 => &[Word::Trois, Word::Heures],
            4 => &[Word::Quatre, Word::Heures],
            5 => &[Word::Cinq, Word::Heures],
            6 => &[Word::Six, Word::Heures],
            7 => &[Word::Sept, Word::Heures],
            8 => &[Word::Huit, Word::Heures],
            9 => &[Word::Neuf, Word::Heures],
            10 => &[Word::Dix, Word::Heures],
            _ => &[Word::Onze, Word::Heures],
        },
    };
    Some(words)
}

/// Words for a minute count already rounded down to five
///
/// Returns `None` when `minute` is not one of `0, 5, .., 55`.
pub const fn minute_phrase(minute: u8) -> Option<&'static [Word]> {
    let words: &'static [Word] = match minute {
        0 => &[],
        5 => &[Word::MinuteCinq],
        10 => &[Word::MinuteDix],
        15 => &[Word::Et, Word::Quart],
        20 => &[Word::Vingt],
        25 => &[Word::VingtCinq],
        30 => &[Word::Et, Word::Demi],
        35 => &[Word::Moins, Word::VingtCinq],
        40 => &[Word::Moins, Word::Vingt],
        45 => &[Word::Moins, Word::Le, Word::Quart],
        50 => &[Word::Moins, Word::MinuteDix],
        55 => &[Word::Moins, Word::MinuteCinq],
        _ => return None,
    };
    Some(words)
}

/// Lit / unlit target for every LED of the strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pixels: [bool; PIXEL_COUNT],
}

impl DisplayState {
    pub const fn new() -> Self {
        Self {
            pixels: [false; PIXEL_COUNT],
        }
    }

    pub fn is_lit(&self, index: PixelIndex) -> bool {
        self.pixels.get(index).copied().unwrap_or(false)
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|lit| **lit).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.pixels.iter().copied()
    }

    fn clear(&mut self) {
        self.pixels = [false; PIXEL_COUNT];
    }

    fn light(&mut self, index: PixelIndex) {
        self.pixels[index] = true;
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Problem found while compiling a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceDiagnostic {
    /// Hour (after the "to the next hour" shift) has no name on the face
    InvalidHour(u8),
    /// Rounded minute has no phrase on the face
    InvalidMinute(u8),
}

impl core::fmt::Display for FaceDiagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FaceDiagnostic::InvalidHour(hour) => write!(f, "invalid hour {hour}"),
            FaceDiagnostic::InvalidMinute(minute) => write!(f, "invalid minute {minute}"),
        }
    }
}

/// Compiles times into [`DisplayState`]s
///
/// Remembers the last compiled (hour, minute) so that polling it every frame
/// is cheap.
#[derive(Debug, Clone)]
pub struct WordClockCompiler {
    mapper: TopologyMapper,
    position: SensorPosition,
    last: Option<(u8, u8)>,
    state: DisplayState,
    diagnostics: Vec<FaceDiagnostic, 2>,
}

impl WordClockCompiler {
    pub const fn new(position: SensorPosition) -> Self {
        Self {
            mapper: TopologyMapper::new(),
            position,
            last: None,
            state: DisplayState::new(),
            diagnostics: Vec::new(),
        }
    }

    pub const fn sensor_position(&self) -> SensorPosition {
        self.position
    }

    /// Change the mounting orientation
    ///
    /// The next [`compile`](Self::compile) recomputes the state even if the
    /// time did not change.
    pub fn set_sensor_position(&mut self, position: SensorPosition) {
        if self.position != position {
            self.position = position;
            self.last = None;
        }
    }

    pub const fn mapper(&self) -> &TopologyMapper {
        &self.mapper
    }

    /// Last compiled state
    pub const fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Problems reported by the last pass that recomputed the state
    pub fn diagnostics(&self) -> &[FaceDiagnostic] {
        &self.diagnostics
    }

    /// Check whether every letter of `word` is lit
    pub fn shows(&self, word: Word) -> bool {
        word.segment()
            .pixels(&self.mapper, self.position)
            .all(|index| self.state.is_lit(index))
    }

    /// Check whether the indicator for `corner` is lit
    pub fn shows_corner(&self, corner: Corner) -> bool {
        self.state
            .is_lit(TopologyMapper::map_minute_corner(corner, self.position))
    }

    /// Compute the state for a time
    ///
    /// Returns `false` (and leaves the state untouched) when hour and minute
    /// match the previous call; seconds are not displayed.
    ///
    /// # Arguments
    /// * `hour` - 0-23
    /// * `minute` - 0-59, rounded down to five for the text
    /// * `_second` - Ignored
    pub fn compile(&mut self, hour: u8, minute: u8, _second: u8) -> (bool, &DisplayState) {
        if self.last == Some((hour, minute)) {
            return (false, &self.state);
        }
        self.last = Some((hour, minute));
        debug!("[WordClockCompiler.compile] update state for {hour}:{minute}");

        self.state.clear();
        self.diagnostics.clear();

        let leftover = minute % 5;
        let minute = minute - leftover;
        let hour = if minute >= 35 {
            // Shown as "next hour minus ..."
            next_hour(hour)
        } else {
            hour
        };

        self.light_words(&PREFIX);

        match hour_phrase(hour) {
            Some(words) => self.light_words(words),
            None => self.report(FaceDiagnostic::InvalidHour(hour)),
        }

        match minute_phrase(minute) {
            Some(words) => self.light_words(words),
            None => self.report(FaceDiagnostic::InvalidMinute(minute)),
        }

        for corner in &CORNER_PRECEDENCE[..usize::from(leftover)] {
            let index = TopologyMapper::map_minute_corner(*corner, self.position);
            self.state.light(index);
        }

        (true, &self.state)
    }

    fn light_words(&mut self, words: &[Word]) {
        for word in words {
            for index in word.segment().pixels(&self.mapper, self.position) {
                self.state.light(index);
            }
        }
    }

    fn report(&mut self, diagnostic: FaceDiagnostic) {
        warn!("[WordClockCompiler.compile] {diagnostic}");
        let _ = self.diagnostics.push(diagnostic);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
const fn next_hour(hour: u8) -> u8 {
    ((hour as u16 + 1) % 24) as u8
}

impl Default for WordClockCompiler {
    fn default() -> Self {
        Self::new(SensorPosition::default())
    }
}
