//! Grid to strip index mapping
//!
//! The face is an 11x10 matrix of letters wired as one serpentine strip,
//! preceded by four corner indicator LEDs. Which end of the strip is "up"
//! depends on where the ambient light sensor was mounted.

/// Number of LEDs along one line of letters (face x axis)
pub const MATRIX_ROWS: usize = 11;

/// Number of lines of letters (face y axis)
pub const MATRIX_COLUMNS: usize = 10;

/// Number of indicator LEDs wired before the matrix
pub const SIGNAL_OFFSET: usize = 4;

/// Total number of LEDs on the strip
pub const PIXEL_COUNT: usize = MATRIX_ROWS * MATRIX_COLUMNS + SIGNAL_OFFSET;

/// Linear index of a LED on the strip
pub type PixelIndex = usize;

const SENSOR_POSITION_TOP: u8 = 0;
const SENSOR_POSITION_BOTTOM: u8 = 1;

/// Mounting orientation of the ambient light sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SensorPosition {
    #[default]
    Top = SENSOR_POSITION_TOP,
    Bottom = SENSOR_POSITION_BOTTOM,
}

impl SensorPosition {
    /// Decode a persisted configuration byte
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            SENSOR_POSITION_TOP => Self::Top,
            SENSOR_POSITION_BOTTOM => Self::Bottom,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }
}

/// Logical corner of the face, as read by someone looking at the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Corner {
    TopRight = 0,
    BottomRight = 1,
    BottomLeft = 2,
    TopLeft = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
        Corner::TopLeft,
    ];
}

/// Column-major serpentine traversal, rotated by a quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    ColumnMajorAlternating90,
    ColumnMajorAlternating270,
}

/// A fixed-size matrix wired with a given layout
#[derive(Debug, Clone, Copy)]
pub struct Topology {
    width: u16,
    height: u16,
    layout: Layout,
}

impl Topology {
    pub const fn new(width: u16, height: u16, layout: Layout) -> Self {
        Self {
            width,
            height,
            layout,
        }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Map a matrix coordinate to its position along the matrix wiring
    ///
    /// Panics if the coordinate lies outside the matrix.
    pub fn map(&self, x: u16, y: u16) -> u16 {
        assert!(
            x < self.width && y < self.height,
            "coordinate ({x}, {y}) outside {}x{} matrix",
            self.width,
            self.height
        );
        match self.layout {
            // First LED at the top right, even lines run leftwards
            Layout::ColumnMajorAlternating90 => {
                let offset = if y & 1 == 0 { self.width - 1 - x } else { x };
                y * self.width + offset
            }
            // First LED at the bottom left, even lines run rightwards
            Layout::ColumnMajorAlternating270 => {
                let my = self.height - 1 - y;
                let offset = if my & 1 == 0 { x } else { self.width - 1 - x };
                my * self.width + offset
            }
        }
    }
}

/// Converts face coordinates into strip indices for both mounting options
///
/// Both topologies are built once; the sensor position selects one per call.
#[derive(Debug, Clone)]
pub struct TopologyMapper {
    sensor_on_top: Topology,
    sensor_on_bottom: Topology,
}

impl TopologyMapper {
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new() -> Self {
        Self {
            sensor_on_top: Topology::new(
                MATRIX_ROWS as u16,
                MATRIX_COLUMNS as u16,
                Layout::ColumnMajorAlternating90,
            ),
            sensor_on_bottom: Topology::new(
                MATRIX_ROWS as u16,
                MATRIX_COLUMNS as u16,
                Layout::ColumnMajorAlternating270,
            ),
        }
    }

    /// Topology used for a given sensor position
    pub const fn topology(&self, position: SensorPosition) -> &Topology {
        match position {
            SensorPosition::Top => &self.sensor_on_top,
            SensorPosition::Bottom => &self.sensor_on_bottom,
        }
    }

    /// Strip index of the letter at (x, y)
    pub fn map(&self, x: u16, y: u16, position: SensorPosition) -> PixelIndex {
        usize::from(self.topology(position).map(x, y)) + SIGNAL_OFFSET
    }

    /// Strip index of a corner indicator
    ///
    /// With the sensor at the bottom the whole face is turned upside down,
    /// so every corner lands on the diagonally opposite LED.
    pub const fn map_minute_corner(corner: Corner, position: SensorPosition) -> PixelIndex {
        let slot = corner as usize;
        match position {
            SensorPosition::Top => slot,
            SensorPosition::Bottom => (slot + 2) % SIGNAL_OFFSET,
        }
    }
}

impl Default for TopologyMapper {
    fn default() -> Self {
        Self::new()
    }
}
