//! Page transposition for the ST7565 display RAM
//!
//! The controller RAM is 8 pages x 128 columns. Each column byte is a vertical
//! strip of 8 pixels, bit 0 on top. The [`PixelBuffer`] stores horizontal runs
//! instead, so every page is rebuilt bit by bit before it is sent.
//!
//! Panels are mounted in any of four ways; [`Orientation`] mirrors rows, columns
//! or both while encoding, the source buffer is never touched.

use crate::buffer::{PixelBuffer, HEIGHT, WIDTH};

/// Number of 8-pixel pages in display RAM
pub const PAGES: usize = HEIGHT / 8;

/// Column bytes per page
pub const COLUMNS: usize = WIDTH;

/// One encoded page, ready to burst
pub type PageRow = [u8; COLUMNS];

/// Mounting of the panel relative to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Buffer row 0 on page 0, column 0 on the left
    #[default]
    Identity,
    /// Rows flipped: buffer row 0 lands on the bottom line
    RowMirror,
    /// Columns flipped: buffer column 0 lands on RAM column 127
    ColumnMirror,
    /// Both axes flipped, a 180 degree rotation
    BothMirror,
}

impl Orientation {
    /// All four mounting modes
    pub const ALL: [Orientation; 4] = [
        Orientation::Identity,
        Orientation::RowMirror,
        Orientation::ColumnMirror,
        Orientation::BothMirror,
    ];

    /// Whether buffer rows are flipped top to bottom
    pub const fn mirrors_rows(self) -> bool {
        matches!(self, Orientation::RowMirror | Orientation::BothMirror)
    }

    /// Whether buffer columns are flipped left to right
    pub const fn mirrors_columns(self) -> bool {
        matches!(self, Orientation::ColumnMirror | Orientation::BothMirror)
    }

    /// Map a position between buffer and display RAM coordinates.
    ///
    /// Every mode is its own inverse, so the same mapping serves both
    /// directions. `x` and `y` must lie on the panel.
    pub const fn map(self, x: usize, y: usize) -> (usize, usize) {
        let x = if self.mirrors_columns() {
            WIDTH - 1 - x
        } else {
            x
        };
        let y = if self.mirrors_rows() {
            HEIGHT - 1 - y
        } else {
            y
        };
        (x, y)
    }
}

/// Fill `row` with page `page` of `buffer` as seen through `orientation`.
///
/// Bit `s` of `row[c]` is the pixel at RAM line `page * 8 + s`, RAM column `c`.
/// The row is zeroed first; a page past the last one encodes as all off.
pub fn encode_page(buffer: &PixelBuffer, page: usize, orientation: Orientation, row: &mut PageRow) {
    row.fill(0);
    if page >= PAGES {
        return;
    }
    for strip in 0..8 {
        for (column, out) in row.iter_mut().enumerate() {
            let (x, y) = orientation.map(column, page * 8 + strip);
            if buffer.pixel(x, y) == Some(true) {
                *out |= 1 << strip;
            }
        }
    }
}
