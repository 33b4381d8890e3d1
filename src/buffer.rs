//! Shared 1 bit per pixel frame buffer
//!
//! Pixel `(x, y)` lives in byte `y * BYTES_PER_ROW + x / 8`, bit `x % 8`
//! (least significant bit is the leftmost pixel). Application code may read and
//! write [`PixelBuffer::bytes_mut`] directly, so this layout is part of the
//! public contract.

use display_interface::DisplayError;

/// Display width, pixels horizontally
pub const WIDTH: usize = 128;

/// Display height, pixels vertically
pub const HEIGHT: usize = 64;

/// Bytes making up one pixel row
pub const BYTES_PER_ROW: usize = WIDTH / 8;

/// Total buffer size in bytes
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT / 8;

/// Fixed-size monochrome image, `WIDTH * HEIGHT` bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelBuffer {
    /// Create an all-off buffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_SIZE],
        }
    }

    /// Wrap an image that is already in the packed layout
    pub const fn from_bytes(bytes: [u8; BUFFER_SIZE]) -> Self {
        Self { bytes }
    }

    /// Raw packed bytes
    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// Raw packed bytes, mutable
    pub fn bytes_mut(&mut self) -> &mut [u8; BUFFER_SIZE] {
        &mut self.bytes
    }

    /// State of bit `index` in `[0, WIDTH * HEIGHT)`, `None` past the end.
    pub fn bit(&self, index: usize) -> Option<bool> {
        self.bytes
            .get(index / 8)
            .map(|byte| (byte >> (index % 8)) & 1 == 1)
    }

    /// State of the pixel at `(x, y)`, `None` outside the panel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        self.bit(y * WIDTH + x)
    }

    /// Turn the pixel at `(x, y)` on or off
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> Result<(), DisplayError> {
        if x >= WIDTH || y >= HEIGHT {
            return Err(DisplayError::OutOfBoundsError);
        }
        let mask = 1 << (x % 8);
        let byte = self
            .bytes
            .get_mut(y * BYTES_PER_ROW + x / 8)
            .ok_or(DisplayError::OutOfBoundsError)?;
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
        Ok(())
    }

    /// Set every pixel to the same state
    pub fn fill(&mut self, on: bool) {
        self.bytes.fill(if on { 0xFF } else { 0x00 });
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.fill(false);
    }

    /// True when no pixel is on
    pub fn is_blank(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}
