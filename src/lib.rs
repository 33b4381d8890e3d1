//! Monochrome 128x64 LCD/OLED Display Drivers
//!
//! Drives dot-matrix panels built on two controller families over a shared SPI
//! bus with separate chip-select, data/command and reset lines:
//!
//! - [`ssd1306::Ssd1306`] - horizontal addressing mode, so one address command
//!   and one 1024 byte burst push a whole frame. The [`PixelBuffer`] bytes are
//!   streamed unmodified.
//! - [`st7565::St7565`] - 8 pages x 128 columns of vertical 8-pixel strips. Every
//!   page is transposed out of the [`PixelBuffer`] by [`st7565::encoder`] and
//!   sent separately, optionally mirrored (see [`st7565::Orientation`]).
//!
//! ### Usage
//! The driver owns the buffer and the bus. To display something you:
//!
//! 1. wrap the SPI bus, pins and delay into an [`interface::DisplayInterface`]
//! 1. create the driver with a [`PixelBuffer`] (owned or `&'static mut`)
//! 1. call [`DisplayDriver::reset`] once
//! 1. draw into the buffer through `with_buffer`
//! 1. push it with [`DisplayDriver::update`]
//!
//! Each driver holds one [`embassy_sync::blocking_mutex::Mutex`]. Every
//! operation that touches the bus or the buffer runs inside a single
//! acquisition of it, so a page update from one thread never interleaves with
//! a command from another.
//!
#![no_std]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod buffer;
pub mod driver;
pub mod interface;
pub mod ssd1306;
pub mod st7565;

pub use buffer::{PixelBuffer, BUFFER_SIZE, HEIGHT, WIDTH};
pub use display_interface::DisplayError;
pub use driver::{DisplayDriver, Error};
pub use interface::DisplayInterface;
pub use ssd1306::Ssd1306;
pub use st7565::{Orientation, St7565};
