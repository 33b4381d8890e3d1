//! ST7565 LCD Driver
//!
//! Display RAM is 8 pages of 128 vertical byte strips, so a frame goes out
//! page by page: select the page, rewind the column, then burst 128 bytes
//! produced by [`encoder::encode_page`] for the configured [`Orientation`].
//!
//! ### Transfers
//! - `reset()` - pulse RST, then the bias / scan / power-up command sequence
//! - `update()` - all 8 pages inside one lock acquisition
//! - `clear()` / `clear_display()` - zero the display RAM, buffer untouched
//! - `buf_clear()` - zero the buffer, nothing sent
//!
//! Multi-step sequences stop at the first failing transfer and return its
//! error; nothing is retried.

use core::borrow::BorrowMut;

use display_interface::DisplayError;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use crate::buffer::PixelBuffer;
use crate::driver::{Device, DisplayDriver, Error};
use crate::interface::DisplayInterface;

mod cmd;
pub mod encoder;

use cmd::{
    Cmd, POWER_VOLTAGE_CONVERTER, POWER_VOLTAGE_FOLLOWER, POWER_VOLTAGE_REGULATOR,
    RESISTOR_RATIO, VOLUME_MASK,
};
pub use encoder::Orientation;
use encoder::{encode_page, PageRow, COLUMNS, PAGES};

/// Settle time on each side of the reset pulse
const RESET_DELAY_MS: u32 = 5;

/// ST7565 Display Driver
///
/// ## Type Parameters
///
/// - `M` - raw mutex flavour of the device lock, held across reset delays and
///   frame bursts (see [`crate::driver`] before picking `CriticalSectionRawMutex`)
/// - `SPI` - SPI bus for communication
/// - `CS` - chip select output pin
/// - `DC` - Data/Command output pin, called A0 on this controller
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for timing
/// - `B` - the frame buffer, owned or borrowed
pub struct St7565<M, SPI, CS, DC, RST, DELAY, B = PixelBuffer> {
    device: Device<M, DisplayInterface<SPI, CS, DC, RST, DELAY>, B>,
    orientation: Orientation,
}

impl<M, SPI, CS, DC, RST, DELAY, B> St7565<M, SPI, CS, DC, RST, DELAY, B>
where
    M: RawMutex,
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
    B: BorrowMut<PixelBuffer>,
{
    /// Create the driver for a panel mounted as `orientation`.
    /// The panel is left untouched until `reset()`.
    pub fn new(
        interface: DisplayInterface<SPI, CS, DC, RST, DELAY>,
        buffer: B,
        orientation: Orientation,
    ) -> Self {
        St7565 {
            device: Device::new(interface, buffer),
            orientation,
        }
    }

    /// Mounting mode fixed at construction
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Access the frame buffer under the device lock.
    ///
    /// `f` must not call back into this driver.
    pub fn with_buffer<R>(&self, f: impl FnOnce(&mut PixelBuffer) -> R) -> R {
        self.device.transaction(|_, buffer| f(buffer))
    }

    /// Give back the interface and the buffer
    pub fn release(self) -> (DisplayInterface<SPI, CS, DC, RST, DELAY>, B) {
        self.device.release()
    }

    /// Send one command byte
    pub fn command(&self, command: u8) -> Result<(), Error> {
        self.device
            .transaction(|interface, _| interface.command(command))?;
        Ok(())
    }

    /// Send one display RAM data byte
    pub fn data(&self, data: u8) -> Result<(), Error> {
        self.device
            .transaction(|interface, _| interface.data(&[data]))?;
        Ok(())
    }

    /// Set the electronic volume, only the low 6 bits of `value` are used
    pub fn set_contrast(&self, value: u8) -> Result<(), Error> {
        self.device.transaction(|interface, _| {
            interface.command(Cmd::SET_VOLUME_FIRST)?;
            interface.command(Cmd::SET_VOLUME_SECOND | (value & VOLUME_MASK))
        })?;
        Ok(())
    }

    /// Zero the whole display RAM. The buffer is not touched.
    pub fn clear_display(&self) -> Result<(), Error> {
        self.device
            .transaction(|interface, _| {
                for page in 0..PAGES {
                    Self::set_page(interface, page)?;
                    interface.data_mode()?;
                    interface.selected(|iface| iface.write_repeated(0x00, COLUMNS))?;
                }
                Ok::<(), DisplayError>(())
            })
            .inspect_err(|e| log::error!("ST7565 display clear failed: {:?}", e))?;
        Ok(())
    }

    /// Zero the buffer under the device lock. Nothing is sent.
    pub fn buf_clear(&self) {
        self.device.transaction(|_, buffer| buffer.clear());
    }

    /// Point the RAM at column 0 of `page`
    fn set_page(
        interface: &mut DisplayInterface<SPI, CS, DC, RST, DELAY>,
        page: usize,
    ) -> Result<(), DisplayError> {
        interface.command(Cmd::SET_PAGE | (page as u8 & 0x0F))?;
        interface.command(Cmd::SET_COLUMN_UPPER)
    }

    /// Fixed power-up sequence, stops at the first failing command
    fn init_sequence(
        interface: &mut DisplayInterface<SPI, CS, DC, RST, DELAY>,
    ) -> Result<(), DisplayError> {
        // LCD bias select
        interface.command(Cmd::SET_BIAS_9)?;
        // ADC select
        interface.command(Cmd::SET_ADC_REVERSE)?;
        // SHL select
        interface.command(Cmd::SET_COM_NORMAL)?;
        // Initial display line
        interface.command(Cmd::SET_DISP_START_LINE)?;

        // Voltage converter, then regulator, then follower
        interface.command(Cmd::SET_POWER_CONTROL | POWER_VOLTAGE_CONVERTER)?;
        interface.delay_ms(5);
        interface.command(
            Cmd::SET_POWER_CONTROL | POWER_VOLTAGE_CONVERTER | POWER_VOLTAGE_REGULATOR,
        )?;
        interface.delay_ms(5);
        interface.command(
            Cmd::SET_POWER_CONTROL
                | POWER_VOLTAGE_CONVERTER
                | POWER_VOLTAGE_REGULATOR
                | POWER_VOLTAGE_FOLLOWER,
        )?;
        interface.delay_ms(1);

        // Operating voltage
        interface.command(Cmd::SET_RESISTOR_RATIO | RESISTOR_RATIO)?;
        interface.command(Cmd::SET_ALLPTS_NORMAL)
    }
}

impl<M, SPI, CS, DC, RST, DELAY, B> DisplayDriver for St7565<M, SPI, CS, DC, RST, DELAY, B>
where
    M: RawMutex,
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
    B: BorrowMut<PixelBuffer>,
{
    fn reset(&self) -> Result<(), Error> {
        log::info!("Initializing ST7565");

        self.device
            .transaction(|interface, _| {
                interface.deselect()?;
                interface.hard_reset(RESET_DELAY_MS)?;
                Self::init_sequence(interface)
            })
            .inspect_err(|e| log::error!("ST7565 init sequence failed: {:?}", e))?;

        self.device.mark_ready();
        log::info!("ST7565 ready");
        Ok(())
    }

    fn update(&self) -> Result<(), Error> {
        self.device.ensure_ready()?;

        let orientation = self.orientation;
        self.device
            .transaction(|interface, buffer| {
                let mut row: PageRow = [0; COLUMNS];
                for page in 0..PAGES {
                    Self::set_page(interface, page)?;
                    interface.data_mode()?;
                    interface.selected(|iface| {
                        encode_page(buffer, page, orientation, &mut row);
                        iface.write(&row)
                    })?;
                    log::debug!("ST7565 page {} sent", page);
                }
                Ok::<(), DisplayError>(())
            })
            .inspect_err(|e| log::error!("ST7565 frame transfer failed: {:?}", e))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        self.clear_display()
    }

    fn on(&self) -> Result<(), Error> {
        self.command(Cmd::DISPLAY_ON)
    }

    fn off(&self) -> Result<(), Error> {
        self.command(Cmd::DISPLAY_OFF)
    }

    fn is_ready(&self) -> bool {
        self.device.is_ready()
    }
}
