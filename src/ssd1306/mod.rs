//! SSD1306 OLED Driver
//!
//! The controller runs in horizontal addressing mode, so one address command
//! followed by one 1024 byte burst fills the whole display RAM. The
//! [`PixelBuffer`] bytes are streamed unmodified; no re-encoding takes place.
//!
//! ### Transfers
//! - `reset()` - pulse RST, send the init table as one burst, then `update()`
//! - `update()` - address (0, 0) and burst the buffer, refused before `reset()`
//! - `clear()` - zero the buffer only, nothing sent; call `update()` to show it

use core::borrow::BorrowMut;

use display_interface::DisplayError;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use crate::buffer::PixelBuffer;
use crate::driver::{Device, DisplayDriver, Error};
use crate::interface::DisplayInterface;

mod cmd;

use cmd::{address_command, Cmd, INIT_SEQUENCE};

/// Settle time on each side of the reset pulse
const RESET_DELAY_MS: u32 = 10;

/// SSD1306 Display Driver
///
/// ## Type Parameters
///
/// - `M` - raw mutex flavour of the device lock, held across reset delays and
///   frame bursts (see [`crate::driver`] before picking `CriticalSectionRawMutex`)
/// - `SPI` - SPI bus for communication
/// - `CS` - chip select output pin
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for timing
/// - `B` - the frame buffer, owned or borrowed
pub struct Ssd1306<M, SPI, CS, DC, RST, DELAY, B = PixelBuffer> {
    device: Device<M, DisplayInterface<SPI, CS, DC, RST, DELAY>, B>,
}

impl<M, SPI, CS, DC, RST, DELAY, B> Ssd1306<M, SPI, CS, DC, RST, DELAY, B>
where
    M: RawMutex,
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
    B: BorrowMut<PixelBuffer>,
{
    /// Create the driver. The panel is left untouched until `reset()`.
    pub fn new(interface: DisplayInterface<SPI, CS, DC, RST, DELAY>, buffer: B) -> Self {
        Ssd1306 {
            device: Device::new(interface, buffer),
        }
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

    /// Move the RAM pointer to column `x`, page `y`.
    ///
    /// Does not lock and does not select: only valid inside a locked section
    /// with the display already selected.
    pub(crate) fn set_address(
        interface: &mut DisplayInterface<SPI, CS, DC, RST, DELAY>,
        x: u8,
        y: u8,
    ) -> Result<(), DisplayError> {
        interface.command_mode()?;
        interface.write(&address_command(x, y))
    }
}

impl<M, SPI, CS, DC, RST, DELAY, B> DisplayDriver for Ssd1306<M, SPI, CS, DC, RST, DELAY, B>
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
        log::info!("Initializing SSD1306");

        self.device
            .transaction(|interface, _| {
                // Commands follow, display not selected while it boots
                interface.command_mode()?;
                interface.deselect()?;
                interface.hard_reset(RESET_DELAY_MS)?;

                interface.selected(|iface| iface.write(&INIT_SEQUENCE))
            })
            .inspect_err(|e| log::error!("SSD1306 init sequence failed: {:?}", e))?;

        self.device.mark_ready();
        log::info!("SSD1306 ready");
        self.update()
    }

    fn update(&self) -> Result<(), Error> {
        self.device.ensure_ready()?;

        self.device
            .transaction(|interface, buffer| {
                interface.selected(|iface| {
                    Self::set_address(iface, 0, 0)?;
                    iface.data_mode()?;
                    iface.write(buffer.bytes())
                })
            })
            .inspect(|_| log::debug!("SSD1306 frame sent"))
            .inspect_err(|e| log::error!("SSD1306 frame transfer failed: {:?}", e))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        self.device.transaction(|_, buffer| buffer.clear());
        Ok(())
    }

    fn on(&self) -> Result<(), Error> {
        self.device
            .transaction(|interface, _| interface.command(Cmd::DISPLAY_ON))?;
        Ok(())
    }

    fn off(&self) -> Result<(), Error> {
        self.device
            .transaction(|interface, _| interface.command(Cmd::DISPLAY_OFF))?;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.device.is_ready()
    }
}
