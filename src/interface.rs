//! Display interface using an SPI bus with manually driven select line
use display_interface::DisplayError;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

/// Largest single write used when sending one byte value many times
const REPEAT_CHUNK_SIZE: usize = 32;

/// Bus and control lines of one display.
///
/// The SPI bus is shared with other devices, so chip-select is toggled here
/// rather than by an `SpiDevice`. None of the methods take the device lock:
/// they are only reachable through a driver, which calls them while holding it.
pub struct DisplayInterface<SPI, CS, DC, RST, DELAY> {
    /// SPI bus
    spi: SPI,
    /// Chip select, low while the display is addressed
    cs: CS,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting, active low
    rst: RST,
    /// Delay provider for reset sequencing
    delay: DELAY,
}

impl<SPI, CS, DC, RST, DELAY> DisplayInterface<SPI, CS, DC, RST, DELAY> {
    /// Bundle the bus, pins and delay of one display
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, delay: DELAY) -> Self {
        DisplayInterface {
            spi,
            cs,
            dc,
            rst,
            delay,
        }
    }

    /// Give back the bus, pins and delay
    pub fn release(self) -> (SPI, CS, DC, RST, DELAY) {
        (self.spi, self.cs, self.dc, self.rst, self.delay)
    }
}

impl<SPI, CS, DC, RST, DELAY> DisplayInterface<SPI, CS, DC, RST, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Pulse the reset line low, waiting `settle_ms` on each side of the rising edge
    pub(crate) fn hard_reset(&mut self, settle_ms: u32) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(settle_ms);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(settle_ms);
        Ok(())
    }

    pub(crate) fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Release the display from the shared bus
    pub(crate) fn deselect(&mut self) -> Result<(), DisplayError> {
        self.cs.set_high().map_err(|_| DisplayError::CSError)
    }

    /// Frame following bytes as commands
    pub(crate) fn command_mode(&mut self) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)
    }

    /// Frame following bytes as display RAM data
    pub(crate) fn data_mode(&mut self) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)
    }

    /// Run `f` with the display selected.
    ///
    /// The select line is released again whatever `f` returns; the first error
    /// wins.
    pub(crate) fn selected<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, DisplayError>,
    ) -> Result<T, DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::CSError)?;
        let result = f(self);
        let released = self.deselect();
        let value = result?;
        released?;
        Ok(value)
    }

    /// Burst `bytes` and wait until they have left the bus
    pub(crate) fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.spi
            .write(bytes)
            .map_err(|_| DisplayError::BusWriteError)?;
        self.spi.flush().map_err(|_| DisplayError::BusWriteError)
    }

    /// Send the same byte `count` times in one burst
    pub(crate) fn write_repeated(&mut self, val: u8, count: usize) -> Result<(), DisplayError> {
        let buffer = [val; REPEAT_CHUNK_SIZE];
        let mut remaining = count;
        while remaining > 0 {
            let len = remaining.min(REPEAT_CHUNK_SIZE);
            self.spi
                .write(&buffer[..len])
                .map_err(|_| DisplayError::BusWriteError)?;
            remaining -= len;
        }
        self.spi.flush().map_err(|_| DisplayError::BusWriteError)
    }

    /// Basic function for sending a single command byte in its own select cycle
    pub(crate) fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.command_mode()?;
        self.selected(|iface| iface.write(&[command]))
            .inspect_err(|e| log::error!("SPI write error for command 0x{:02X}: {:?}", command, e))
    }

    /// Basic function for sending data bytes in their own select cycle
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.data_mode()?;
        self.selected(|iface| iface.write(data))
    }
}
