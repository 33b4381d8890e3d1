//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::spi::{ErrorKind, ErrorType as SpiErrorType, SpiBus};

#[derive(Default)]
struct BusLog {
    writes: Vec<Vec<u8>>,
    attempts: usize,
    fail_at: Option<usize>,
}

/// SPI bus that records every write and can fail one chosen write attempt.
///
/// Clones share the same log, so a test keeps one handle and gives the other
/// to the driver.
#[derive(Clone, Default)]
pub struct RecordingBus {
    log: Arc<Mutex<BusLog>>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail write attempt number `attempt` (counting from 0)
    pub fn failing_at(attempt: usize) -> Self {
        let bus = Self::default();
        bus.log.lock().unwrap().fail_at = Some(attempt);
        bus
    }

    /// Successful writes so far
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.log.lock().unwrap().writes.clone()
    }

    pub fn attempts(&self) -> usize {
        self.log.lock().unwrap().attempts
    }
}

impl SpiErrorType for RecordingBus {
    type Error = ErrorKind;
}

impl SpiBus for RecordingBus {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut log = self.log.lock().unwrap();
        let attempt = log.attempts;
        log.attempts += 1;
        if log.fail_at == Some(attempt) {
            return Err(ErrorKind::Other);
        }
        log.writes.push(words.to_vec());
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let copy = words.to_vec();
        self.write(&copy)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Output pin that accepts everything
pub struct NoopPin;

impl PinErrorType for NoopPin {
    type Error = Infallible;
}

impl OutputPin for NoopPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
