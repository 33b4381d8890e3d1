//! Driver capability set shared by both controller families
//!
//! ## Architecture
//!
//! Both [`crate::Ssd1306`] and [`crate::St7565`] wrap a [`Device`]: the
//! [`DisplayInterface`](crate::DisplayInterface) and the [`PixelBuffer`] behind
//! one blocking mutex, plus a ready flag. The family drivers only add the
//! command tables and the transfer strategy.
//!
//! ### Locking
//!
//! [`Device::transaction`] is the only way into the guarded state. The lock is
//! taken for the closure and released when it returns, so an early `?` inside
//! a multi-step sequence can never leave the device locked.
//!
//! ### Choosing `M`
//!
//! The lock is held for whole sequences, including the reset pulse delays
//! (at least 20 ms) and full frame bursts. With `CriticalSectionRawMutex` on
//! a single core target that means interrupts stay masked for that long, which
//! stalls delay or SPI implementations driven by interrupts. Use
//! `NoopRawMutex` when the driver lives in one execution context, or a
//! blocking HAL with `CriticalSectionRawMutex` when it is shared.
//!
//! ### State machine
//!
//! `Uninitialized -> (reset success) -> Ready`. There is no way back; a failed
//! reset leaves the device uninitialized and `update()` refuses to run.

use core::borrow::BorrowMut;
use core::cell::RefCell;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use display_interface::DisplayError;
use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

use crate::buffer::PixelBuffer;

/// Failure of a driver operation
#[derive(Debug, Clone)]
pub enum Error {
    /// The operation needs a successful `reset()` first
    NotInitialized,
    /// A bus transfer or control line failed
    Bus(DisplayError),
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Bus(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotInitialized => f.write_str("display not initialized"),
            Error::Bus(e) => write!(f, "display bus error: {:?}", e),
        }
    }
}

/// Operations every supported controller provides.
///
/// All methods take `&self`; exclusivity comes from the per-device lock, so a
/// driver may be shared between threads when its raw mutex allows it.
pub trait DisplayDriver {
    /// Hardware reset followed by the controller's init sequence
    fn reset(&self) -> Result<(), Error>;

    /// Push the whole [`PixelBuffer`] to the panel
    fn update(&self) -> Result<(), Error>;

    /// Blank the image.
    ///
    /// Linear controllers zero the buffer and send nothing, the next `update()`
    /// shows it. Paged controllers zero the display RAM directly and leave the
    /// buffer alone.
    fn clear(&self) -> Result<(), Error>;

    /// Switch the panel output on
    fn on(&self) -> Result<(), Error>;

    /// Switch the panel output off, display RAM is kept
    fn off(&self) -> Result<(), Error>;

    /// Whether `reset()` has completed successfully
    fn is_ready(&self) -> bool;
}

struct State<I, B> {
    interface: I,
    buffer: B,
}

/// Lock-guarded interface and buffer of one display
pub(crate) struct Device<M, I, B> {
    state: Mutex<M, RefCell<State<I, B>>>,
    ready: AtomicBool,
}

impl<M, I, B> Device<M, I, B>
where
    M: RawMutex,
    B: BorrowMut<PixelBuffer>,
{
    pub(crate) fn new(interface: I, buffer: B) -> Self {
        Device {
            state: Mutex::new(RefCell::new(State { interface, buffer })),
            ready: AtomicBool::new(false),
        }
    }

    /// Run `f` with exclusive access to the interface and the buffer.
    ///
    /// `f` must not call back into the same device.
    pub(crate) fn transaction<T>(&self, f: impl FnOnce(&mut I, &mut PixelBuffer) -> T) -> T {
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            let State { interface, buffer } = &mut *state;
            f(interface, BorrowMut::<PixelBuffer>::borrow_mut(buffer))
        })
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub(crate) fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail fast, without locking, when no reset has succeeded yet
    pub(crate) fn ensure_ready(&self) -> Result<(), Error> {
        if self.is_ready() {
            Ok(())
        } else {
            log::error!("Display used before a successful reset");
            Err(Error::NotInitialized)
        }
    }

    pub(crate) fn release(self) -> (I, B) {
        let State { interface, buffer } = self.state.into_inner().into_inner();
        (interface, buffer)
    }
}
