//! SSD1306 transfer tests: exact line/bus sequences through embedded-hal-mock,
//! failure handling through a recording bus.

mod common;

use common::{NoopPin, RecordingBus};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex, RawMutex};
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use monolcd::{
    DisplayDriver, DisplayError, DisplayInterface, Error, PixelBuffer, Ssd1306, BUFFER_SIZE,
};

const INIT: [u8; 33] = [
    0xAE, 0x20, 0x00, 0x21, 0x00, 0x7F, 0x22, 0x00, 0x07, 0xC8, 0x00, 0x10, 0x40, 0x81, 0xFF,
    0xA1, 0xA6, 0xA8, 0x3F, 0xA4, 0xD3, 0x00, 0xD5, 0xF0, 0xD9, 0x22, 0xDA, 0x12, 0xDB, 0x20,
    0x8D, 0x14, 0xAF,
];

const ORIGIN: [u8; 3] = [0x00, 0x10, 0xB0];

type MockedSsd1306 = Ssd1306<NoopRawMutex, SpiMock<u8>, PinMock, PinMock, PinMock, NoopDelay>;

type RecordedSsd1306<M> = Ssd1306<M, RecordingBus, NoopPin, NoopPin, NoopPin, NoopDelay>;

fn spi_write(data: &[u8]) -> [SpiTransaction<u8>; 2] {
    [
        SpiTransaction::write_vec(data.to_vec()),
        SpiTransaction::flush(),
    ]
}

fn pins(transactions: &[PinTransaction]) -> PinMock {
    PinMock::new(transactions)
}

fn recorded<M: RawMutex>(bus: &RecordingBus) -> RecordedSsd1306<M> {
    let interface = DisplayInterface::new(bus.clone(), NoopPin, NoopPin, NoopPin, NoopDelay);
    Ssd1306::new(interface, PixelBuffer::new())
}

#[test]
fn reset_sends_init_table_then_first_frame() {
    let mut image = PixelBuffer::new();
    image.set_pixel(5, 3, true).unwrap();

    let spi_expectations: Vec<SpiTransaction<u8>> = [
        &spi_write(&INIT) as &[_],
        &spi_write(&ORIGIN),
        &spi_write(image.bytes()),
    ]
    .iter()
    .flat_map(|s| s.iter().cloned())
    .collect();

    let mut spi = SpiMock::new(&spi_expectations);
    let mut cs = pins(&[
        PinTransaction::set(PinState::High), // idle while resetting
        PinTransaction::set(PinState::Low),  // init burst
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low), // frame
        PinTransaction::set(PinState::High),
    ]);
    let mut dc = pins(&[
        PinTransaction::set(PinState::Low),  // init is all commands
        PinTransaction::set(PinState::Low),  // address
        PinTransaction::set(PinState::High), // frame data
    ]);
    let mut rst = pins(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);

    let interface = DisplayInterface::new(
        spi.clone(),
        cs.clone(),
        dc.clone(),
        rst.clone(),
        NoopDelay,
    );
    let driver: MockedSsd1306 = Ssd1306::new(interface, image);

    assert!(!driver.is_ready());
    driver.reset().expect("reset must succeed");
    assert!(driver.is_ready());

    spi.done();
    cs.done();
    dc.done();
    rst.done();
}

#[test]
fn update_before_reset_is_refused_without_bus_traffic() {
    let mut spi = SpiMock::new(&[]);
    let mut cs = pins(&[]);
    let mut dc = pins(&[]);
    let mut rst = pins(&[]);

    let interface = DisplayInterface::new(
        spi.clone(),
        cs.clone(),
        dc.clone(),
        rst.clone(),
        NoopDelay,
    );
    let driver: MockedSsd1306 = Ssd1306::new(interface, PixelBuffer::new());

    assert!(matches!(driver.update(), Err(Error::NotInitialized)));

    spi.done();
    cs.done();
    dc.done();
    rst.done();
}

#[test]
fn failed_init_burst_leaves_driver_uninitialized() {
    let bus = RecordingBus::failing_at(0);
    let driver = recorded::<NoopRawMutex>(&bus);

    assert!(matches!(
        driver.reset(),
        Err(Error::Bus(DisplayError::BusWriteError))
    ));
    assert!(!driver.is_ready());

    // Still refused, and still nothing sent
    assert!(matches!(driver.update(), Err(Error::NotInitialized)));
    assert!(bus.writes().is_empty());
    assert_eq!(bus.attempts(), 1);
}

#[test]
fn address_failure_skips_frame_burst() {
    // 0: init, 1: address
    let bus = RecordingBus::failing_at(1);
    let driver = recorded::<NoopRawMutex>(&bus);

    assert!(matches!(
        driver.reset(),
        Err(Error::Bus(DisplayError::BusWriteError))
    ));
    // Init went through, so the device counts as initialized
    assert!(driver.is_ready());
    assert_eq!(bus.writes(), vec![INIT.to_vec()]);
    assert_eq!(bus.attempts(), 2);
}

#[test]
fn update_streams_buffer_verbatim() -> anyhow::Result<()> {
    let bus = RecordingBus::new();
    let driver = recorded::<NoopRawMutex>(&bus);
    driver.reset().map_err(|e| anyhow::anyhow!("{}", e))?;

    let mut expected = [0u8; BUFFER_SIZE];
    for (i, byte) in expected.iter_mut().enumerate() {
        *byte = (i * 7) as u8;
    }
    driver.with_buffer(|buffer| buffer.bytes_mut().copy_from_slice(&expected));
    driver.update().map_err(|e| anyhow::anyhow!("{}", e))?;

    let writes = bus.writes();
    // init, first frame, then this frame
    assert_eq!(writes.len(), 5);
    assert_eq!(writes[3], ORIGIN.to_vec());
    assert_eq!(writes[4], expected.to_vec());
    Ok(())
}

#[test]
fn clear_touches_only_the_buffer() {
    let bus = RecordingBus::new();
    let driver = recorded::<NoopRawMutex>(&bus);
    driver.with_buffer(|buffer| buffer.fill(true));

    driver.clear().expect("buffer clear cannot fail");
    assert!(driver.with_buffer(|buffer| buffer.is_blank()));
    driver.clear().expect("buffer clear cannot fail");
    assert!(driver.with_buffer(|buffer| buffer.is_blank()));

    assert_eq!(bus.attempts(), 0);
}

#[test]
fn on_off_send_single_commands() -> anyhow::Result<()> {
    let bus = RecordingBus::new();
    let driver = recorded::<NoopRawMutex>(&bus);

    driver.off().map_err(|e| anyhow::anyhow!("{}", e))?;
    driver.on().map_err(|e| anyhow::anyhow!("{}", e))?;

    assert_eq!(bus.writes(), vec![vec![0xAE], vec![0xAF]]);
    Ok(())
}

#[test]
fn failed_frame_burst_releases_the_lock() {
    // 0: init, 1: address, 2: frame
    let bus = RecordingBus::failing_at(2);
    let driver = recorded::<CriticalSectionRawMutex>(&bus);

    assert!(matches!(
        driver.reset(),
        Err(Error::Bus(DisplayError::BusWriteError))
    ));

    std::thread::scope(|s| {
        s.spawn(|| {
            driver.clear().expect("buffer clear cannot fail");
            driver.update().expect("lock must be free after a failed burst");
        });
    });

    let writes = bus.writes();
    assert_eq!(writes.len(), 4);
    assert_eq!(writes[3], vec![0u8; BUFFER_SIZE]);
}

#[test]
fn release_returns_buffer() {
    let bus = RecordingBus::new();
    let driver = recorded::<NoopRawMutex>(&bus);
    driver.with_buffer(|buffer| buffer.set_pixel(1, 1, true)).unwrap();

    let (_interface, buffer) = driver.release();
    assert_eq!(buffer.pixel(1, 1), Some(true));
}
