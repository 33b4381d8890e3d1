pub struct Cmd;
impl Cmd {
    // Fundamental
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;

    // Addressing
    pub const MEMORY_MODE: u8 = 0x20;
    pub const COLUMN_ADDR: u8 = 0x21;
    pub const PAGE_ADDR: u8 = 0x22;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_START: u8 = 0xB0;

    // Hardware configuration
    pub const SET_START_LINE: u8 = 0x40;
    pub const SEG_REMAP: u8 = 0xA1;
    pub const SET_MULTIPLEX: u8 = 0xA8;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;

    // Timing and driving
    pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const CHARGE_PUMP: u8 = 0x8D;
}

/// Horizontal addressing: the column pointer wraps into the next page, so one
/// 1024 byte burst fills all 8 pages and leaves the pointer back at the origin.
const MEMORY_MODE_HORIZONTAL: u8 = 0x00;

/// Power-up sequence for a 128x64 panel with internal charge pump, sent as one burst.
pub(crate) const INIT_SEQUENCE: [u8; 33] = [
    Cmd::DISPLAY_OFF,
    Cmd::MEMORY_MODE,
    MEMORY_MODE_HORIZONTAL,
    Cmd::COLUMN_ADDR,
    0x00,
    0x7F,
    Cmd::PAGE_ADDR,
    0x00,
    0x07,
    Cmd::COM_SCAN_DEC,
    Cmd::SET_LOW_COLUMN,
    Cmd::SET_HIGH_COLUMN,
    Cmd::SET_START_LINE,
    Cmd::SET_CONTRAST,
    0xFF,
    Cmd::SEG_REMAP,
    Cmd::NORMAL_DISPLAY,
    Cmd::SET_MULTIPLEX,
    0x3F, // 64 lines
    Cmd::DISPLAY_ALL_ON_RESUME,
    Cmd::SET_DISPLAY_OFFSET,
    0x00,
    Cmd::SET_DISPLAY_CLOCK_DIV,
    0xF0,
    Cmd::SET_PRECHARGE,
    0x22,
    Cmd::SET_COM_PINS,
    0x12,
    Cmd::SET_VCOM_DETECT,
    0x20,
    Cmd::CHARGE_PUMP,
    0x14, // enable
    Cmd::DISPLAY_ON,
];

/// Three command bytes moving the RAM pointer to column `x`, page `y`
pub(crate) const fn address_command(x: u8, y: u8) -> [u8; 3] {
    [
        Cmd::SET_LOW_COLUMN | (x & 0x0F),
        Cmd::SET_HIGH_COLUMN | ((x & 0xF0) >> 4),
        Cmd::SET_PAGE_START | (y & 0x07),
    ]
}
