pub struct Cmd;
impl Cmd {
    // Display
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_DISP_START_LINE: u8 = 0x40;
    pub const SET_ALLPTS_NORMAL: u8 = 0xA4;

    // Addressing, low bits carry the page / column nibble
    pub const SET_PAGE: u8 = 0xB0;
    pub const SET_COLUMN_UPPER: u8 = 0x10;

    // Scan direction
    pub const SET_ADC_REVERSE: u8 = 0xA1;
    pub const SET_COM_NORMAL: u8 = 0xC0;

    // Power, low bits select VC / VR / VF and the resistor ratio
    pub const SET_BIAS_9: u8 = 0xA2;
    pub const SET_POWER_CONTROL: u8 = 0x28;
    pub const SET_RESISTOR_RATIO: u8 = 0x20;
    pub const SET_VOLUME_FIRST: u8 = 0x81;
    pub const SET_VOLUME_SECOND: u8 = 0x00;
}

/// Power control bits
pub(crate) const POWER_VOLTAGE_CONVERTER: u8 = 0x4;
pub(crate) const POWER_VOLTAGE_REGULATOR: u8 = 0x2;
pub(crate) const POWER_VOLTAGE_FOLLOWER: u8 = 0x1;

/// Regulator resistor ratio used for the operating voltage
pub(crate) const RESISTOR_RATIO: u8 = 0x6;

/// Contrast is a 6-bit electronic volume value
pub(crate) const VOLUME_MASK: u8 = 0x3F;
