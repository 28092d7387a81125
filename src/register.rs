//! BME280 register map, limited to what forced-mode operation touches.

/// Default I²C address (SDO tied to GND).
pub const DEFAULT_ADDRESS: u8 = 0x76; // 118
/// Alternative I²C address (SDO tied to VDDIO).
pub const SECONDARY_ADDRESS: u8 = 0x77; // 119

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// dig_T1 .. dig_P9, one reserved byte, dig_H1
    CalibTempPress = 0x88,
    /// dig_H2 .. dig_H6
    CalibHumidity = 0xE1,
    /// osrs_h[2:0]
    CtrlHum = 0xF2,
    /// osrs_t[7:5] | osrs_p[4:2] | mode[1:0]
    CtrlMeas = 0xF4,
    /// press_msb .. hum_lsb, read as one burst
    Data = 0xF7,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

pub const CALIB_TEMP_PRESS_LEN: usize = 26;
pub const CALIB_HUMIDITY_LEN: usize = 7;
pub const DATA_LEN: usize = 8;

/// Power mode bits of `CtrlMeas`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    Sleep = 0b00,
    /// one conversion, then back to sleep
    Forced = 0b01,
}

impl Mode {
    pub const fn bits(self) -> u8 {
        self as u8
    }
}
