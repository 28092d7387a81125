use crate::error::Error;
use crate::register::{Mode, DEFAULT_ADDRESS};

/// Hardware averaging factor shared by temperature, pressure and humidity.
///
/// The discriminant is the 3-bit `osrs_x` field value written to the
/// control registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Oversampling {
    X1 = 1,
    X2 = 2,
    X4 = 3,
    X8 = 4,
    X16 = 5,
}

impl Oversampling {
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// `CtrlMeas` value without mode bits: same factor for temperature and pressure.
    pub const fn ctrl_meas_baseline(self) -> u8 {
        (self.bits() << 5) | (self.bits() << 2)
    }

    pub const fn ctrl_meas(self, mode: Mode) -> u8 {
        self.ctrl_meas_baseline() | mode.bits()
    }

    pub const fn ctrl_hum(self) -> u8 {
        self.bits()
    }

    pub fn from_bits<E>(bits: u8) -> Result<Self, Error<E>> {
        match bits {
            1 => Ok(Oversampling::X1),
            2 => Ok(Oversampling::X2),
            3 => Ok(Oversampling::X4),
            4 => Ok(Oversampling::X8),
            5 => Ok(Oversampling::X16),
            other => Err(Error::InvalidOversampling(other)),
        }
    }
}

impl Default for Oversampling {
    fn default() -> Self {
        Oversampling::X16
    }
}

/// Driver configuration, fixed for the lifetime of a [`BME280`](crate::BME280).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I²C address
    pub address: u8,
    /// 1..=5, validated when the driver is created
    pub oversampling: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            oversampling: Oversampling::default().bits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.address, 0x76);
        assert_eq!(config.oversampling, 5);
    }

    #[test]
    fn control_bytes() {
        let osr = Oversampling::X16;
        assert_eq!(osr.ctrl_meas_baseline(), 0b1011_0100);
        assert_eq!(osr.ctrl_meas(Mode::Sleep), 0b1011_0100);
        assert_eq!(osr.ctrl_meas(Mode::Forced), 0b1011_0101);
        assert_eq!(osr.ctrl_hum(), 5);

        assert_eq!(Oversampling::X1.ctrl_meas(Mode::Forced), 0x25);
    }

    #[test]
    fn oversampling_range() {
        for bits in 1..=5u8 {
            let osr = Oversampling::from_bits::<()>(bits).unwrap();
            assert_eq!(osr.bits(), bits);
        }
        assert_eq!(
            Oversampling::from_bits::<()>(0),
            Err(Error::InvalidOversampling(0))
        );
        assert_eq!(
            Oversampling::from_bits::<()>(6),
            Err(Error::InvalidOversampling(6))
        );
    }
}
